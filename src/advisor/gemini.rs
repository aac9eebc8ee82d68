//! # Gemini gateway
//!
//! [`AdvisoryGateway`] over Google's Generative Language API
//! (`models/{model}:generateContent`). Structured calls ask for
//! `application/json` output constrained by a response schema; the advice
//! call asks for plain text.
//!
//! Without an API key every call short-circuits to its fallback and no
//! request is made.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::dto::{DaySnapshot, MealSuggestion, MealType};
use super::gateway::{AdvisoryGateway, ADVICE_EMPTY, ADVICE_NO_KEY, ADVICE_UNAVAILABLE};
use super::prompts;
use crate::config::GeminiConfig;
use crate::logs::dto::{now_timestamp, FoodItem};
use crate::profile::Profile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// The model's answer to a food description, before it gets a timestamp.
#[derive(Debug, Deserialize)]
struct FoodEstimate {
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl FoodEstimate {
    fn logged_now(self) -> FoodItem {
        FoodItem {
            name: self.name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            timestamp: now_timestamp(),
        }
    }
}

pub struct GeminiGateway {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: String, schema: Option<Value>) -> GenerateRequest {
        GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: schema.map(|response_schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            }),
        }
    }

    /// One `generateContent` round trip. `Ok(None)` means the model answered
    /// with no text.
    async fn generate(
        &self,
        api_key: &str,
        prompt: String,
        schema: Option<Value>,
    ) -> anyhow::Result<Option<String>> {
        let body = Self::build_request(prompt, schema);
        debug!(model = %self.model, "sending request to Gemini");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .context("gemini request")?;

        let status = response.status();
        let text = response.text().await.context("read gemini response")?;
        if !status.is_success() {
            let message = serde_json::from_str::<GenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map_or(text, |e| e.message);
            anyhow::bail!("gemini error ({status}): {message}");
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).context("parse gemini response")?;
        if let Some(e) = parsed.error {
            anyhow::bail!("gemini error: {}", e.message);
        }
        Ok(extract_text(&parsed))
    }
}

fn extract_text(response: &GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .as_ref()?
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

fn parse_food(text: &str) -> anyhow::Result<FoodItem> {
    let estimate: FoodEstimate = serde_json::from_str(text).context("parse food estimate")?;
    Ok(estimate.logged_now())
}

fn parse_suggestions(text: &str) -> anyhow::Result<Vec<MealSuggestion>> {
    serde_json::from_str(text).context("parse meal suggestions")
}

#[async_trait]
impl AdvisoryGateway for GeminiGateway {
    #[instrument(skip(self))]
    async fn analyze_food(&self, description: &str) -> Option<FoodItem> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("no api key; skipping food analysis");
            return None;
        };
        let result = self
            .generate(key, prompts::analyze_food(description), Some(prompts::food_schema()))
            .await
            .and_then(|text| text.map(|t| parse_food(&t)).transpose());
        match result {
            Ok(food) => food,
            Err(e) => {
                error!(error = %e, "food analysis failed");
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn suggest_meal_plan(&self, target_calories: f64) -> Vec<MealSuggestion> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("no api key; skipping meal plan");
            return Vec::new();
        };
        let result = self
            .generate(
                key,
                prompts::meal_plan(target_calories),
                Some(prompts::suggestions_schema(None)),
            )
            .await
            .and_then(|text| text.map(|t| parse_suggestions(&t)).transpose());
        match result {
            Ok(plan) => plan.unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "meal plan failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    async fn suggest_food_for_remaining(&self, remaining_calories: f64) -> Vec<MealSuggestion> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("no api key; skipping remaining-calorie suggestions");
            return Vec::new();
        };
        let result = self
            .generate(
                key,
                prompts::remaining(remaining_calories),
                Some(prompts::suggestions_schema(Some(
                    "Why it is recommended, or a tip for eating it",
                ))),
            )
            .await
            .and_then(|text| text.map(|t| parse_suggestions(&t)).transpose());
        match result {
            Ok(list) => {
                let mut list = list.unwrap_or_default();
                for s in &mut list {
                    s.meal_type = MealType::Snack;
                }
                list
            }
            Err(e) => {
                error!(error = %e, "remaining-calorie suggestions failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, profile))]
    async fn health_advice(&self, profile: &Profile, day: DaySnapshot) -> String {
        let Some(key) = self.api_key.as_deref() else {
            return ADVICE_NO_KEY.to_string();
        };
        match self.generate(key, prompts::health_advice(profile, day), None).await {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => ADVICE_EMPTY.to_string(),
            Err(e) => {
                warn!(error = %e, "health advice failed");
                ADVICE_UNAVAILABLE.to_string()
            }
        }
    }
}

impl Debug for GeminiGateway {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiGateway")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod gemini_tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn config(api_key: Option<&str>, base_url: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-2.5-flash".into(),
            base_url: base_url.into(),
        }
    }

    /// Serves a canned `generateContent` reply on a random local port.
    async fn fake_gemini(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/models/:call",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn text_reply(text: &str) -> Value {
        json!({ "candidates": [ { "content": { "role": "model", "parts": [ { "text": text } ] } } ] })
    }

    #[test]
    fn structured_request_shape() {
        let req = GeminiGateway::build_request("hi".into(), Some(prompts::food_schema()));
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(v["generationConfig"]["responseSchema"]["type"], "OBJECT");

        let plain = serde_json::to_value(GeminiGateway::build_request("hi".into(), None)).unwrap();
        assert!(plain.get("generationConfig").is_none());
    }

    #[test]
    fn extract_text_joins_parts_and_rejects_blank() {
        let r: GenerateResponse = serde_json::from_value(json!({
            "candidates": [ { "content": { "parts": [ { "text": "[{\"a\"" }, { "text": ":1}]" } ] } } ]
        }))
        .unwrap();
        assert_eq!(extract_text(&r).as_deref(), Some("[{\"a\":1}]"));

        let blank: GenerateResponse =
            serde_json::from_value(json!({ "candidates": [ { "content": { "parts": [] } } ] }))
                .unwrap();
        assert_eq!(extract_text(&blank), None);
        let none: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(&none), None);
    }

    #[test]
    fn parse_food_stamps_timestamp() {
        let food = parse_food(
            r#"{"name":"Khao man gai","calories":596,"protein":29,"carbs":68,"fat":22}"#,
        )
        .unwrap();
        assert_eq!(food.name, "Khao man gai");
        assert_eq!(food.calories, 596.0);
        assert!(food.timestamp.contains('T'));
        assert!(parse_food(r#"{"name":"x"}"#).is_err());
    }

    #[tokio::test]
    async fn missing_key_degrades_without_network() {
        // A failed request would yield ADVICE_UNAVAILABLE, not ADVICE_NO_KEY.
        let gw = GeminiGateway::new(&config(None, "http://127.0.0.1:9"));
        assert!(!gw.has_credential());
        assert!(gw.analyze_food("rice").await.is_none());
        assert!(gw.suggest_meal_plan(1500.0).await.is_empty());
        assert!(gw.suggest_food_for_remaining(100.0).await.is_empty());
        let advice = gw
            .health_advice(
                &Profile::default(),
                DaySnapshot {
                    calories: 0.0,
                    water_glasses: 0,
                },
            )
            .await;
        assert_eq!(advice, ADVICE_NO_KEY);
    }

    #[tokio::test]
    async fn analyze_food_against_fake_server() {
        let base = fake_gemini(
            StatusCode::OK,
            text_reply(r#"{"name":"Pad kra pao","calories":580,"protein":30,"carbs":60,"fat":24}"#),
        )
        .await;
        let gw = GeminiGateway::new(&config(Some("k"), &base));
        let food = gw.analyze_food("basil pork with rice").await.unwrap();
        assert_eq!(food.name, "Pad kra pao");
        assert_eq!(food.fat, 24.0);
    }

    #[tokio::test]
    async fn remaining_suggestions_are_forced_to_snack() {
        let base = fake_gemini(
            StatusCode::OK,
            text_reply(
                r#"[{"mealName":"Grilled chicken","description":"lean","calories":180,"type":"dinner"},
                    {"mealName":"Soy milk","description":"unsweetened","calories":90,"type":"snack"}]"#,
            ),
        )
        .await;
        let gw = GeminiGateway::new(&config(Some("k"), &base));
        let list = gw.suggest_food_for_remaining(300.0).await;
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|s| s.meal_type == MealType::Snack));

        let plan = gw.suggest_meal_plan(1585.0).await;
        assert_eq!(plan[0].meal_type, MealType::Dinner);
    }

    #[tokio::test]
    async fn server_errors_become_fallbacks() {
        let base = fake_gemini(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "quota exceeded" } }),
        )
        .await;
        let gw = GeminiGateway::new(&config(Some("k"), &base));
        assert!(gw.analyze_food("rice").await.is_none());
        assert!(gw.suggest_meal_plan(1500.0).await.is_empty());
        let advice = gw
            .health_advice(
                &Profile::default(),
                DaySnapshot {
                    calories: 900.0,
                    water_glasses: 2,
                },
            )
            .await;
        assert_eq!(advice, ADVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn malformed_json_becomes_fallback() {
        let base = fake_gemini(StatusCode::OK, text_reply("not json at all")).await;
        let gw = GeminiGateway::new(&config(Some("k"), &base));
        assert!(gw.analyze_food("rice").await.is_none());
        assert!(gw.suggest_meal_plan(1500.0).await.is_empty());
    }

    #[tokio::test]
    async fn blank_advice_uses_encouragement() {
        let base = fake_gemini(StatusCode::OK, json!({ "candidates": [] })).await;
        let gw = GeminiGateway::new(&config(Some("k"), &base));
        let advice = gw
            .health_advice(
                &Profile::default(),
                DaySnapshot {
                    calories: 900.0,
                    water_glasses: 2,
                },
            )
            .await;
        assert_eq!(advice, ADVICE_EMPTY);
    }
}
