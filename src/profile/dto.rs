use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::tracker::View;

pub const DEFAULT_ACTIVITY_LEVEL: f64 = 1.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "Male", alias = "ชาย")]
    Male,
    #[serde(alias = "Female", alias = "หญิง")]
    Female,
}

/// Anthropometric data behind every calorie figure. Height must be > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// years
    pub age: f64,
    pub gender: Gender,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    /// kg
    pub target_weight: f64,
    #[serde(default = "default_activity_level")]
    pub activity_level: f64,
}

fn default_activity_level() -> f64 {
    DEFAULT_ACTIVITY_LEVEL
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 25.0,
            gender: Gender::Female,
            height: 160.0,
            weight: 65.0,
            target_weight: 55.0,
            activity_level: DEFAULT_ACTIVITY_LEVEL,
        }
    }
}

/// A form value: either a JSON number or the text of an `<input type="number">`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    fn coerce(&self, field: &str) -> Result<f64, ApiError> {
        let v = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ApiError::BadRequest(format!("{field} must be a number")))?,
        };
        if !v.is_finite() {
            return Err(ApiError::BadRequest(format!("{field} must be a number")));
        }
        Ok(v)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub age: Option<NumberInput>,
    pub gender: Option<Gender>,
    pub height: Option<NumberInput>,
    pub weight: Option<NumberInput>,
    pub target_weight: Option<NumberInput>,
    pub activity_level: Option<NumberInput>,
}

fn required<T>(v: Option<T>, field: &str) -> Result<T, ApiError> {
    v.ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

impl ProfileRequest {
    /// Presence and numeric coercion only; ranges are not checked.
    pub fn into_profile(self) -> Result<Profile, ApiError> {
        let name = required(self.name, "name")?;
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("name is required".into()));
        }
        let age = required(self.age, "age")?.coerce("age")?;
        let activity_level = match self.activity_level {
            Some(v) => v.coerce("activityLevel")?,
            None => DEFAULT_ACTIVITY_LEVEL,
        };

        Ok(Profile {
            name,
            age,
            gender: required(self.gender, "gender")?,
            height: required(self.height, "height")?.coerce("height")?,
            weight: required(self.weight, "weight")?.coerce("weight")?,
            target_weight: required(self.target_weight, "targetWeight")?.coerce("targetWeight")?,
            activity_level,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: Profile,
    pub is_set: bool,
    pub view: View,
}

#[cfg(test)]
mod dto_tests {
    use super::*;

    fn form(json: serde_json::Value) -> Result<Profile, ApiError> {
        serde_json::from_value::<ProfileRequest>(json).unwrap().into_profile()
    }

    #[test]
    fn coerces_numeric_strings() {
        let p = form(serde_json::json!({
            "name": "Ploy", "age": "30", "gender": "female",
            "height": "165.5", "weight": 70, "targetWeight": "60"
        }))
        .unwrap();
        assert_eq!(p.age, 30.0);
        assert_eq!(p.height, 165.5);
        assert_eq!(p.weight, 70.0);
        assert_eq!(p.target_weight, 60.0);
        assert_eq!(p.activity_level, DEFAULT_ACTIVITY_LEVEL);
    }

    #[test]
    fn rejects_missing_and_garbage_fields() {
        let err = form(serde_json::json!({
            "name": "Ploy", "age": 30, "gender": "female", "height": 165, "weight": 70
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "targetWeight is required");

        let err = form(serde_json::json!({
            "name": "Ploy", "age": 30, "gender": "female",
            "height": "tall", "weight": 70, "targetWeight": 60
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "height must be a number");

        let err = form(serde_json::json!({
            "name": "  ", "age": 30, "gender": "female",
            "height": 160, "weight": 70, "targetWeight": 60
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn no_range_checks() {
        let p = form(serde_json::json!({
            "name": "X", "age": 0, "gender": "male",
            "height": 400, "weight": 1, "targetWeight": 900, "activityLevel": 9
        }))
        .unwrap();
        assert_eq!(p.height, 400.0);
        assert_eq!(p.activity_level, 9.0);

        let p = form(serde_json::json!({
            "name": "X", "age": "-3.5", "gender": "female",
            "height": 160, "weight": 60, "targetWeight": 55
        }))
        .unwrap();
        assert_eq!(p.age, -3.5);
    }

    #[test]
    fn legacy_gender_tags_load() {
        let p: Profile = serde_json::from_str(
            r#"{"name":"A","age":40,"gender":"ชาย","height":170,"weight":80,"targetWeight":70}"#,
        )
        .unwrap();
        assert_eq!(p.gender, Gender::Male);
        assert_eq!(p.activity_level, 1.2);
    }

    #[test]
    fn persisted_shape_is_camel_case() {
        let json = serde_json::to_string(&Profile::default()).unwrap();
        assert!(json.contains("\"targetWeight\":55.0"));
        assert!(json.contains("\"activityLevel\":1.2"));
        assert!(json.contains("\"gender\":\"female\""));
    }
}
