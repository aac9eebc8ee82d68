use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub const ML_PER_GLASS: f64 = 250.0;
/// Persisted water values below this are legacy glass counts.
pub const LEGACY_WATER_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub timestamp: String,
}

/// RFC 3339 timestamp for a freshly logged food.
pub fn now_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: String,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    /// ml
    #[serde(default)]
    pub water_intake: f64,
}

impl DailyLog {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            foods: Vec::new(),
            water_intake: 0.0,
        }
    }

    pub fn push_food(&mut self, item: FoodItem) {
        self.foods.push(item);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<FoodItem> {
        (index < self.foods.len()).then(|| self.foods.remove(index))
    }

    /// Maps a position in the most-recent-first view back to storage order.
    pub fn display_to_storage(&self, display_index: usize) -> Option<usize> {
        (display_index < self.foods.len()).then(|| self.foods.len() - 1 - display_index)
    }

    pub fn apply_water(&mut self, delta_ml: f64) {
        self.water_intake = (self.water_intake + delta_ml).max(0.0);
    }

    /// Rescales a legacy glass count to ml. Ambiguous by construction: a
    /// genuine intake below the threshold is rescaled too.
    pub fn migrate_legacy_water(&mut self) -> bool {
        if self.water_intake > 0.0 && self.water_intake < LEGACY_WATER_THRESHOLD {
            self.water_intake *= ML_PER_GLASS;
            true
        } else {
            false
        }
    }

    pub fn foods_recent_first(&self) -> Vec<FoodItem> {
        self.foods.iter().rev().cloned().collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeFoodRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeFoodResponse {
    /// `None` when the advisory service produced nothing; the log is unchanged.
    pub food: Option<FoodItem>,
    pub log: DailyLog,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterRequest {
    #[serde(alias = "delta_ml")]
    pub delta_ml: f64,
}
