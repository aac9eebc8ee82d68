use std::sync::Arc;

use serde::Serialize;
use time::Date;

use crate::advisor::dto::MealSuggestion;
use crate::error::ApiError;
use crate::logs::DailyLogStore;
use crate::metrics::memo::{BodyMetrics, MetricsMemo};
use crate::profile::{Profile, ProfileStore};
use crate::storage::KvStore;

/// Which screen the client should land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Profile,
    Dashboard,
}

/// Latest advisory output, in memory only.
#[derive(Debug, Default)]
pub struct Suggestions {
    pub meal_plan: Vec<MealSuggestion>,
    pub remaining: Vec<MealSuggestion>,
    pub remaining_for: Option<f64>,
    pub advice: Option<String>,
}

/// The whole application state behind the HTTP surface.
pub struct Tracker {
    pub profile: ProfileStore,
    pub log: DailyLogStore,
    pub suggestions: Suggestions,
    memo: MetricsMemo,
    view: View,
}

impl Tracker {
    pub async fn load(store: Arc<dyn KvStore>, today: Date) -> anyhow::Result<Self> {
        let profile = ProfileStore::load(store.clone()).await?;
        let log = DailyLogStore::initialize_for_today(store, today).await?;
        let view = if profile.is_set() {
            View::Dashboard
        } else {
            View::Profile
        };
        Ok(Self {
            profile,
            log,
            suggestions: Suggestions::default(),
            memo: MetricsMemo::default(),
            view,
        })
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Replaces the profile; the first submission moves the client to the
    /// dashboard.
    pub async fn submit_profile(&mut self, profile: Profile) -> anyhow::Result<bool> {
        let first = self.profile.set_profile(profile).await?;
        if first {
            self.view = View::Dashboard;
        }
        Ok(first)
    }

    pub async fn clear_profile(&mut self) -> anyhow::Result<()> {
        self.profile.clear().await?;
        self.suggestions = Suggestions::default();
        self.view = View::Profile;
        Ok(())
    }

    pub fn require_profile(&self) -> Result<&Profile, ApiError> {
        self.profile.current().ok_or(ApiError::ProfileUnset)
    }

    pub fn metrics(&mut self) -> Result<BodyMetrics, ApiError> {
        let profile = self.profile.current().ok_or(ApiError::ProfileUnset)?;
        Ok(self.memo.get(profile, self.log.today()))
    }
}
