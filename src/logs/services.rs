use std::sync::Arc;

use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use super::dto::{DailyLog, FoodItem};
use super::repo;
use crate::storage::KvStore;

/// Today's calendar date in local time, UTC if the offset is unknown.
pub fn today_date() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// `YYYY-MM-DD`
pub fn date_key(date: Date) -> String {
    date.to_string()
}

/// The log of the day that was current at load time. Every mutation is
/// written back through [`repo::save_day`].
pub struct DailyLogStore {
    store: Arc<dyn KvStore>,
    today: DailyLog,
}

impl DailyLogStore {
    pub async fn initialize_for_today(store: Arc<dyn KvStore>, date: Date) -> anyhow::Result<Self> {
        let key = date_key(date);
        let mut logs = repo::load_logs(store.as_ref()).await?;
        let mut today = logs.remove(&key).unwrap_or_else(|| DailyLog::empty(key.clone()));
        today.date = key;

        let before = today.water_intake;
        if today.migrate_legacy_water() {
            info!(before, after = today.water_intake, "migrated legacy water glasses to ml");
            repo::save_day(store.as_ref(), &today).await?;
        }
        debug!(date = %today.date, foods = today.foods.len(), "daily log loaded");
        Ok(Self { store, today })
    }

    /// Re-runs the load for `date`, picking up a new calendar day.
    pub async fn reload(&mut self, date: Date) -> anyhow::Result<()> {
        *self = Self::initialize_for_today(self.store.clone(), date).await?;
        Ok(())
    }

    pub fn today(&self) -> &DailyLog {
        &self.today
    }

    pub async fn add_food(&mut self, item: FoodItem) -> anyhow::Result<()> {
        debug!(name = %item.name, calories = item.calories, "food added");
        let mut next = self.today.clone();
        next.push_food(item);
        self.commit(next).await
    }

    pub async fn remove_food(&mut self, index: usize) -> anyhow::Result<Option<FoodItem>> {
        let mut next = self.today.clone();
        let removed = next.remove_at(index);
        if removed.is_some() {
            self.commit(next).await?;
        }
        Ok(removed)
    }

    pub async fn remove_food_display(
        &mut self,
        display_index: usize,
    ) -> anyhow::Result<Option<FoodItem>> {
        match self.today.display_to_storage(display_index) {
            Some(index) => self.remove_food(index).await,
            None => Ok(None),
        }
    }

    pub async fn add_water(&mut self, delta_ml: f64) -> anyhow::Result<f64> {
        let mut next = self.today.clone();
        next.apply_water(delta_ml);
        self.commit(next).await?;
        Ok(self.today.water_intake)
    }

    /// Writes `next` and only then makes it today's log. A failed write
    /// leaves the in-memory log untouched.
    async fn commit(&mut self, next: DailyLog) -> anyhow::Result<()> {
        repo::save_day(self.store.as_ref(), &next).await?;
        self.today = next;
        Ok(())
    }
}
