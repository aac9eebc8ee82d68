use std::collections::BTreeMap;

use anyhow::Context;
use tracing::{error, warn};

use super::dto::DailyLog;
use crate::storage::KvStore;

pub const DAILY_LOGS_KEY: &str = "daily_logs";
pub const CORRUPT_LOGS_KEY: &str = "daily_logs.corrupt";

pub type DailyLogs = BTreeMap<String, DailyLog>;

/// Loads the whole date-key → log mapping. An unreadable blob is copied to
/// [`CORRUPT_LOGS_KEY`] and an empty mapping is returned.
pub async fn load_logs(store: &dyn KvStore) -> anyhow::Result<DailyLogs> {
    let Some(raw) = store.get(DAILY_LOGS_KEY).await.context("load daily logs")? else {
        return Ok(DailyLogs::new());
    };
    match serde_json::from_str::<DailyLogs>(&raw) {
        Ok(logs) => Ok(logs),
        Err(e) => {
            error!(error = %e, "persisted daily logs are unreadable; keeping a copy");
            if let Err(e) = store.set(CORRUPT_LOGS_KEY, &raw).await {
                warn!(error = %e, "could not keep a copy of unreadable daily logs");
            }
            Ok(DailyLogs::new())
        }
    }
}

/// Read-modify-write of the whole mapping with `log` stored under its date.
pub async fn save_day(store: &dyn KvStore, log: &DailyLog) -> anyhow::Result<()> {
    let mut logs = load_logs(store).await?;
    logs.insert(log.date.clone(), log.clone());
    let raw = serde_json::to_string(&logs).context("serialize daily logs")?;
    store.set(DAILY_LOGS_KEY, &raw).await.context("save daily logs")
}

#[cfg(test)]
mod repo_tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn save_day_keeps_other_days() {
        let store = MemoryStore::new();
        let mut yesterday = DailyLog::empty("2026-10-14");
        yesterday.water_intake = 2000.0;
        save_day(&store, &yesterday).await.unwrap();
        save_day(&store, &DailyLog::empty("2026-10-15")).await.unwrap();

        let logs = load_logs(&store).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs["2026-10-14"].water_intake, 2000.0);
    }

    #[tokio::test]
    async fn corrupt_blob_is_backed_up() {
        let store = MemoryStore::new();
        store.set(DAILY_LOGS_KEY, "[[[").await.unwrap();

        let logs = load_logs(&store).await.unwrap();
        assert!(logs.is_empty());
        assert_eq!(
            store.get(CORRUPT_LOGS_KEY).await.unwrap().as_deref(),
            Some("[[[")
        );
    }
}
