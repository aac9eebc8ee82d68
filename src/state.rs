use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::advisor::{AdvisoryGateway, GeminiGateway, InFlight};
use crate::config::AppConfig;
use crate::logs::services::today_date;
use crate::storage::{FileStore, KvStore};
use crate::tracker::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tracker: Arc<Mutex<Tracker>>,
    pub advisor: Arc<dyn AdvisoryGateway>,
    pub inflight: Arc<InFlight>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = Arc::new(FileStore::open(&config.data_dir).await?) as Arc<dyn KvStore>;

        let gemini = GeminiGateway::new(&config.gemini);
        if !gemini.has_credential() {
            warn!("GEMINI_API_KEY not set; advisory features will return fallbacks");
        }
        let advisor = Arc::new(gemini) as Arc<dyn AdvisoryGateway>;

        let state = Self::from_parts(config, store, advisor).await?;
        info!(data_dir = %state.config.data_dir.display(), "state initialized");
        Ok(state)
    }

    pub async fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn KvStore>,
        advisor: Arc<dyn AdvisoryGateway>,
    ) -> anyhow::Result<Self> {
        let tracker = Tracker::load(store, today_date()).await?;
        Ok(Self {
            config,
            tracker: Arc::new(Mutex::new(tracker)),
            advisor,
            inflight: Arc::new(InFlight::default()),
        })
    }

    #[cfg(test)]
    pub async fn fake(advisor: Arc<dyn AdvisoryGateway>) -> Self {
        use crate::config::{GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
        use crate::storage::MemoryStore;

        let config = Arc::new(AppConfig {
            data_dir: "unused".into(),
            gemini: GeminiConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.into(),
                base_url: DEFAULT_GEMINI_BASE_URL.into(),
            },
        });
        let store = Arc::new(MemoryStore::new()) as Arc<dyn KvStore>;
        Self::from_parts(config, store, advisor)
            .await
            .expect("memory-backed state")
    }
}
