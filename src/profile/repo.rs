use anyhow::Context;
use tracing::warn;

use super::dto::Profile;
use crate::storage::KvStore;

pub const PROFILE_KEY: &str = "profile";

/// A blob that no longer parses is reported and treated as absent.
pub async fn load_profile(store: &dyn KvStore) -> anyhow::Result<Option<Profile>> {
    let Some(raw) = store.get(PROFILE_KEY).await.context("load profile")? else {
        return Ok(None);
    };
    match serde_json::from_str::<Profile>(&raw) {
        Ok(p) => Ok(Some(p)),
        Err(e) => {
            warn!(error = %e, "persisted profile is unreadable; starting unset");
            Ok(None)
        }
    }
}

pub async fn save_profile(store: &dyn KvStore, profile: &Profile) -> anyhow::Result<()> {
    let raw = serde_json::to_string(profile).context("serialize profile")?;
    store.set(PROFILE_KEY, &raw).await.context("save profile")
}

pub async fn clear_profile(store: &dyn KvStore) -> anyhow::Result<()> {
    store.remove(PROFILE_KEY).await.context("clear profile")
}
