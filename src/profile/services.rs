use std::sync::Arc;

use tracing::{debug, info};

use super::dto::Profile;
use super::repo;
use crate::storage::KvStore;

/// Holds the user's profile. Unset until the first successful submission.
pub struct ProfileStore {
    store: Arc<dyn KvStore>,
    profile: Profile,
    is_set: bool,
}

impl ProfileStore {
    pub async fn load(store: Arc<dyn KvStore>) -> anyhow::Result<Self> {
        let loaded = repo::load_profile(store.as_ref()).await?;
        let is_set = loaded.is_some();
        debug!(is_set, "profile loaded");
        Ok(Self {
            store,
            profile: loaded.unwrap_or_default(),
            is_set,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// The profile, but only once it has been submitted.
    pub fn current(&self) -> Option<&Profile> {
        self.is_set.then_some(&self.profile)
    }

    /// Replaces the profile wholesale and persists it. Returns `true` on the
    /// unset → set transition.
    pub async fn set_profile(&mut self, profile: Profile) -> anyhow::Result<bool> {
        let first = !self.is_set;
        repo::save_profile(self.store.as_ref(), &profile).await?;
        self.profile = profile;
        self.is_set = true;
        if first {
            info!(name = %self.profile.name, "profile created");
        }
        Ok(first)
    }

    pub async fn clear(&mut self) -> anyhow::Result<()> {
        repo::clear_profile(self.store.as_ref()).await?;
        self.profile = Profile::default();
        self.is_set = false;
        info!("profile cleared");
        Ok(())
    }
}
