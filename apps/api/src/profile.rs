//! Single-blob profile persistence, the service-side counterpart of the
//! client's saved-profile utility. One JSON document at a fixed path,
//! last write wins, no versioning and no migration. A blob that cannot be
//! read or parsed is treated as absent, not as a failure.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::error;

use crate::models::Profile;

#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persists the profile, replacing whatever was stored before.
    pub async fn save(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating profile dir {}", parent.display()))?;
        }
        let json = serde_json::to_string(profile).context("serializing profile")?;
        fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing profile to {}", self.path.display()))
    }

    /// Loads the stored profile. Missing, unreadable, or corrupt blobs all
    /// read as `None`.
    pub async fn load(&self) -> Option<Profile> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                error!("Failed to read profile {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                error!("Failed to parse profile {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Removes the stored profile. Removing an absent profile is not an error.
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(anyhow::Error::new(e).context(format!("removing {}", self.path.display())))
            }
        }
    }

    #[allow(dead_code)]
    pub async fn exists(&self) -> bool {
        self.load().await.is_some()
    }
}
