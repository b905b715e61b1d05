//! World descriptor fetch and placement.
//!
//! # Responsibilities
//! - Resolve the selection against the static descriptor table
//! - Derive the per-identity save destination and create it
//! - Fetch the descriptor with a deadline and bounded retry
//! - Place the bytes verbatim at the conventional file name
//!
//! # Design Decisions
//! - Idempotent, not transactional: re-provisioning overwrites; a crash
//!   mid-write can leave a truncated file, which the server binary rejects
//! - The fetch is the only network-touching step and the only retried one

use crate::config::schema::ProvisioningConfig;
use crate::identity::OperatorIdentity;
use crate::provision::worlds::WorldSelection;
use crate::resilience::BackoffPolicy;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Product subpath between the user-data root and the per-identity tree.
const PRODUCT_SUBPATH: [&str; 3] = ["Icarus", "Saved", "PlayerData"];

/// Final directory under the identity holding placed descriptors.
const PROSPECTS_DIR: &str = "Prospects";

/// Errors from descriptor provisioning.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("unknown world selection: {0}")]
    UnknownWorld(String),

    #[error("destination unavailable at {path}: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch world descriptor from {url}: {message}")]
    FetchFailed { url: String, message: String },

    #[error("failed to write world descriptor to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Fetches remote world descriptors and places them in the per-identity
/// save tree.
pub struct WorldProvisioner {
    client: reqwest::Client,
    config: ProvisioningConfig,
    user_data_root: PathBuf,
}

impl WorldProvisioner {
    /// `user_data_root` is the platform local-data directory unless the
    /// configuration overrides it.
    pub fn new(config: ProvisioningConfig, user_data_root: Option<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            user_data_root: user_data_root.unwrap_or_else(default_user_data_root),
        }
    }

    /// Deterministic destination directory for one identity's descriptors.
    pub fn destination_dir(&self, identity: &OperatorIdentity) -> PathBuf {
        let mut dir = self.user_data_root.clone();
        for part in PRODUCT_SUBPATH {
            dir.push(part);
        }
        dir.push(&identity.0);
        dir.push(PROSPECTS_DIR);
        dir
    }

    /// Resolve a raw map name and provision it. Unknown names are a hard
    /// error, never a silent default.
    pub async fn provision_by_name(
        &self,
        name: &str,
        identity: &OperatorIdentity,
    ) -> Result<PathBuf, ProvisionError> {
        let selection: WorldSelection = name
            .parse()
            .map_err(|e: crate::provision::worlds::UnknownWorld| {
                ProvisionError::UnknownWorld(e.0)
            })?;
        self.provision(selection, identity).await
    }

    /// Fetch the descriptor for `selection` and place it for `identity`.
    ///
    /// Returns the path of the placed file. Safe to re-run; the prior
    /// artifact is overwritten.
    pub async fn provision(
        &self,
        selection: WorldSelection,
        identity: &OperatorIdentity,
    ) -> Result<PathBuf, ProvisionError> {
        let dest_dir = self.destination_dir(identity);
        std::fs::create_dir_all(&dest_dir).map_err(|source| {
            ProvisionError::DestinationUnavailable {
                path: dest_dir.clone(),
                source,
            }
        })?;

        let url = self.descriptor_url(selection)?;
        let bytes = self.fetch_with_retry(&url).await?;

        let dest_file = dest_dir.join(selection.prospect_file_name());
        std::fs::write(&dest_file, &bytes).map_err(|source| ProvisionError::WriteFailed {
            path: dest_file.clone(),
            source,
        })?;

        tracing::info!(
            world = %selection,
            bytes = bytes.len(),
            path = %dest_file.display(),
            "World descriptor placed"
        );

        Ok(dest_file)
    }

    fn descriptor_url(&self, selection: WorldSelection) -> Result<String, ProvisionError> {
        match &self.config.mirror_url {
            None => Ok(selection.descriptor_url().to_string()),
            Some(mirror) => {
                let base = Url::parse(mirror).map_err(|e| ProvisionError::FetchFailed {
                    url: mirror.clone(),
                    message: format!("invalid mirror URL: {}", e),
                })?;
                let joined = base
                    .join(&format!("{}.json", selection.name()))
                    .map_err(|e| ProvisionError::FetchFailed {
                        url: mirror.clone(),
                        message: format!("invalid mirror URL: {}", e),
                    })?;
                Ok(joined.to_string())
            }
        }
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<Vec<u8>, ProvisionError> {
        let policy = BackoffPolicy {
            base_ms: self.config.base_delay_ms,
            max_ms: self.config.max_delay_ms,
        };
        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let attempts = self.config.max_attempts.max(1);

        let mut last_error = String::new();
        for attempt in 0..attempts {
            let delay = policy.delay_for(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.fetch_once(url, timeout).await {
                Ok(bytes) => return Ok(bytes),
                Err(message) => {
                    tracing::warn!(
                        url,
                        attempt = attempt + 1,
                        attempts,
                        error = %message,
                        "Descriptor fetch failed"
                    );
                    last_error = message;
                }
            }
        }

        Err(ProvisionError::FetchFailed {
            url: url.to_string(),
            message: last_error,
        })
    }

    async fn fetch_once(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("non-success status {}", status));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| e.to_string())
    }
}

/// Platform default for the per-user data root.
#[cfg(windows)]
fn default_user_data_root() -> PathBuf {
    std::env::var("LOCALAPPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(r"C:\Users\Default\AppData\Local"))
}

#[cfg(not(windows))]
fn default_user_data_root() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_default();
    PathBuf::from(home).join(".local").join("share")
}
