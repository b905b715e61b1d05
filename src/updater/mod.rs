//! External updater boundary.
//!
//! # Design Decisions
//! - The updater is an opaque long-running collaborator; its error text is
//!   surfaced to the caller unchanged
//! - The controller consumes it through the [`Updater`] trait so tests can
//!   substitute a scripted implementation

use async_trait::async_trait;
use thiserror::Error;

pub mod steamcmd;

pub use steamcmd::SteamCmd;

/// Steam application identifier of the Icarus dedicated server.
pub const APP_ID: &str = "2089300";

/// Errors surfaced from the external updater.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// The updater ran and reported failure; the message is its own output,
    /// verbatim.
    #[error("{0}")]
    Failed(String),

    #[error("failed to spawn updater process: {0}")]
    Spawn(std::io::Error),

    #[error("build information unavailable: {0}")]
    BuildUnavailable(String),
}

/// Install/update/version-query capability delegated to the external
/// package-fetch engine.
#[async_trait]
pub trait Updater: Send + Sync {
    /// Install the product for one instance. Blocks until the updater
    /// process exits.
    async fn install(
        &self,
        instance_id: &str,
        extra_args: &str,
        product_id: &str,
        create_dir: bool,
        anonymous: bool,
    ) -> Result<(), UpdaterError>;

    /// Update (optionally validating) the installed product. Blocks until
    /// the updater process exits.
    async fn update(
        &self,
        instance_id: &str,
        product_id: &str,
        validate: bool,
        custom: Option<&str>,
        anonymous: bool,
    ) -> Result<(), UpdaterError>;

    /// Installed build identifier.
    async fn local_build(
        &self,
        instance_id: &str,
        product_id: &str,
    ) -> Result<String, UpdaterError>;

    /// Latest published build identifier.
    async fn remote_build(&self, product_id: &str) -> Result<String, UpdaterError>;
}
