//! Process lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! install()/update():
//!     delegate to the Updater, block until its process exits
//!
//! start():
//!     executable precondition → argument derivation → spawn (cwd = install
//!     root, window hidden) → console.rs readers (embedded mode)
//!
//! stop():
//!     interrupt → bounded grace wait → forced kill (configurable)
//!     → reader cancellation → stopped
//! ```
//!
//! # Design Decisions
//! - The owning framework consumes the manager through the
//!   [`ManagedGameServer`] capability trait; no base-class coupling
//! - All operations run on the async runtime, so a stop's grace wait never
//!   blocks the caller's thread

pub mod console;
pub mod manager;
pub mod shutdown;
pub mod state;

pub use console::{ConsoleLine, ConsoleStream};
pub use manager::{LifecycleManager, LifecycleError, ProcessHandle, StopOutcome};
pub use shutdown::ShutdownSignal;
pub use state::InstanceState;

use crate::updater::Updater;
use async_trait::async_trait;
use std::path::Path;

/// Capability set the owning framework consumes polymorphically.
#[async_trait]
pub trait ManagedGameServer {
    async fn install(&mut self) -> Result<(), LifecycleError>;
    async fn update(&mut self, validate: bool, custom: Option<&str>) -> Result<(), LifecycleError>;
    fn start(&mut self) -> Result<(), LifecycleError>;
    async fn stop(&mut self) -> Result<StopOutcome, LifecycleError>;
    fn is_install_valid(&self) -> bool;
    fn is_import_valid(&self, path: &Path) -> Result<(), LifecycleError>;
    async fn local_build(&self) -> Result<String, LifecycleError>;
    async fn remote_build(&self) -> Result<String, LifecycleError>;
}

#[async_trait]
impl<U: Updater> ManagedGameServer for LifecycleManager<U> {
    async fn install(&mut self) -> Result<(), LifecycleError> {
        LifecycleManager::install(self).await
    }

    async fn update(&mut self, validate: bool, custom: Option<&str>) -> Result<(), LifecycleError> {
        LifecycleManager::update(self, validate, custom).await
    }

    fn start(&mut self) -> Result<(), LifecycleError> {
        LifecycleManager::start(self)
    }

    async fn stop(&mut self) -> Result<StopOutcome, LifecycleError> {
        LifecycleManager::stop(self).await
    }

    fn is_install_valid(&self) -> bool {
        LifecycleManager::is_install_valid(self)
    }

    fn is_import_valid(&self, path: &Path) -> Result<(), LifecycleError> {
        LifecycleManager::is_import_valid(self, path)
    }

    async fn local_build(&self) -> Result<String, LifecycleError> {
        LifecycleManager::local_build(self).await
    }

    async fn remote_build(&self) -> Result<String, LifecycleError> {
        LifecycleManager::remote_build(self).await
    }
}
