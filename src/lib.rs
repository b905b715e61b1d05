//! Icarus Dedicated Server Controller Library

pub mod config;
pub mod credentials;
pub mod identity;
pub mod lifecycle;
pub mod provision;
pub mod resilience;
pub mod server_config;
pub mod updater;

pub use config::ControllerConfig;
pub use credentials::{CredentialGenerator, CredentialSet};
pub use identity::{IdentityResolver, OperatorIdentity};
pub use lifecycle::{LifecycleManager, ManagedGameServer};
pub use provision::{WorldProvisioner, WorldSelection};
pub use server_config::ServerConfigArtifact;
