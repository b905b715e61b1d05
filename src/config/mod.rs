//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ControllerConfig (validated, immutable)
//!     → handed to the lifecycle manager at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable for the lifetime of one controller instance
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Framework-supplied numeric fields stay strings until synthesis

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ControllerConfig;
pub use schema::ServerProfile;
