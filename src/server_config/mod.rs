//! Server configuration synthesis subsystem.
//!
//! # Data Flow
//! ```text
//! synthesize(profile, creds, world):
//!     parse string fields → artifact.rs document
//!     → write_artifact (instance dir, Icarus_server.json)
//!     → ini.rs companions (install root, Saved/Config/<platform>/)
//! ```
//!
//! # Design Decisions
//! - Artifact field names/types match the server binary exactly; the two
//!   shutdown timeouts are the only floats
//! - Parse failures abort before any file is touched

pub mod artifact;
pub mod ini;
pub mod synthesizer;

pub use artifact::ServerConfigArtifact;
pub use synthesizer::{synthesize, write_artifact, SynthesisError};
