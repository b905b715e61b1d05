//! World provisioning subsystem.
//!
//! # Data Flow
//! ```text
//! provision(selection, identity):
//!     worlds.rs (static map → URL table)
//!     → destination derivation (user-data root / product / identity / Prospects)
//!     → HTTP GET with deadline + bounded jittered retry
//!     → verbatim byte write to <lowercase>_prospect.json
//! ```
//!
//! # Design Decisions
//! - The descriptor is opaque: copied byte-for-byte, never parsed
//! - Overwrite on re-provision; the controller does not version descriptors

pub mod provisioner;
pub mod worlds;

pub use provisioner::{ProvisionError, WorldProvisioner};
pub use worlds::WorldSelection;
