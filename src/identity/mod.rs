//! Operator identity subsystem.
//!
//! # Data Flow
//! ```text
//! resolve():
//!     process table probe (is the client running?)
//!     → installation root lookup (override, env, candidates)
//!     → login_record.rs (scan loginusers.vdf)
//!     → OperatorIdentity
//! ```
//!
//! # Design Decisions
//! - Every step maps to a distinct precondition error so the caller can
//!   report exactly what is missing
//! - "First identifier in the file" is the documented most-recent heuristic

pub mod login_record;
pub mod resolver;

pub use resolver::{IdentityError, IdentityResolver, OperatorIdentity};
