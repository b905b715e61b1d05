//! Resilience helpers.
//!
//! # Design Decisions
//! - Every external call has a deadline; the descriptor fetch is the only
//!   network dependency and the only retried operation
//! - Jittered backoff prevents hammering the descriptor host
//! - Precondition failures are never retried

pub mod backoff;

pub use backoff::BackoffPolicy;
