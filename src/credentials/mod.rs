//! Access-tier credential generation.
//!
//! # Responsibilities
//! - Mint the three per-tier secrets written into the server config
//! - Keep the entropy source pluggable so tests can pin the output
//!
//! # Design Decisions
//! - Secrets are 8-character alphanumeric strings; the server binary treats
//!   them as opaque join passwords, not security material
//! - No persistence: every synthesis mints a fresh set
//! - No uniqueness guarantee across the three tiers

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of every generated secret.
pub const SECRET_LEN: usize = 8;

/// The three independently generated access-tier secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub admin: String,
    pub friend: String,
    pub guest: String,
}

/// Source of random alphanumeric strings.
///
/// The default implementation draws from the thread-local RNG; tests
/// substitute a deterministic source.
pub trait RandomSource {
    fn alphanumeric(&mut self, len: usize) -> String;
}

/// Thread-local RNG backed source.
#[derive(Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn alphanumeric(&mut self, len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Generator over a pluggable random source.
#[derive(Debug, Default)]
pub struct CredentialGenerator<S = ThreadRngSource> {
    source: S,
}

impl CredentialGenerator<ThreadRngSource> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: RandomSource> CredentialGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Mint a fresh credential set. Cannot fail; each secret is exactly
    /// [`SECRET_LEN`] characters.
    pub fn generate(&mut self) -> CredentialSet {
        CredentialSet {
            admin: self.source.alphanumeric(SECRET_LEN),
            friend: self.source.alphanumeric(SECRET_LEN),
            guest: self.source.alphanumeric(SECRET_LEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<String>);

    impl RandomSource for FixedSource {
        fn alphanumeric(&mut self, _len: usize) -> String {
            self.0.remove(0)
        }
    }

    fn assert_valid_secret(s: &str) {
        assert_eq!(s.len(), SECRET_LEN);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_secrets_have_valid_shape() {
        let mut gen = CredentialGenerator::new();
        let creds = gen.generate();
        assert_valid_secret(&creds.admin);
        assert_valid_secret(&creds.friend);
        assert_valid_secret(&creds.guest);
    }

    #[test]
    fn test_secrets_are_never_empty_across_runs() {
        let mut gen = CredentialGenerator::new();
        for _ in 0..100 {
            let creds = gen.generate();
            assert!(!creds.admin.is_empty());
            assert!(!creds.friend.is_empty());
            assert!(!creds.guest.is_empty());
        }
    }

    #[test]
    fn test_injected_source_is_used_in_tier_order() {
        let source = FixedSource(vec![
            "AAAAAAAA".to_string(),
            "BBBBBBBB".to_string(),
            "CCCCCCCC".to_string(),
        ]);
        let mut gen = CredentialGenerator::with_source(source);
        let creds = gen.generate();
        assert_eq!(creds.admin, "AAAAAAAA");
        assert_eq!(creds.friend, "BBBBBBBB");
        assert_eq!(creds.guest, "CCCCCCCC");
    }
}
