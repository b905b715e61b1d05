//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check required profile fields are present
//! - Validate value ranges (timeouts > 0, attempts >= 1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ControllerConfig → Result<(), Vec<ValidationError>>
//! - Port and player-count strings are deliberately NOT parsed here; the
//!   synthesizer owns that check and reports the offending field by name

use crate::config::schema::ControllerConfig;
use crate::provision::worlds::WorldSelection;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &ControllerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.profile.instance_id.trim().is_empty() {
        errors.push(ValidationError {
            field: "profile.instance_id",
            message: "must not be empty".to_string(),
        });
    }

    if config.profile.server_name.trim().is_empty() {
        errors.push(ValidationError {
            field: "profile.server_name",
            message: "must not be empty".to_string(),
        });
    }

    if config.paths.start_path.trim().is_empty() {
        errors.push(ValidationError {
            field: "paths.start_path",
            message: "must not be empty".to_string(),
        });
    }

    if let Err(e) = config.provisioning.world.parse::<WorldSelection>() {
        errors.push(ValidationError {
            field: "provisioning.world",
            message: e.to_string(),
        });
    }

    if config.provisioning.max_attempts == 0 {
        errors.push(ValidationError {
            field: "provisioning.max_attempts",
            message: "must be at least 1".to_string(),
        });
    }

    if config.provisioning.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "provisioning.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.stop.grace_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "stop.grace_timeout_ms",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.console.embedded && config.console.buffer_lines == 0 {
        errors.push(ValidationError {
            field: "console.buffer_lines",
            message: "must be greater than zero when embedded console is enabled".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ControllerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ControllerConfig::default();
        config.profile.instance_id = " ".to_string();
        config.provisioning.max_attempts = 0;
        config.stop.grace_timeout_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "profile.instance_id"));
        assert!(errors.iter().any(|e| e.field == "stop.grace_timeout_ms"));
    }

    #[test]
    fn test_unknown_world_is_rejected() {
        let mut config = ControllerConfig::default();
        config.provisioning.world = "Atlantis".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "provisioning.world"));
    }

    #[test]
    fn test_non_numeric_port_is_not_a_validation_error() {
        // The synthesizer owns this failure; validation must let it through.
        let mut config = ControllerConfig::default();
        config.profile.max_players = "abc".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
