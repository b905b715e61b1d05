//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! controller. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for one managed server instance.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    /// Framework-supplied server profile (identity, ports, install dir).
    pub profile: ServerProfile,

    /// Host path overrides.
    pub paths: PathsConfig,

    /// Embedded console capture settings.
    pub console: ConsoleConfig,

    /// World descriptor fetch settings.
    pub provisioning: ProvisioningConfig,

    /// Graceful stop settings.
    pub stop: StopConfig,

    /// External updater settings.
    pub updater: UpdaterConfig,
}

/// Operator-supplied server profile.
///
/// Port and player-count fields are kept as strings because the owning
/// framework hands them over as raw text; they are parsed (and rejected)
/// during config synthesis, not here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerProfile {
    /// Unique handle the framework uses to name this instance's artifacts.
    pub instance_id: String,

    /// Display name passed to the server and written into its config.
    pub server_name: String,

    /// Bind address for the game server.
    pub ip: String,

    /// Game traffic port.
    pub game_port: String,

    /// Query protocol port.
    pub query_port: String,

    /// Maximum player slots.
    pub max_players: String,

    /// Free-form launch parameters prepended verbatim to the argument string.
    pub server_params: String,

    /// Root directory of the server installation.
    pub install_dir: PathBuf,
}

impl Default for ServerProfile {
    fn default() -> Self {
        Self {
            instance_id: "1".to_string(),
            server_name: "Icarus Dedicated Server".to_string(),
            ip: "0.0.0.0".to_string(),
            game_port: "27015".to_string(),
            query_port: "27016".to_string(),
            max_players: "8".to_string(),
            server_params: String::new(),
            install_dir: PathBuf::from("."),
        }
    }
}

/// Host path overrides. Every field has a platform-derived default; these
/// exist so tests and unusual layouts can redirect the lookups.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the per-user data tree holding the save hierarchy.
    /// Defaults to the platform local-data directory.
    pub user_data_root: Option<PathBuf>,

    /// Steam client installation root, if not in a well-known location.
    pub steam_root: Option<PathBuf>,

    /// Server executable path relative to the install root.
    pub start_path: String,

    /// Platform subdirectory under `Saved/Config/` for the INI companions.
    pub platform_config_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            user_data_root: None,
            steam_root: None,
            start_path: "IcarusServer.exe".to_string(),
            platform_config_dir: "WindowsServer".to_string(),
        }
    }
}

/// Embedded console capture settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Capture the child's stdout/stderr instead of letting them go to an
    /// independent window.
    pub embedded: bool,

    /// Capacity of the line channel between the readers and the sink.
    pub buffer_lines: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            embedded: true,
            buffer_lines: 1024,
        }
    }
}

/// World descriptor fetch settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Map to provision on first run.
    pub world: String,

    /// Optional mirror serving `<name>.json` descriptors, used instead of
    /// the fixed upstream URLs when set.
    pub mirror_url: Option<String>,

    /// Per-request deadline for descriptor fetches, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum fetch attempts (1 = no retry).
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            world: "Olympus".to_string(),
            mirror_url: None,
            request_timeout_secs: 10,
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Graceful stop settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StopConfig {
    /// How long to wait for voluntary exit after the interrupt, in
    /// milliseconds.
    pub grace_timeout_ms: u64,

    /// Escalate to a forced kill when the grace window elapses. Disabling
    /// this reproduces the historical behavior of leaving the process
    /// orphaned.
    pub force_kill: bool,
}

impl Default for StopConfig {
    fn default() -> Self {
        Self {
            grace_timeout_ms: 2000,
            force_kill: true,
        }
    }
}

/// External updater settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Path to the steamcmd binary.
    pub steamcmd_path: PathBuf,

    /// Install/update without user credentials.
    pub anonymous_login: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            steamcmd_path: PathBuf::from("steamcmd"),
            anonymous_login: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let config = ControllerConfig::default();
        assert_eq!(config.profile.game_port, "27015");
        assert_eq!(config.profile.query_port, "27016");
        assert_eq!(config.stop.grace_timeout_ms, 2000);
        assert!(config.stop.force_kill);
        assert!(config.console.embedded);
        assert_eq!(config.provisioning.max_attempts, 3);
    }

    #[test]
    fn test_minimal_toml_parses() {
        let config: ControllerConfig = toml::from_str(
            r#"
            [profile]
            instance_id = "7"
            server_name = "My Outpost"
            "#,
        )
        .unwrap();
        assert_eq!(config.profile.instance_id, "7");
        assert_eq!(config.profile.server_name, "My Outpost");
        // Unspecified sections fall back to defaults
        assert_eq!(config.updater.steamcmd_path, PathBuf::from("steamcmd"));
    }
}
