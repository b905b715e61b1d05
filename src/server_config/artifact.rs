//! On-disk server configuration document.
//!
//! Field names and types mirror what the server binary reads at startup:
//! every numeric field is an integer except the two auto-shutdown timeouts,
//! which the binary expects as floating point.

use serde::{Deserialize, Serialize};

/// File name of the synthesized artifact inside the instance directory.
pub const ARTIFACT_FILE_NAME: &str = "Icarus_server.json";

/// Default for both auto-shutdown timeouts, in server time units.
pub const DEFAULT_SHUTDOWN_TIMEOUT: f64 = 300.0;

/// The synthesized configuration consumed by the server binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfigArtifact {
    pub name: String,
    pub password: String,
    #[serde(rename = "saveDirectory")]
    pub save_directory: String,
    #[serde(rename = "logDirectory")]
    pub log_directory: String,
    pub ip: String,
    #[serde(rename = "gamePort")]
    pub game_port: u16,
    #[serde(rename = "queryPort")]
    pub query_port: u16,
    #[serde(rename = "slotCount")]
    pub slot_count: u32,
    #[serde(rename = "gameSettingsPreset")]
    pub game_settings_preset: String,
    #[serde(rename = "gameSettings")]
    pub game_settings: GameSettings,
    #[serde(rename = "userGroups")]
    pub user_groups: Vec<UserGroup>,
}

/// World/session settings block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameSettings {
    pub session_name: String,
    pub join_password: String,
    pub max_players: u32,
    pub shutdown_if_not_joined_for: f64,
    pub shutdown_if_empty_for: f64,
    pub allow_non_admins_to_launch_prospects: bool,
    pub allow_non_admins_to_delete_prospects: bool,
    pub load_prospect: String,
    pub create_prospect: String,
    pub resume_prospect: bool,
    pub last_prospect_name: String,
}

/// One access-tier entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGroup {
    pub name: String,
    pub password: String,
    #[serde(rename = "canKickBan")]
    pub can_kick_ban: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_match_server_expectations() {
        let artifact = ServerConfigArtifact {
            name: "test".to_string(),
            password: String::new(),
            save_directory: "./savegame".to_string(),
            log_directory: "./logs".to_string(),
            ip: "0.0.0.0".to_string(),
            game_port: 27015,
            query_port: 27016,
            slot_count: 8,
            game_settings_preset: "Default".to_string(),
            game_settings: GameSettings {
                session_name: "test".to_string(),
                join_password: String::new(),
                max_players: 8,
                shutdown_if_not_joined_for: DEFAULT_SHUTDOWN_TIMEOUT,
                shutdown_if_empty_for: DEFAULT_SHUTDOWN_TIMEOUT,
                allow_non_admins_to_launch_prospects: true,
                allow_non_admins_to_delete_prospects: false,
                load_prospect: String::new(),
                create_prospect: String::new(),
                resume_prospect: true,
                last_prospect_name: "olympus_prospect.json".to_string(),
            },
            user_groups: vec![],
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&artifact).unwrap()).unwrap();

        assert!(json.get("gamePort").unwrap().is_u64());
        assert!(json.get("queryPort").unwrap().is_u64());
        assert!(json.get("slotCount").unwrap().is_u64());
        assert!(json.get("saveDirectory").is_some());
        let settings = json.get("gameSettings").unwrap();
        // The two shutdown timeouts are the only floating-point fields
        assert!(settings.get("ShutdownIfNotJoinedFor").unwrap().is_f64());
        assert!(settings.get("ShutdownIfEmptyFor").unwrap().is_f64());
        assert!(settings.get("MaxPlayers").unwrap().is_u64());
        assert!(settings.get("LastProspectName").is_some());
    }
}
