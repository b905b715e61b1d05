//! Deterministic synthesis of the server's runtime configuration.
//!
//! # Responsibilities
//! - Parse the framework-supplied string fields, naming the offender on
//!   failure
//! - Merge profile, generated credentials, and the provisioned world
//!   reference into the artifact document
//! - Persist the artifact to the instance directory
//!
//! # Design Decisions
//! - Synthesis is pure; writing is a separate step so a parse failure can
//!   never leave a partial artifact on disk
//! - Every synthesis regenerates the document wholesale; no merging with a
//!   prior artifact

use crate::config::schema::ServerProfile;
use crate::credentials::CredentialSet;
use crate::provision::WorldSelection;
use crate::server_config::artifact::{
    GameSettings, ServerConfigArtifact, UserGroup, ARTIFACT_FILE_NAME, DEFAULT_SHUTDOWN_TIMEOUT,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Fixed relative save/log conventions the server binary expects.
const SAVE_DIRECTORY: &str = "./savegame";
const LOG_DIRECTORY: &str = "./logs";

/// Errors from config synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("invalid profile field {field}: {value:?} is not a valid number")]
    InvalidProfileField { field: &'static str, value: String },

    #[error("failed to write server config to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Build the artifact from the profile, fresh credentials, and the selected
/// world. Fails without side effects when a numeric profile field does not
/// parse.
pub fn synthesize(
    profile: &ServerProfile,
    creds: &CredentialSet,
    world: WorldSelection,
) -> Result<ServerConfigArtifact, SynthesisError> {
    let game_port: u16 = parse_field("game_port", &profile.game_port)?;
    let query_port: u16 = parse_field("query_port", &profile.query_port)?;
    let slot_count: u32 = parse_field("max_players", &profile.max_players)?;

    Ok(ServerConfigArtifact {
        name: profile.server_name.clone(),
        password: String::new(),
        save_directory: SAVE_DIRECTORY.to_string(),
        log_directory: LOG_DIRECTORY.to_string(),
        ip: profile.ip.clone(),
        game_port,
        query_port,
        slot_count,
        game_settings_preset: "Default".to_string(),
        game_settings: GameSettings {
            session_name: profile.server_name.clone(),
            join_password: String::new(),
            max_players: slot_count,
            shutdown_if_not_joined_for: DEFAULT_SHUTDOWN_TIMEOUT,
            shutdown_if_empty_for: DEFAULT_SHUTDOWN_TIMEOUT,
            allow_non_admins_to_launch_prospects: true,
            allow_non_admins_to_delete_prospects: false,
            load_prospect: String::new(),
            create_prospect: String::new(),
            resume_prospect: true,
            last_prospect_name: world.prospect_file_name(),
        },
        user_groups: vec![
            UserGroup {
                name: "Admin".to_string(),
                password: creds.admin.clone(),
                can_kick_ban: true,
            },
            UserGroup {
                name: "Friend".to_string(),
                password: creds.friend.clone(),
                can_kick_ban: false,
            },
            UserGroup {
                name: "Guest".to_string(),
                password: creds.guest.clone(),
                can_kick_ban: false,
            },
        ],
    })
}

/// Persist the artifact to `<instance_dir>/Icarus_server.json`, overwriting
/// any prior artifact.
///
/// Not safe to run while a server process has the file open; the manager
/// only calls this while stopped.
pub fn write_artifact(
    artifact: &ServerConfigArtifact,
    instance_dir: &Path,
) -> Result<PathBuf, SynthesisError> {
    let path = instance_dir.join(ARTIFACT_FILE_NAME);
    let json = serde_json::to_string_pretty(artifact)
        .expect("artifact serialization is infallible for these types");

    std::fs::write(&path, json).map_err(|source| SynthesisError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Server config written");
    Ok(path)
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, SynthesisError> {
    value
        .trim()
        .parse()
        .map_err(|_| SynthesisError::InvalidProfileField {
            field,
            value: value.to_string(),
        })
}
