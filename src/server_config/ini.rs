//! INI companion files naming the selected map.
//!
//! The server binary reads these from `Saved/Config/<platform>/` under the
//! install root; the controller rewrites both on every synthesis.

use crate::provision::WorldSelection;
use crate::server_config::synthesizer::SynthesisError;
use std::path::{Path, PathBuf};

const GAME_USER_SETTINGS: &str = "GameUserSettings.ini";
const SERVER_SETTINGS: &str = "ServerSettings.ini";

/// Write both INI companions under
/// `<install_root>/Saved/Config/<platform_dir>/`, creating the directory if
/// needed. Returns the config directory.
pub fn write_ini_companions(
    install_root: &Path,
    platform_dir: &str,
    world: WorldSelection,
) -> Result<PathBuf, SynthesisError> {
    let config_dir = install_root.join("Saved").join("Config").join(platform_dir);
    std::fs::create_dir_all(&config_dir).map_err(|source| SynthesisError::WriteFailed {
        path: config_dir.clone(),
        source,
    })?;

    let game_user_settings = format!(
        "[/Script/Icarus.GameUserSettings]\nMapName={}\n",
        world.name()
    );
    write_file(&config_dir.join(GAME_USER_SETTINGS), &game_user_settings)?;

    let server_settings = format!(
        "[/Script/Icarus.ServerSettings]\nDefaultMap={}\n",
        world.name()
    );
    write_file(&config_dir.join(SERVER_SETTINGS), &server_settings)?;

    tracing::debug!(dir = %config_dir.display(), map = %world, "INI companions written");
    Ok(config_dir)
}

fn write_file(path: &Path, content: &str) -> Result<(), SynthesisError> {
    std::fs::write(path, content).map_err(|source| SynthesisError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_companions_name_the_map() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir =
            write_ini_companions(dir.path(), "WindowsServer", WorldSelection::Styx).unwrap();

        let gus = std::fs::read_to_string(config_dir.join(GAME_USER_SETTINGS)).unwrap();
        assert!(gus.contains("[/Script/Icarus.GameUserSettings]"));
        assert!(gus.contains("MapName=Styx"));

        let ss = std::fs::read_to_string(config_dir.join(SERVER_SETTINGS)).unwrap();
        assert!(ss.contains("[/Script/Icarus.ServerSettings]"));
        assert!(ss.contains("DefaultMap=Styx"));
    }

    #[test]
    fn test_rewrites_replace_prior_map() {
        let dir = tempfile::tempdir().unwrap();
        write_ini_companions(dir.path(), "LinuxServer", WorldSelection::Olympus).unwrap();
        let config_dir =
            write_ini_companions(dir.path(), "LinuxServer", WorldSelection::Prometheus).unwrap();

        let gus = std::fs::read_to_string(config_dir.join(GAME_USER_SETTINGS)).unwrap();
        assert!(gus.contains("MapName=Prometheus"));
        assert!(!gus.contains("Olympus"));
    }
}
