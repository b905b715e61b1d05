//! steamcmd-backed updater.
//!
//! # Responsibilities
//! - Drive the steamcmd binary for install/update/version queries
//! - Map a non-zero exit into the process's own output, verbatim
//!
//! # Design Decisions
//! - No timeout on updater waits; the external engine owns its own pacing
//! - Local build comes from the app manifest on disk, not from steamcmd,
//!   because the manifest read is cheap and offline

use crate::updater::{Updater, UpdaterError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Updater implementation spawning the steamcmd binary.
pub struct SteamCmd {
    steamcmd_path: PathBuf,
    /// Install root the product is placed under.
    install_dir: PathBuf,
}

impl SteamCmd {
    pub fn new(steamcmd_path: PathBuf, install_dir: PathBuf) -> Self {
        Self {
            steamcmd_path,
            install_dir,
        }
    }

    async fn run_app_update(
        &self,
        product_id: &str,
        validate: bool,
        custom: Option<&str>,
        anonymous: bool,
        extra_args: &str,
    ) -> Result<(), UpdaterError> {
        let mut cmd = Command::new(&self.steamcmd_path);
        cmd.arg(format!("+force_install_dir {}", self.install_dir.display()));

        if anonymous {
            cmd.arg("+login anonymous");
        }

        let mut app_update = format!("+app_update {}", product_id);
        if let Some(custom) = custom {
            app_update.push(' ');
            app_update.push_str(custom);
        }
        if validate {
            app_update.push_str(" validate");
        }
        cmd.arg(app_update);

        for arg in extra_args.split_whitespace() {
            cmd.arg(arg);
        }

        cmd.arg("+quit");

        let output = cmd.output().await.map_err(UpdaterError::Spawn)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(UpdaterError::Failed(updater_text(&output)))
        }
    }
}

#[async_trait]
impl Updater for SteamCmd {
    async fn install(
        &self,
        instance_id: &str,
        extra_args: &str,
        product_id: &str,
        create_dir: bool,
        anonymous: bool,
    ) -> Result<(), UpdaterError> {
        if create_dir {
            std::fs::create_dir_all(&self.install_dir).map_err(UpdaterError::Spawn)?;
        }

        tracing::info!(instance_id, product_id, "Installing via steamcmd");
        self.run_app_update(product_id, true, None, anonymous, extra_args)
            .await
    }

    async fn update(
        &self,
        instance_id: &str,
        product_id: &str,
        validate: bool,
        custom: Option<&str>,
        anonymous: bool,
    ) -> Result<(), UpdaterError> {
        tracing::info!(instance_id, product_id, validate, "Updating via steamcmd");
        self.run_app_update(product_id, validate, custom, anonymous, "")
            .await
    }

    async fn local_build(
        &self,
        _instance_id: &str,
        product_id: &str,
    ) -> Result<String, UpdaterError> {
        let manifest = self
            .install_dir
            .join("steamapps")
            .join(format!("appmanifest_{}.acf", product_id));

        let contents = std::fs::read_to_string(&manifest).map_err(|e| {
            UpdaterError::BuildUnavailable(format!("{}: {}", manifest.display(), e))
        })?;

        scan_quoted_value(&contents, "buildid").ok_or_else(|| {
            UpdaterError::BuildUnavailable(format!("no buildid in {}", manifest.display()))
        })
    }

    async fn remote_build(&self, product_id: &str) -> Result<String, UpdaterError> {
        let output = Command::new(&self.steamcmd_path)
            .arg("+login anonymous")
            .arg(format!("+app_info_print {}", product_id))
            .arg("+quit")
            .output()
            .await
            .map_err(UpdaterError::Spawn)?;

        if !output.status.success() {
            return Err(UpdaterError::Failed(updater_text(&output)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        scan_quoted_value(&stdout, "buildid")
            .ok_or_else(|| UpdaterError::BuildUnavailable("no buildid in app info".to_string()))
    }
}

/// Prefer stderr, fall back to stdout, so the caller sees whatever the
/// updater actually said.
fn updater_text(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    text.trim().to_string()
}

/// Scan steamcmd's quoted key/value output for the first value under `key`.
fn scan_quoted_value(contents: &str, key: &str) -> Option<String> {
    for line in contents.lines() {
        let mut fields = line.split('"').skip(1).step_by(2);
        match fields.next() {
            Some(k) if k.eq_ignore_ascii_case(key) => {
                if let Some(value) = fields.next() {
                    let value = value.trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
            _ => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updater::APP_ID;

    const MANIFEST: &str = r#"
"AppState"
{
	"appid"		"2089300"
	"name"		"Icarus Dedicated Server"
	"buildid"	"12345678"
}
"#;

    #[test]
    fn test_scan_finds_buildid() {
        assert_eq!(scan_quoted_value(MANIFEST, "buildid").unwrap(), "12345678");
    }

    #[test]
    fn test_scan_missing_key() {
        assert!(scan_quoted_value("\"appid\"\t\"2089300\"", "buildid").is_none());
    }

    #[tokio::test]
    async fn test_local_build_reads_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let steamapps = dir.path().join("steamapps");
        std::fs::create_dir_all(&steamapps).unwrap();
        std::fs::write(
            steamapps.join(format!("appmanifest_{}.acf", APP_ID)),
            MANIFEST,
        )
        .unwrap();

        let updater = SteamCmd::new(PathBuf::from("steamcmd"), dir.path().to_path_buf());
        let build = updater.local_build("1", APP_ID).await.unwrap();
        assert_eq!(build, "12345678");
    }

    #[tokio::test]
    async fn test_local_build_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let updater = SteamCmd::new(PathBuf::from("steamcmd"), dir.path().to_path_buf());
        let err = updater.local_build("1", APP_ID).await.unwrap_err();
        assert!(matches!(err, UpdaterError::BuildUnavailable(_)));
    }
}
