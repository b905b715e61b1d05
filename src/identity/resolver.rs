//! Operator identity resolution.
//!
//! # Responsibilities
//! - Verify the platform client is running on this host
//! - Locate the client installation
//! - Extract the active account identifier from the login record
//!
//! # Design Decisions
//! - Read-only: resolution never mutates host state and never blocks longer
//!   than a local file read
//! - Resolved fresh per provisioning call, never cached across restarts
//! - Installation lookup is env override first, then well-known candidate
//!   directories per platform

use crate::identity::login_record::parse_login_record;
use std::path::{Path, PathBuf};
use sysinfo::{ProcessesToUpdate, System};
use thiserror::Error;

/// Environment variable overriding the platform client installation root.
pub const STEAM_ROOT_ENV: &str = "STEAM_ROOT";

const CLIENT_PROCESS_NAME: &str = "steam";

/// The resolved platform account identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorIdentity(pub String);

impl std::fmt::Display for OperatorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from identity resolution. All are precondition failures: no retry,
/// no side effects.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("platform client is not running; start Steam and try again")]
    PlatformClientNotRunning,

    #[error("could not locate a Steam installation")]
    PlatformNotInstalled,

    #[error("login record not found at {0}")]
    LoginRecordMissing(PathBuf),

    #[error("failed to read login record at {path}: {source}")]
    LoginRecordUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no active account found in the login record")]
    NoActiveAccount,
}

/// Resolves the local operator's platform identity.
pub struct IdentityResolver {
    /// Explicit installation root; skips the candidate search when set.
    steam_root: Option<PathBuf>,
}

impl IdentityResolver {
    pub fn new(steam_root: Option<PathBuf>) -> Self {
        Self { steam_root }
    }

    /// Resolve the active account identifier.
    pub fn resolve(&self) -> Result<OperatorIdentity, IdentityError> {
        if !client_process_running() {
            return Err(IdentityError::PlatformClientNotRunning);
        }

        let root = self
            .installation_root()
            .ok_or(IdentityError::PlatformNotInstalled)?;

        let login_path = root.join("config").join("loginusers.vdf");
        if !login_path.exists() {
            return Err(IdentityError::LoginRecordMissing(login_path));
        }

        let contents = std::fs::read_to_string(&login_path).map_err(|source| {
            IdentityError::LoginRecordUnreadable {
                path: login_path.clone(),
                source,
            }
        })?;

        let record = parse_login_record(&contents).ok_or(IdentityError::NoActiveAccount)?;

        tracing::debug!(
            steam_root = %root.display(),
            identity = %record.steam_id,
            "Resolved operator identity"
        );

        Ok(OperatorIdentity(record.steam_id))
    }

    fn installation_root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.steam_root {
            return existing(root);
        }

        if let Ok(root) = std::env::var(STEAM_ROOT_ENV) {
            if let Some(path) = existing(Path::new(&root)) {
                return Some(path);
            }
        }

        for candidate in candidate_roots() {
            if let Some(path) = existing(&candidate) {
                return Some(path);
            }
        }

        None
    }
}

fn existing(path: &Path) -> Option<PathBuf> {
    path.is_dir().then(|| path.to_path_buf())
}

fn client_process_running() -> bool {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    let running = system
        .processes_by_name(CLIENT_PROCESS_NAME.as_ref())
        .next()
        .is_some();
    running
}

#[cfg(windows)]
fn candidate_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from(r"C:\Program Files (x86)\Steam"),
        PathBuf::from(r"C:\Program Files\Steam"),
    ]
}

#[cfg(not(windows))]
fn candidate_roots() -> Vec<PathBuf> {
    let home = std::env::var("HOME").unwrap_or_default();
    vec![
        PathBuf::from(format!("{}/.steam/steam", home)),
        PathBuf::from(format!("{}/.local/share/Steam", home)),
        PathBuf::from(format!("{}/Library/Application Support/Steam", home)),
    ]
}
