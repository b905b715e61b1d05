//! Start/stop lifecycle of the managed server process.
//!
//! # Responsibilities
//! - Spawn the server binary with derived arguments and captured I/O
//! - Bounded graceful shutdown with forced-kill escalation
//! - Install/update/version queries via the delegated updater
//!
//! # Design Decisions
//! - One controller instance owns at most one child process
//! - Operations are invoked serially by the owning framework; no internal
//!   locking
//! - A stop that outlives the grace window is an outcome, not an error

use crate::config::schema::{ConsoleConfig, ControllerConfig};
use crate::lifecycle::console::{spawn_readers, ConsoleLine};
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::lifecycle::state::InstanceState;
use crate::updater::{Updater, UpdaterError, APP_ID};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{file} not found ({path})")]
    ExecutableNotFound { file: String, path: PathBuf },

    #[error("Invalid Path! Fail to find {file}")]
    ImportInvalid { file: String },

    #[error("failed to start server process: {0}")]
    SpawnFailed(std::io::Error),

    #[error("a server process is already running")]
    AlreadyRunning,

    #[error("no server process is running")]
    NotRunning,

    #[error(transparent)]
    Updater(#[from] UpdaterError),
}

/// How a stop concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The process exited voluntarily within the grace window.
    Graceful,
    /// The grace window elapsed and the process was force-killed.
    Forced,
    /// The grace window elapsed and escalation is disabled; the process may
    /// still be running.
    TimedOut,
}

/// The live child process and its attached console readers.
///
/// Owned exclusively by the manager from start to stop/exit.
pub struct ProcessHandle {
    child: Child,
    reader_shutdown: ShutdownSignal,
    readers: Vec<JoinHandle<()>>,
}

impl ProcessHandle {
    /// OS process id, if the process has not already been reaped.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }
}

/// Provisioning & lifecycle controller for one server instance.
pub struct LifecycleManager<U> {
    config: ControllerConfig,
    updater: U,
    state: InstanceState,
    handle: Option<ProcessHandle>,
    console_tx: Option<mpsc::Sender<ConsoleLine>>,
}

impl<U: Updater> LifecycleManager<U> {
    /// `console_tx` is the framework-owned console sink; when `None` (or
    /// when embedded console mode is off) the child's streams are discarded.
    pub fn new(
        config: ControllerConfig,
        updater: U,
        console_tx: Option<mpsc::Sender<ConsoleLine>>,
    ) -> Self {
        let state = if executable_path(&config).exists() {
            InstanceState::Installed
        } else {
            InstanceState::NotInstalled
        };

        Self {
            config,
            updater,
            state,
            handle: None,
            console_tx,
        }
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Process id of the running child, if any.
    pub fn pid(&self) -> Option<u32> {
        self.handle.as_ref().and_then(ProcessHandle::pid)
    }

    /// Delegated install. Surfaces the updater's error text verbatim.
    pub async fn install(&mut self) -> Result<(), LifecycleError> {
        let previous = self.state;
        self.transition(InstanceState::Installing);

        let result = self
            .updater
            .install(
                &self.config.profile.instance_id,
                "",
                APP_ID,
                true,
                self.config.updater.anonymous_login,
            )
            .await;

        match result {
            Ok(()) => {
                self.transition(InstanceState::Installed);
                Ok(())
            }
            Err(e) => {
                self.transition(previous);
                Err(e.into())
            }
        }
    }

    /// Delegated update; blocks until the updater process exits. The
    /// lifecycle state is unchanged once the transient window closes.
    pub async fn update(
        &mut self,
        validate: bool,
        custom: Option<&str>,
    ) -> Result<(), LifecycleError> {
        let previous = self.state;
        self.transition(InstanceState::Updating);

        let result = self
            .updater
            .update(
                &self.config.profile.instance_id,
                APP_ID,
                validate,
                custom,
                self.config.updater.anonymous_login,
            )
            .await;

        self.transition(previous);
        result.map_err(Into::into)
    }

    /// Spawn the server process.
    ///
    /// Fails without spawning when the executable is missing. In embedded
    /// console mode the child's output is captured and forwarded to the
    /// console sink.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        if self.handle.is_some() {
            return Err(LifecycleError::AlreadyRunning);
        }

        let exe = executable_path(&self.config);
        if !exe.exists() {
            return Err(LifecycleError::ExecutableNotFound {
                file: file_name(&self.config.paths.start_path),
                path: exe,
            });
        }

        let args = build_args(&self.config);
        let console_tx = self
            .console_tx
            .clone()
            .filter(|_| self.config.console.embedded);
        let embedded = console_tx.is_some();

        let mut cmd = Command::new(&exe);
        cmd.args(&args)
            .current_dir(&self.config.profile.install_dir)
            .stdin(Stdio::null());

        if embedded {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        #[cfg(windows)]
        {
            // CREATE_NO_WINDOW: the server runs hidden, not in its own console
            cmd.creation_flags(0x0800_0000);
        }

        let mut child = cmd.spawn().map_err(LifecycleError::SpawnFailed)?;

        let reader_shutdown = ShutdownSignal::new();
        let readers = match console_tx {
            Some(tx) => spawn_readers(&mut child, tx, &reader_shutdown),
            None => Vec::new(),
        };

        tracing::info!(
            pid = child.id(),
            exe = %exe.display(),
            args = %args.join(" "),
            embedded,
            "Server process started"
        );

        self.handle = Some(ProcessHandle {
            child,
            reader_shutdown,
            readers,
        });
        self.transition(InstanceState::Running);
        Ok(())
    }

    /// Graceful stop with a bounded wait.
    ///
    /// Sends an interrupt, waits up to the configured grace window, then
    /// force-kills if escalation is enabled. Always transitions to stopped;
    /// a timeout is reported in the outcome, never as an error.
    pub async fn stop(&mut self) -> Result<StopOutcome, LifecycleError> {
        let mut handle = self.handle.take().ok_or(LifecycleError::NotRunning)?;

        let grace = Duration::from_millis(self.config.stop.grace_timeout_ms);
        send_interrupt(&handle.child);

        let outcome = match tokio::time::timeout(grace, handle.child.wait()).await {
            Ok(Ok(status)) => {
                tracing::info!(%status, "Server process exited");
                StopOutcome::Graceful
            }
            Ok(Err(e)) => {
                // The child is unreachable; treat as exited
                tracing::warn!(error = %e, "Wait on server process failed");
                StopOutcome::Graceful
            }
            Err(_) if self.config.stop.force_kill => {
                tracing::warn!(
                    grace_ms = self.config.stop.grace_timeout_ms,
                    "Grace window elapsed; killing server process"
                );
                if let Err(e) = handle.child.kill().await {
                    tracing::warn!(error = %e, "Forced kill failed");
                }
                StopOutcome::Forced
            }
            Err(_) => {
                tracing::warn!(
                    grace_ms = self.config.stop.grace_timeout_ms,
                    "Grace window elapsed; leaving process to exit on its own"
                );
                StopOutcome::TimedOut
            }
        };

        // Readers end on stream EOF; the signal covers externally killed
        // children whose streams we never observe closing.
        handle.reader_shutdown.trigger();
        for reader in handle.readers {
            let _ = reader.await;
        }

        self.transition(InstanceState::Installed);
        Ok(outcome)
    }

    /// Existence check of the server executable at the expected path.
    pub fn is_install_valid(&self) -> bool {
        executable_path(&self.config).exists()
    }

    /// Existence check under a caller-supplied alternate install root.
    pub fn is_import_valid(&self, path: &Path) -> Result<(), LifecycleError> {
        let import = path.join(&self.config.paths.start_path);
        if import.exists() {
            Ok(())
        } else {
            Err(LifecycleError::ImportInvalid {
                file: file_name(&self.config.paths.start_path),
            })
        }
    }

    /// Installed build identifier, via the updater.
    pub async fn local_build(&self) -> Result<String, LifecycleError> {
        self.updater
            .local_build(&self.config.profile.instance_id, APP_ID)
            .await
            .map_err(Into::into)
    }

    /// Latest published build identifier, via the updater.
    pub async fn remote_build(&self) -> Result<String, LifecycleError> {
        self.updater.remote_build(APP_ID).await.map_err(Into::into)
    }

    fn transition(&mut self, next: InstanceState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "Lifecycle transition");
            self.state = next;
        }
    }
}

/// Absolute path of the server executable.
fn executable_path(config: &ControllerConfig) -> PathBuf {
    config
        .profile
        .install_dir
        .join(&config.paths.start_path)
}

/// Positional+flag argument list derived from the profile. Operator-supplied
/// free-form parameters come first, verbatim.
fn build_args(config: &ControllerConfig) -> Vec<String> {
    let profile = &config.profile;
    let mut args: Vec<String> = profile
        .server_params
        .split_whitespace()
        .map(str::to_string)
        .collect();

    args.push(format!("-ip={}", profile.ip));
    args.push(format!("-gamePort={}", profile.game_port));
    args.push(format!("-queryPort={}", profile.query_port));
    args.push(format!("-slotCount={}", profile.max_players));
    // One argv entry; the display name needs no shell quoting here
    args.push(format!("-name=\"{}\"", profile.server_name));
    args
}

fn file_name(start_path: &str) -> String {
    Path::new(start_path)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| start_path.to_string())
}

#[cfg(unix)]
fn send_interrupt(child: &Child) {
    if let Some(pid) = child.id() {
        // SIGINT mirrors the ^c the server expects for a clean save+exit
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGINT);
        }
    }
}

#[cfg(not(unix))]
fn send_interrupt(child: &Child) {
    // No interrupt delivery to a hidden-window process here; the grace wait
    // plus forced-kill escalation still bounds the stop
    let _ = child.id();
}

/// Create the bounded line channel between the readers and the console sink.
pub fn console_channel(
    config: &ConsoleConfig,
) -> (mpsc::Sender<ConsoleLine>, mpsc::Receiver<ConsoleLine>) {
    mpsc::channel(config.buffer_lines.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ControllerConfig;

    #[test]
    fn test_build_args_order_and_shape() {
        let mut config = ControllerConfig::default();
        config.profile.server_params = "-log -UserDir=./data".to_string();
        config.profile.ip = "10.0.0.5".to_string();
        config.profile.game_port = "27015".to_string();
        config.profile.query_port = "27016".to_string();
        config.profile.max_players = "10".to_string();
        config.profile.server_name = "My Outpost".to_string();

        let args = build_args(&config);
        assert_eq!(
            args,
            vec![
                "-log",
                "-UserDir=./data",
                "-ip=10.0.0.5",
                "-gamePort=27015",
                "-queryPort=27016",
                "-slotCount=10",
                "-name=\"My Outpost\"",
            ]
        );
    }

    #[test]
    fn test_executable_path_is_install_relative() {
        let mut config = ControllerConfig::default();
        config.profile.install_dir = PathBuf::from("/srv/icarus");
        assert_eq!(
            executable_path(&config),
            PathBuf::from("/srv/icarus/IcarusServer.exe")
        );
    }

    #[test]
    fn test_file_name_strips_directories() {
        assert_eq!(file_name("Win64/IcarusServer.exe"), "IcarusServer.exe");
        assert_eq!(file_name("IcarusServer.exe"), "IcarusServer.exe");
    }
}
