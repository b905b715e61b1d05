//! Icarus Dedicated Server Controller (v1)
//!
//! Provisions, configures, and supervises one dedicated Icarus server
//! process on this host.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                   CONTROLLER                      │
//!                    │                                                   │
//!   hostd.toml ──────┼─▶ config ──▶ lifecycle manager ──▶ server process │
//!                    │                │        ▲                         │
//!                    │    first run:  │        │ stdout/stderr lines     │
//!                    │    ┌───────────┘        │                         │
//!                    │    ▼                    ▼                         │
//!                    │  identity ─▶ provision ─▶ server_config           │
//!                    │  (who)       (world)     (Icarus_server.json,     │
//!                    │                           INI companions)         │
//!                    │                                                   │
//!                    │  updater (steamcmd) handles install/update        │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The binary is a thin driver standing in for the owning framework: it
//! wires the subsystems together, runs one provision→synthesize→start
//! cycle, and stops the server on ctrl-c.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use icarus_hostd::config::{load_config, ControllerConfig};
use icarus_hostd::credentials::CredentialGenerator;
use icarus_hostd::identity::IdentityResolver;
use icarus_hostd::lifecycle::manager::console_channel;
use icarus_hostd::lifecycle::{ConsoleStream, LifecycleManager};
use icarus_hostd::provision::{WorldProvisioner, WorldSelection};
use icarus_hostd::server_config::ini::write_ini_companions;
use icarus_hostd::server_config::{synthesize, write_artifact};
use icarus_hostd::updater::SteamCmd;

#[derive(Debug, Parser)]
#[command(name = "icarus-hostd", about = "Icarus dedicated server controller")]
struct Args {
    /// Path to the controller configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icarus_hostd=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("icarus-hostd v0.1.0 starting");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ControllerConfig::default(),
    };

    tracing::info!(
        instance_id = %config.profile.instance_id,
        server_name = %config.profile.server_name,
        install_dir = %config.profile.install_dir.display(),
        world = %config.provisioning.world,
        "Configuration loaded"
    );

    let world: WorldSelection = config.provisioning.world.parse()?;

    // Console sink: forward captured server output into our own log stream
    let (console_tx, mut console_rx) = console_channel(&config.console);
    tokio::spawn(async move {
        while let Some(entry) = console_rx.recv().await {
            match entry.stream {
                ConsoleStream::Stdout => tracing::info!(target: "server", "{}", entry.line),
                ConsoleStream::Stderr => tracing::warn!(target: "server", "{}", entry.line),
            }
        }
    });

    let updater = SteamCmd::new(
        config.updater.steamcmd_path.clone(),
        config.profile.install_dir.clone(),
    );
    let mut manager = LifecycleManager::new(config.clone(), updater, Some(console_tx));

    if !manager.is_install_valid() {
        tracing::info!("Server not installed; delegating to updater");
        manager.install().await?;
    }

    // First-run provisioning: place the world descriptor, then synthesize
    // the runtime configuration against it
    let identity = IdentityResolver::new(config.paths.steam_root.clone()).resolve()?;
    let provisioner = WorldProvisioner::new(
        config.provisioning.clone(),
        config.paths.user_data_root.clone(),
    );
    provisioner.provision(world, &identity).await?;

    let creds = CredentialGenerator::new().generate();
    let artifact = synthesize(&config.profile, &creds, world)?;
    write_artifact(&artifact, &config.profile.install_dir)?;
    write_ini_companions(
        &config.profile.install_dir,
        &config.paths.platform_config_dir,
        world,
    )?;

    manager.start()?;
    tracing::info!(pid = manager.pid(), "Server running; ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    let outcome = manager.stop().await?;
    tracing::info!(?outcome, "Shutdown complete");

    Ok(())
}
