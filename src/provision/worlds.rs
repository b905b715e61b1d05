//! The enumerated world set and its descriptor sources.
//!
//! # Design Decisions
//! - The map→URL table is static configuration: one immutable table, no
//!   runtime registration
//! - Unknown selections are a hard error, never a silent default

use std::str::FromStr;

/// One of the fixed set of named maps the server can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorldSelection {
    Prometheus,
    Styx,
    Olympus,
}

/// Rejected world name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWorld(pub String);

impl std::fmt::Display for UnknownWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown world selection: {}", self.0)
    }
}

impl std::error::Error for UnknownWorld {}

impl WorldSelection {
    pub const ALL: [WorldSelection; 3] = [
        WorldSelection::Prometheus,
        WorldSelection::Styx,
        WorldSelection::Olympus,
    ];

    /// Canonical map name.
    pub fn name(&self) -> &'static str {
        match self {
            WorldSelection::Prometheus => "Prometheus",
            WorldSelection::Styx => "Styx",
            WorldSelection::Olympus => "Olympus",
        }
    }

    /// Fixed remote descriptor URL for this map.
    pub fn descriptor_url(&self) -> &'static str {
        match self {
            WorldSelection::Prometheus => {
                "https://raw.githubusercontent.com/ImPanick/WindowsGSM.Icarus/refs/heads/main/IcarusWorlds/Prometheus/Prometheus.json"
            }
            WorldSelection::Styx => {
                "https://raw.githubusercontent.com/ImPanick/WindowsGSM.Icarus/refs/heads/main/IcarusWorlds/Styx/Styx.json"
            }
            WorldSelection::Olympus => {
                "https://raw.githubusercontent.com/ImPanick/WindowsGSM.Icarus/refs/heads/main/IcarusWorlds/Olympus/Olympus.json"
            }
        }
    }

    /// Local file-name convention for the placed descriptor.
    pub fn prospect_file_name(&self) -> String {
        format!("{}_prospect.json", self.name().to_lowercase())
    }
}

impl std::fmt::Display for WorldSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorldSelection {
    type Err = UnknownWorld;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prometheus" => Ok(WorldSelection::Prometheus),
            "styx" => Ok(WorldSelection::Styx),
            "olympus" => Ok(WorldSelection::Olympus),
            _ => Err(UnknownWorld(s.to_string())),
        }
    }
}
