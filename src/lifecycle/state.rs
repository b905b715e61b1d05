//! Instance lifecycle states.

/// State machine over one managed server instance.
///
/// ```text
/// NotInstalled → Installing → Installed ⇄ Running
///                              ⇅
///                           Updating
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    NotInstalled,
    /// Transient while the delegated install runs.
    Installing,
    /// Installed and stopped.
    Installed,
    /// Transient while the delegated update runs.
    Updating,
    Running,
}

impl InstanceState {
    pub fn is_running(&self) -> bool {
        matches!(self, InstanceState::Running)
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, InstanceState::Installing | InstanceState::Updating)
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InstanceState::NotInstalled => "not installed",
            InstanceState::Installing => "installing",
            InstanceState::Installed => "installed",
            InstanceState::Updating => "updating",
            InstanceState::Running => "running",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_states() {
        assert!(InstanceState::Installing.is_transient());
        assert!(InstanceState::Updating.is_transient());
        assert!(!InstanceState::Running.is_transient());
        assert!(InstanceState::Running.is_running());
    }
}
