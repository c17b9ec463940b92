//! Path resolution for configuration and local data.
//!
//! Uses env vars when set, otherwise XDG defaults.

use std::path::{Path, PathBuf};

/// Resolved locations of the config file and the data directory.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve paths from environment, falling back to XDG/defaults.
    pub fn resolve() -> Self {
        let config_file = resolve_path(
            "AGENTDIR_CONFIG_PATH",
            dirs::config_dir().map(|p| p.join("agentdir/config.json")),
            "~/.config/agentdir/config.json",
        );
        let data_dir = resolve_path(
            "AGENTDIR_DATA_DIR",
            dirs::data_local_dir().map(|p| p.join("agentdir")),
            "~/.local/share/agentdir/",
        );

        Self {
            config_file,
            data_dir,
        }
    }

    /// Paths rooted in one directory, for tests and portable setups.
    pub fn under(root: &Path) -> Self {
        Self {
            config_file: root.join("config.json"),
            data_dir: root.join("data"),
        }
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// One JSON document per signed-in uid.
    pub fn profiles_dir(&self) -> PathBuf {
        self.data_dir.join("profiles")
    }

    pub fn submissions_dir(&self) -> PathBuf {
        self.data_dir.join("submissions")
    }

    /// Identity of the locally signed-in user.
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}

fn resolve_path(env_var: &str, xdg_default: Option<PathBuf>, fallback: &str) -> PathBuf {
    if let Ok(val) = std::env::var(env_var) {
        let trimmed = val.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    xdg_default.unwrap_or_else(|| expand_tilde(fallback))
}

fn expand_tilde(path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}
