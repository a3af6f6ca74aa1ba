//! Dashboard configuration (`goalsync.toml`).
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock demo dashboard.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::events::EventKind;

/// Card gradients new goals pick from.
pub const DEFAULT_PALETTE: [&str; 5] = [
    "from-purple-500 to-indigo-600",
    "from-emerald-500 to-teal-600",
    "from-rose-500 to-pink-600",
    "from-amber-500 to-orange-600",
    "from-blue-500 to-cyan-600",
];

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSyncConfig {
    /// Display name used for comments posted from this dashboard.
    #[serde(default = "default_author")]
    pub author: String,

    /// Time label given to freshly posted comments.
    #[serde(default = "default_just_now_label")]
    pub just_now_label: String,

    /// Start from the three demo goals instead of an empty board.
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,

    /// Initial theme.
    #[serde(default)]
    pub dark_mode: bool,

    /// Colors for new goals. An empty list means the default palette.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Optional JSONL activity log receiving store events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_log: Option<PathBuf>,

    /// Event kinds written to the activity log. Empty means all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity_log_events: Vec<EventKind>,
}

impl Default for GoalSyncConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            just_now_label: default_just_now_label(),
            seed_demo: default_seed_demo(),
            dark_mode: false,
            palette: default_palette(),
            activity_log: None,
            activity_log_events: Vec::new(),
        }
    }
}

// Serde default functions
fn default_author() -> String {
    "You".to_string()
}

fn default_just_now_label() -> String {
    "Just now".to_string()
}

fn default_seed_demo() -> bool {
    true
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl GoalSyncConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| GoalError::ConfigError {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise return defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, GoalError> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                tracing::debug!(path = %p.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.palette.retain(|c| !c.trim().is_empty());
        if config.palette.is_empty() {
            config.palette = default_palette();
        }
        Ok(config)
    }
}
