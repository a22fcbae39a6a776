use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/cmdplus.toml";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Console settings read from `config/cmdplus.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// World snapshot loaded at startup. The built-in demo world when unset.
    pub world: Option<PathBuf>,
    /// Print each command before its feedback.
    pub echo: bool,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub operator: OperatorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub name: String,
    /// Origin for relative coordinates and `@p`.
    pub position: [f64; 3],
    /// Run commands as this player (`@s` resolves to them).
    pub as_player: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            world: None,
            echo: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            operator: OperatorConfig::default(),
        }
    }
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            name: "Server".to_string(),
            position: [0.0, 64.0, 0.0],
            as_player: None,
        }
    }
}

impl ConsoleConfig {
    /// Read and parse `path`, reporting any failure.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConsoleConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ConsoleConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Console config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ConsoleConfig::default()
            }
        }
    }

    /// Log filter to install before the config itself is loaded.
    ///
    /// Errors are swallowed here; `load_from_path` reports them once logging is up.
    pub fn peek_log_filter(path: &Path) -> String {
        Self::read(path)
            .map(|cfg| cfg.log_filter)
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    }
}
