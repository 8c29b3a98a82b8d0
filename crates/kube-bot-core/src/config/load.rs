//! Configuration loading from files and environment
//!
//! Every step returns a new `Config` rather than mutating a shared one.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{
    BotConfig, BotLayer, Config, ConfigLayer, LoggingConfig, LoggingLayer, SlackConfig, SlackLayer,
};
use crate::error::{ConfigError, Result};

pub const ENV_SLACK_TOKEN: &str = "KUBE_BOT_SLACK_TOKEN";
pub const ENV_LOG_UNHANDLED_EVENTS: &str = "KUBE_BOT_LOG_UNHANDLED_EVENTS";
pub const ENV_BOT_NAME: &str = "KUBE_BOT_NAME";
pub const ENV_LOG_LEVEL: &str = "KUBE_BOT_LOG_LEVEL";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from defaults, global and project files, then env vars
///
/// # Errors
///
/// Returns error if:
/// - A config file exists but cannot be read or is malformed TOML
/// - An environment variable holds an invalid value
/// - The merged values fail validation
pub fn load_config() -> Result<Config> {
    let config = Config::default();

    let config = match global_config_path() {
        Some(path) if path.is_file() => config.merge(load_toml_file(&path)?),
        _ => config,
    };

    let project_path = project_config_path()?;
    let config = if project_path.exists() {
        config.merge(load_toml_file(&project_path)?)
    } else {
        config
    };

    finish(config)
}

/// Load configuration from one explicit file instead of the global and
/// project files. Environment overrides still apply.
///
/// # Errors
///
/// Same as [`load_config`], plus a missing `path` is an error.
pub fn load_config_from(path: &Path) -> Result<Config> {
    finish(Config::default().merge(load_toml_file(path)?))
}

fn finish(config: Config) -> Result<Config> {
    let config = config.apply_env_vars()?;
    config.validate()?;
    debug!(bot = %config.bot.name, level = %config.logging.level, "configuration loaded");
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
#[must_use]
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "kube-bot")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join("kube-bot.toml"))
        .map_err(|e| {
            ConfigError::Io {
                path: ".".to_string(),
                message: format!("failed to get current directory: {e}"),
            }
            .into()
        })
}

/// Load a TOML file as one config layer
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<ConfigLayer> {
    if path.is_dir() {
        return Err(ConfigError::Io {
            path: path.display().to_string(),
            message: "config path is a directory, not a file".to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| {
        ConfigError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        }
        .into()
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply `KUBE_BOT_*` environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns error if environment variable values are invalid
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source
    ///
    /// # Errors
    ///
    /// Returns error if a present variable is empty or unparseable
    pub fn apply_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = var(ENV_SLACK_TOKEN) {
            self.slack.token = Some(non_empty(ENV_SLACK_TOKEN, value)?);
        }

        if let Some(value) = var(ENV_LOG_UNHANDLED_EVENTS) {
            self.slack.log_unhandled_events =
                value.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: ENV_LOG_UNHANDLED_EVENTS.to_string(),
                    message: format!("{e}"),
                })?;
        }

        if let Some(value) = var(ENV_BOT_NAME) {
            self.bot.name = non_empty(ENV_BOT_NAME, value)?;
        }

        if let Some(value) = var(ENV_LOG_LEVEL) {
            self.logging.level = non_empty(ENV_LOG_LEVEL, value)?;
        }

        Ok(self)
    }
}

fn non_empty(name: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(ConfigError::Invalid {
            key: name.to_string(),
            message: "cannot be empty - unset the variable or provide a value".to_string(),
        }
        .into());
    }
    Ok(value)
}

// ═══════════════════════════════════════════════════════════════════════════
// MERGE
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply one file layer on top of this config. Every setting the layer
    /// names wins, even when it spells out the default value; settings it
    /// leaves out keep their earlier value.
    #[must_use]
    pub fn merge(self, layer: ConfigLayer) -> Self {
        Self {
            slack: self.slack.merge(layer.slack),
            bot: self.bot.merge(layer.bot),
            logging: self.logging.merge(layer.logging),
        }
    }
}

impl SlackConfig {
    fn merge(self, layer: SlackLayer) -> Self {
        Self {
            token: layer.token.or(self.token),
            log_unhandled_events: layer
                .log_unhandled_events
                .unwrap_or(self.log_unhandled_events),
        }
    }
}

impl BotConfig {
    fn merge(self, layer: BotLayer) -> Self {
        Self {
            name: layer.name.unwrap_or(self.name),
        }
    }
}

impl LoggingConfig {
    fn merge(self, layer: LoggingLayer) -> Self {
        Self {
            level: layer.level.unwrap_or(self.level),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Check that merged values are usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if:
    /// - `bot.name` is empty or contains whitespace
    /// - `logging.level` is not a known level
    pub fn validate(&self) -> Result<()> {
        if self.bot.name.is_empty() || self.bot.name.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                key: "bot.name".to_string(),
                message: format!(
                    "'{}' must be non-empty and contain no whitespace",
                    self.bot.name
                ),
            }
            .into());
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                key: "logging.level".to_string(),
                message: format!(
                    "'{}' is not one of {}",
                    self.logging.level,
                    LOG_LEVELS.join("|")
                ),
            }
            .into());
        }

        Ok(())
    }
}
