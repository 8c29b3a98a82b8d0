//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub slack: SlackConfig,
    pub bot: BotConfig,
    pub logging: LoggingConfig,
}

/// Chat transport settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlackConfig {
    /// API token; never printed in full
    pub token: Option<String>,
    /// Log transport events the bot does not handle
    pub log_unhandled_events: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Name users address the bot by, e.g. `@kube-bot get pods/api`
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` level when `RUST_LOG` is not set
    pub level: String,
}

pub(super) const DEFAULT_BOT_NAME: &str = "kube-bot";
pub(super) const DEFAULT_LOG_LEVEL: &str = "info";

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// One config file as written: only the settings it names are `Some`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigLayer {
    pub slack: SlackLayer,
    pub bot: BotLayer,
    pub logging: LoggingLayer,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlackLayer {
    pub token: Option<String>,
    pub log_unhandled_events: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotLayer {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingLayer {
    pub level: Option<String>,
}
