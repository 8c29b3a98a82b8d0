//! Configuration loading and lookup
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/kube-bot/config.toml`
//! 3. Project config: `./kube-bot.toml`
//! 4. Environment variables: `KUBE_BOT_*`
//!
//! An explicit file passed with `--config` replaces steps 2 and 3.
//!
//! A file is read as a [`ConfigLayer`]: any key it sets wins over earlier
//! layers, even when the value equals the built-in default.
//!
//! # Example Config
//!
//! ```toml
//! [slack]
//! token = "xoxb-..."
//! log_unhandled_events = true
//!
//! [bot]
//! name = "kube-bot"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! # Module Structure
//!
//! - `types`: configuration structures and their defaults
//! - `load`: loading from files and environment, merging, validation
//! - `lookup`: dotted-key lookup with substring fallback

mod load;
mod lookup;
mod types;

#[cfg(test)]
mod tests_loading;

pub use load::{
    global_config_path, load_config, load_config_from, load_toml_file, project_config_path,
    ENV_BOT_NAME, ENV_LOG_LEVEL, ENV_LOG_UNHANDLED_EVENTS, ENV_SLACK_TOKEN,
};
pub use lookup::KeyLookup;
pub use types::{
    BotConfig, BotLayer, Config, ConfigLayer, LoggingConfig, LoggingLayer, SlackConfig, SlackLayer,
};
