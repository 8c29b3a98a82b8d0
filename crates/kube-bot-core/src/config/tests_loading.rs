//! Loading-focused tests for configuration
//!
//! File parsing, merging, validation and environment overrides. Overrides go
//! through `apply_overrides` with a map, so nothing here touches the process
//! environment.

use std::collections::HashMap;

use crate::config::{
    global_config_path, load_config_from, load_toml_file, project_config_path, BotLayer, Config,
    ConfigLayer, ENV_BOT_NAME, ENV_LOG_LEVEL, ENV_LOG_UNHANDLED_EVENTS, ENV_SLACK_TOKEN,
};
use crate::error::{ConfigError, Error, Result};

fn io(e: std::io::Error) -> Error {
    ConfigError::Io {
        path: "<test>".to_string(),
        message: e.to_string(),
    }
    .into()
}

fn write_config(dir: &tempfile::TempDir, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join("kube-bot.toml");
    std::fs::write(&path, content).map_err(io)?;
    Ok(path)
}

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();
    assert_eq!(config.bot.name, "kube-bot");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.slack.token, None);
    assert!(!config.slack.log_unhandled_events);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_other_defaults() -> Result<()> {
    let dir = tempfile::tempdir().map_err(io)?;
    let path = write_config(&dir, "[slack]\ntoken = \"xoxb-1\"\n")?;

    let layer = load_toml_file(&path)?;
    assert_eq!(layer.slack.token.as_deref(), Some("xoxb-1"));
    assert_eq!(layer.bot.name, None);

    let config = Config::default().merge(layer);
    assert_eq!(config.bot.name, "kube-bot");
    assert!(!config.slack.log_unhandled_events);
    Ok(())
}

#[test]
fn test_malformed_toml_returns_parse_error() -> Result<()> {
    let dir = tempfile::tempdir().map_err(io)?;
    let path = write_config(&dir, "[slack\ntoken = ")?;

    let result = load_toml_file(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse { .. }))));
    Ok(())
}

#[test]
fn test_directory_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir().map_err(io)?;
    let result = load_toml_file(dir.path());
    assert!(matches!(result, Err(Error::Config(ConfigError::Io { .. }))));
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir().map_err(io)?;
    let result = load_config_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::Io { .. }))));
    Ok(())
}

#[test]
fn test_merge_later_layer_wins() {
    let global = ConfigLayer {
        bot: BotLayer {
            name: Some("global-bot".to_string()),
        },
        ..ConfigLayer::default()
    };
    let mut project = ConfigLayer::default();
    project.slack.token = Some("project-token".to_string());
    project.logging.level = Some("debug".to_string());

    let merged = Config::default().merge(global).merge(project);
    assert_eq!(merged.bot.name, "global-bot");
    assert_eq!(merged.slack.token.as_deref(), Some("project-token"));
    assert_eq!(merged.logging.level, "debug");
}

#[test]
fn test_merge_empty_layer_keeps_earlier_values() {
    let mut earlier = Config::default();
    earlier.slack.token = Some("kept".to_string());
    earlier.slack.log_unhandled_events = true;
    earlier.bot.name = "ops-bot".to_string();

    let merged = earlier.clone().merge(ConfigLayer::default());
    assert_eq!(merged, earlier);
}

#[test]
fn test_later_file_can_turn_unhandled_event_logging_off() -> Result<()> {
    let global = tempfile::tempdir().map_err(io)?;
    let project = tempfile::tempdir().map_err(io)?;
    let global_path = write_config(&global, "[slack]\nlog_unhandled_events = true\n")?;
    let project_path = write_config(&project, "[slack]\nlog_unhandled_events = false\n")?;

    let config = Config::default()
        .merge(load_toml_file(&global_path)?)
        .merge(load_toml_file(&project_path)?);
    assert!(!config.slack.log_unhandled_events);
    Ok(())
}

#[test]
fn test_later_file_can_restore_default_values() -> Result<()> {
    let global = tempfile::tempdir().map_err(io)?;
    let project = tempfile::tempdir().map_err(io)?;
    let global_path = write_config(
        &global,
        "[bot]\nname = \"global-bot\"\n\n[logging]\nlevel = \"debug\"\n",
    )?;
    let project_path = write_config(
        &project,
        "[bot]\nname = \"kube-bot\"\n\n[logging]\nlevel = \"info\"\n",
    )?;

    let config = Config::default()
        .merge(load_toml_file(&global_path)?)
        .merge(load_toml_file(&project_path)?);
    assert_eq!(config.bot.name, "kube-bot");
    assert_eq!(config.logging.level, "info");
    Ok(())
}

#[test]
fn test_env_overrides_apply() -> Result<()> {
    let config = Config::default().apply_overrides(vars(&[
        (ENV_SLACK_TOKEN, "xoxb-env"),
        (ENV_LOG_UNHANDLED_EVENTS, "true"),
        (ENV_BOT_NAME, "kb"),
        (ENV_LOG_LEVEL, "trace"),
    ]))?;
    assert_eq!(config.slack.token.as_deref(), Some("xoxb-env"));
    assert!(config.slack.log_unhandled_events);
    assert_eq!(config.bot.name, "kb");
    assert_eq!(config.logging.level, "trace");
    Ok(())
}

#[test]
fn test_empty_env_value_is_rejected() {
    let result = Config::default().apply_overrides(vars(&[(ENV_BOT_NAME, "")]));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::Invalid { key, .. })) if key == ENV_BOT_NAME
    ));
}

#[test]
fn test_bad_bool_env_value_is_rejected() {
    let result = Config::default().apply_overrides(vars(&[(ENV_LOG_UNHANDLED_EVENTS, "yes")]));
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_whitespace_name() {
    let mut config = Config::default();
    config.bot.name = "kube bot".to_string();
    assert!(matches!(
        config.validate(),
        Err(Error::Config(ConfigError::Invalid { key, .. })) if key == "bot.name"
    ));
}

#[test]
fn test_validate_rejects_unknown_level() {
    let mut config = Config::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "WARN".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_file_value_fails_load() -> Result<()> {
    let dir = tempfile::tempdir().map_err(io)?;
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n")?;
    assert!(load_config_from(&path).is_err());
    Ok(())
}

#[test]
fn test_config_paths() -> Result<()> {
    let path = project_config_path()?;
    assert!(path.ends_with("kube-bot.toml"));
    if let Some(global) = global_config_path() {
        assert!(global.ends_with("config.toml"));
    }
    Ok(())
}
