//! Built-in chat commands
//!
//! `load_builtins` must run once, before the registry is shared; a failure
//! there is a programming error in this module and aborts startup.

use tracing::info;

use crate::{
    definition::{ArgumentSpec, CommandDefinition, ListPredicate, TokenValidator, TrailingPolicy},
    error::RegistryError,
    keywords::{AuthorFilter, LogDirection, ResultFilter},
    registry::Registry,
    request::BoundValue,
};

/// Argument names used by the built-in commands
pub mod args {
    pub const QUERY: &str = "query";
    pub const REPLICAS: &str = "replicas";
    pub const DIRECTION: &str = "direction";
    pub const LINES: &str = "lines";
    pub const REPO: &str = "repo";
    pub const CHANNELS: &str = "channels";
    pub const AUTHOR_FILTER: &str = "author_filter";
    pub const RESULT_FILTER: &str = "result_filter";
    pub const BRANCHES: &str = "branches";
    pub const KEY: &str = "key";
    pub const VALUE: &str = "value";
}

/// Subcommands accepted by `rollout`
pub const ROLLOUT_SUBCOMMANDS: [&str; 5] = ["status", "pause", "resume", "history", "undo"];

/// Lines of log output when `logs` is given no count
pub const DEFAULT_LOG_LINES: u64 = 25;

/// Every built-in command definition, in help order
#[must_use]
pub fn builtin_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("get", "Show a resource")
            .with_argument(ArgumentSpec::query(args::QUERY)),
        CommandDefinition::new("describe", "Describe a resource in detail")
            .with_argument(ArgumentSpec::query(args::QUERY)),
        CommandDefinition::new("rollout", "Manage the rollout of a resource")
            .with_subcommands(ROLLOUT_SUBCOMMANDS)
            .with_argument(ArgumentSpec::query(args::QUERY)),
        CommandDefinition::new("scale", "Set the replica count of a resource")
            .with_argument(ArgumentSpec::query(args::QUERY))
            .with_argument(ArgumentSpec::required(
                args::REPLICAS,
                TokenValidator::NonNegativeInteger,
            )),
        CommandDefinition::new("logs", "Show the first or last lines of a resource's logs")
            .with_argument(ArgumentSpec::query(args::QUERY))
            .with_argument(ArgumentSpec::keywords::<LogDirection>(args::DIRECTION))
            .with_argument(ArgumentSpec::validated(
                args::LINES,
                TokenValidator::PositiveInteger,
                BoundValue::Integer(DEFAULT_LOG_LINES),
            )),
        CommandDefinition::new("version", "Show the bot version")
            .with_trailing(TrailingPolicy::Ignore),
        CommandDefinition::new("track", "Report deployments of a repository")
            .with_argument(ArgumentSpec::positional(args::REPO))
            .with_argument(ArgumentSpec::list(
                args::CHANNELS,
                ListPredicate::Prefixed("#".to_string()),
            ))
            .with_argument(ArgumentSpec::keywords::<AuthorFilter>(args::AUTHOR_FILTER))
            .with_argument(ArgumentSpec::keywords::<ResultFilter>(args::RESULT_FILTER))
            .with_argument(ArgumentSpec::list(args::BRANCHES, ListPredicate::Bareword)),
        CommandDefinition::new("config", "Show a configuration value")
            .with_argument(ArgumentSpec::optional(args::KEY))
            .with_argument(ArgumentSpec::optional(args::VALUE)),
        CommandDefinition::new("help", "List the commands the bot understands")
            .with_trailing(TrailingPolicy::Ignore),
    ]
}

/// Build a registry holding every built-in command
///
/// # Errors
///
/// Returns a [`RegistryError`] if two built-ins collide. Callers treat this as
/// fatal.
pub fn load_builtins() -> Result<Registry, RegistryError> {
    let registry = builtin_definitions().into_iter().try_fold(
        Registry::new(),
        |mut registry, definition| {
            registry.register(definition)?;
            Ok::<_, RegistryError>(registry)
        },
    )?;
    info!(commands = registry.len(), "loaded built-in commands");
    Ok(registry)
}
