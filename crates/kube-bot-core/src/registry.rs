//! Command registry
//!
//! Built once at startup (see [`loader`](crate::loader)) and read-only
//! afterwards. `Registry` is `Send + Sync`, so a shared reference can serve
//! any number of concurrent parses.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    definition::CommandDefinition,
    dispatcher,
    error::{ParseError, RegistryError},
    request::CommandRequest,
};

/// Command definitions keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: BTreeMap<String, CommandDefinition>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateCommand`] if the name is taken, ignoring case
    /// - [`RegistryError::AmbiguousKeyword`] if two keyword groups of the
    ///   definition share a literal
    pub fn register(&mut self, definition: CommandDefinition) -> Result<(), RegistryError> {
        let key = definition.name().to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(RegistryError::DuplicateCommand {
                name: definition.name().to_string(),
            });
        }
        if let Some(keyword) = definition.ambiguous_keyword() {
            return Err(RegistryError::AmbiguousKeyword {
                command: definition.name().to_string(),
                keyword: keyword.to_string(),
            });
        }
        debug!(command = definition.name(), "registered command");
        self.commands.insert(key, definition);
        Ok(())
    }

    /// Find a definition by name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no command has this name.
    pub fn lookup(&self, name: &str) -> Result<&CommandDefinition, RegistryError> {
        self.commands
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Parse a chat message against this registry
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] the message runs into.
    pub fn parse(&self, message: &str) -> Result<CommandRequest<'_>, ParseError> {
        dispatcher::parse(self, message)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Definitions sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.values()
    }

    /// Aligned `usage  description` lines, sorted by command name
    #[must_use]
    pub fn help_lines(&self) -> Vec<String> {
        let usages: Vec<(String, &str)> = self
            .iter()
            .map(|definition| (definition.usage(), definition.description()))
            .collect();
        let longest = usages
            .iter()
            .map(|(usage, _)| usage.len())
            .max()
            .unwrap_or(0);
        usages
            .into_iter()
            .map(|(usage, description)| format!("{usage:<longest$}  {description}"))
            .collect()
    }
}
