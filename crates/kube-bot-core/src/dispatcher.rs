//! Message dispatch: command and subcommand resolution
//!
//! `parse` is pure: it reads the registry, allocates only the request it
//! returns, and stops at the first error.

use tracing::debug;

use crate::{
    binder,
    definition::CommandDefinition,
    error::ParseError,
    registry::Registry,
    request::CommandRequest,
    tokenizer::{tokenize, Token},
};

/// Parse a chat message (bot mention already stripped) into a request.
///
/// # Errors
///
/// - [`ParseError::EmptyMessage`] for blank input
/// - [`ParseError::UnknownCommand`] if the first word is not registered
/// - [`ParseError::UnknownSubcommand`] if the command needs a subcommand and
///   the next word is not one of them
/// - any argument binding error
pub fn parse<'r>(registry: &'r Registry, message: &str) -> Result<CommandRequest<'r>, ParseError> {
    let tokens = tokenize(message);
    let end = tokens.len();
    let mut tokens = tokens.into_iter();

    let head = tokens.next().ok_or(ParseError::EmptyMessage)?;
    let definition = registry
        .lookup(head.as_str())
        .map_err(|_| ParseError::UnknownCommand { token: head })?;
    let subcommand = resolve_subcommand(definition, &mut tokens)?;
    let augments = binder::bind(definition, tokens.collect(), end)?;

    debug!(
        command = definition.name(),
        subcommand = subcommand.unwrap_or(""),
        arguments = augments.len(),
        "parsed message"
    );
    Ok(CommandRequest::new(definition, subcommand, augments))
}

fn resolve_subcommand<'r>(
    definition: &'r CommandDefinition,
    tokens: &mut impl Iterator<Item = Token>,
) -> Result<Option<&'r str>, ParseError> {
    if definition.subcommands().is_empty() {
        return Ok(None);
    }
    let found = tokens.next();
    let resolved = found
        .as_ref()
        .and_then(|token| definition.find_subcommand(token.as_str()));
    match resolved {
        Some(subcommand) => Ok(Some(subcommand)),
        None => Err(ParseError::UnknownSubcommand {
            command: definition.name().to_string(),
            found,
            expected: definition.subcommands().to_vec(),
        }),
    }
}
