//! Error types for kube-bot with categorization:
//!
//! - **Parse errors**: a chat message does not fit the command grammar. These
//!   are expected, returned as values and rendered back to the user.
//! - **Registry errors**: a command definition cannot be registered. Raised
//!   while loading commands at startup and fatal there.
//! - **Config errors**: configuration files or environment overrides are
//!   unreadable or invalid.

use serde::Serialize;
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::{query::QueryError, tokenizer::Token};

/// Stable, machine-readable classification of every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyMessage,
    UnknownCommand,
    UnknownSubcommand,
    MissingArgument,
    InvalidQuery,
    DuplicateKeyword,
    UnexpectedArgument,
    DuplicateCommand,
    AmbiguousKeyword,
    NotFound,
    InvalidConfig,
}

/// A chat message that does not fit the command grammar.
///
/// Every variant that refers to input carries the offending [`Token`], which
/// records its position in the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace was sent
    #[error("message is empty")]
    EmptyMessage,

    /// First word is not a registered command
    #[error("unknown command '{token}'")]
    UnknownCommand { token: Token },

    /// Command requires a subcommand and none of its subcommands was given
    #[error(
        "'{command}' needs one of {}, found {}",
        .expected.join("|"),
        found_text(.found)
    )]
    UnknownSubcommand {
        command: String,
        found: Option<Token>,
        expected: Vec<String>,
    },

    /// Input ran out before a required argument was bound
    #[error("'{command}' is missing argument <{argument}>")]
    MissingArgument {
        command: String,
        argument: String,
        position: usize,
    },

    /// Token in query position is not `type/name[/revision]`
    #[error("'{token}' is not a valid type/name[/revision] query: {source}")]
    InvalidQuery {
        token: Token,
        #[source]
        source: QueryError,
    },

    /// Two keywords from the same mutually exclusive group
    #[error("'{duplicate}' conflicts with '{first}', only one {argument} may be given")]
    DuplicateKeyword {
        argument: String,
        first: Token,
        duplicate: Token,
    },

    /// Token left over after every argument was bound
    #[error("unexpected argument '{token}'")]
    UnexpectedArgument { token: Token },
}

fn found_text(found: &Option<Token>) -> String {
    found
        .as_ref()
        .map_or_else(|| "nothing".to_string(), |token| format!("'{token}'"))
}

impl ParseError {
    /// Classification of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyMessage => ErrorKind::EmptyMessage,
            Self::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Self::UnknownSubcommand { .. } => ErrorKind::UnknownSubcommand,
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::InvalidQuery { .. } => ErrorKind::InvalidQuery,
            Self::DuplicateKeyword { .. } => ErrorKind::DuplicateKeyword,
            Self::UnexpectedArgument { .. } => ErrorKind::UnexpectedArgument,
        }
    }

    /// The token the error points at, if any
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::EmptyMessage | Self::MissingArgument { .. } => None,
            Self::UnknownSubcommand { found, .. } => found.as_ref(),
            Self::UnknownCommand { token }
            | Self::InvalidQuery { token, .. }
            | Self::UnexpectedArgument { token } => Some(token),
            Self::DuplicateKeyword { duplicate, .. } => Some(duplicate),
        }
    }

    /// Zero-based token position the error points at, if any
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MissingArgument { position, .. } => Some(*position),
            _ => self.token().map(Token::position),
        }
    }
}

/// A command definition that cannot be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Name (compared case-insensitively) already registered
    #[error("command '{name}' is already registered")]
    DuplicateCommand { name: String },

    /// Two keyword groups of one command share a literal
    #[error("command '{command}' uses keyword '{keyword}' in more than one group")]
    AmbiguousKeyword { command: String, keyword: String },

    /// No command with this name
    #[error("no command named '{name}'")]
    NotFound { name: String },
}

impl RegistryError {
    /// Classification of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateCommand { .. } => ErrorKind::DuplicateCommand,
            Self::AmbiguousKeyword { .. } => ErrorKind::AmbiguousKeyword,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    /// File is not valid TOML for the config schema
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    /// A value failed validation
    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Top-level error type for kube-bot core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Classification of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(err) => err.kind(),
            Self::Registry(err) => err.kind(),
            Self::Config(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Process exit code: 1 for user input and config, 3 for registry defects
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) | Self::Config(_) => 1,
            Self::Registry(_) => 3,
        }
    }
}

/// Result type alias for kube-bot core operations
pub type Result<T> = std::result::Result<T, Error>;
