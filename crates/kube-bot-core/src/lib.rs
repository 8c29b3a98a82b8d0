//! # kube-bot core
//!
//! Turns chat messages such as `logs deployment/api top 50` into validated,
//! structured command requests.
//!
//! ## Pipeline
//!
//! ```text
//! raw text -> tokenizer -> dispatcher -> binder -> CommandRequest
//!                            (registry)   (query)
//! ```
//!
//! Commands are plain data ([`CommandDefinition`]) registered into an
//! immutable [`Registry`]. The [`loader`] builds the registry of built-in
//! commands once at startup; afterwards it is only ever read, so any number of
//! parses may share it by reference.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` - fallible code returns `Result`
//! - No `unsafe`
//!
//! ## Example
//!
//! ```
//! use kube_bot_core::{loader, parse, BoundValue};
//!
//! let registry = loader::load_builtins()?;
//! let request = parse(&registry, "logs deployment/api top")?;
//! assert_eq!(request.command(), "logs");
//! assert_eq!(request.get("lines"), Some(&BoundValue::Integer(25)));
//! # Ok::<(), kube_bot_core::Error>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod binder;
pub mod config;
pub mod definition;
pub mod dispatcher;
pub mod error;
pub mod keywords;
pub mod loader;
pub mod query;
pub mod registry;
pub mod request;
pub mod tokenizer;

pub use config::{Config, KeyLookup};
pub use definition::{
    ArgumentKind, ArgumentSpec, CommandDefinition, KeywordGroup, ListPredicate, TokenValidator,
    TrailingPolicy,
};
pub use dispatcher::parse;
pub use error::{ConfigError, Error, ErrorKind, ParseError, RegistryError, Result};
pub use keywords::{AuthorFilter, KeywordSet, LogDirection, ResultFilter};
pub use query::{Query, QueryError};
pub use registry::Registry;
pub use request::{BoundValue, CommandRequest};
pub use tokenizer::{tokenize, Token};
