//! The result of a successful parse

use std::{collections::BTreeMap, fmt};

use itertools::Itertools;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{
    definition::{ArgumentKind, ArgumentSpec, CommandDefinition},
    keywords::KeywordSet,
    query::Query,
};

/// Value bound to one argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Text(String),
    Integer(u64),
    /// Canonical value of a keyword group
    Keyword(String),
    List(Vec<String>),
    Query(Query),
    /// Optional argument the message did not supply
    Unset,
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Keyword(text) => write!(f, "{text}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
            Self::Query(query) => write!(f, "{query}"),
            Self::Unset => write!(f, "-"),
        }
    }
}

/// A message resolved against a command definition.
///
/// Borrows the definition from the [`Registry`](crate::Registry) it was
/// parsed with. Every argument of the definition has an entry in
/// [`augments`](Self::augments), taken from the message or from the
/// argument's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest<'r> {
    definition: &'r CommandDefinition,
    subcommand: Option<&'r str>,
    augments: BTreeMap<String, BoundValue>,
}

impl<'r> CommandRequest<'r> {
    pub(crate) const fn new(
        definition: &'r CommandDefinition,
        subcommand: Option<&'r str>,
        augments: BTreeMap<String, BoundValue>,
    ) -> Self {
        Self {
            definition,
            subcommand,
            augments,
        }
    }

    #[must_use]
    pub const fn definition(&self) -> &'r CommandDefinition {
        self.definition
    }

    /// Command name as registered
    #[must_use]
    pub fn command(&self) -> &'r str {
        self.definition.name()
    }

    /// Subcommand as declared by the definition
    #[must_use]
    pub const fn subcommand(&self) -> Option<&'r str> {
        self.subcommand
    }

    #[must_use]
    pub const fn augments(&self) -> &BTreeMap<String, BoundValue> {
        &self.augments
    }

    #[must_use]
    pub fn get(&self, argument: &str) -> Option<&BoundValue> {
        self.augments.get(argument)
    }

    /// Text of a positional or `Any`-validated argument
    #[must_use]
    pub fn text(&self, argument: &str) -> Option<&str> {
        match self.get(argument) {
            Some(BoundValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn integer(&self, argument: &str) -> Option<u64> {
        match self.get(argument) {
            Some(BoundValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, argument: &str) -> Option<&[String]> {
        match self.get(argument) {
            Some(BoundValue::List(items)) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn query(&self, argument: &str) -> Option<&Query> {
        match self.get(argument) {
            Some(BoundValue::Query(query)) => Some(query),
            _ => None,
        }
    }

    /// Keyword argument read back into its enum
    #[must_use]
    pub fn keyword<E: KeywordSet>(&self, argument: &str) -> Option<E> {
        match self.get(argument) {
            Some(BoundValue::Keyword(canonical)) => canonical.parse().ok(),
            _ => None,
        }
    }

    /// Augments in the definition's argument order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.definition.arguments().iter().filter_map(|spec| {
            self.augments
                .get(spec.name())
                .map(|value| (spec.name(), value))
        })
    }

    /// Message text that parses back to an equal request.
    ///
    /// Defaults are written out explicitly, so `logs deployment/api` renders
    /// as `logs deployment/api bottom 25`.
    #[must_use]
    pub fn canonical_text(&self) -> String {
        let arguments = self
            .definition
            .arguments()
            .iter()
            .filter_map(|spec| {
                self.augments
                    .get(spec.name())
                    .map(|value| canonical_tokens(spec, value))
            })
            .flatten();
        std::iter::once(self.command().to_string())
            .chain(self.subcommand.map(str::to_string))
            .chain(arguments)
            .join(" ")
    }
}

fn canonical_tokens(spec: &ArgumentSpec, value: &BoundValue) -> Vec<String> {
    match (spec.kind(), value) {
        (_, BoundValue::Unset) => Vec::new(),
        (ArgumentKind::Keywords(group), BoundValue::Keyword(canonical)) => group
            .literal_for(canonical)
            .map(|literal| vec![literal.to_string()])
            .unwrap_or_default(),
        (ArgumentKind::List(predicate), BoundValue::List(items)) => {
            items.iter().map(|item| predicate.render(item)).collect()
        }
        (_, BoundValue::List(items)) => items.clone(),
        (_, other) => vec![other.to_string()],
    }
}

impl Serialize for CommandRequest<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CommandRequest", 3)?;
        state.serialize_field("command", self.command())?;
        state.serialize_field("subcommand", &self.subcommand)?;
        state.serialize_field("augments", &self.augments)?;
        state.end()
    }
}

impl fmt::Display for CommandRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_text())
    }
}
