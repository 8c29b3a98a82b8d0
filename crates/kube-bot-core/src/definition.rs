//! Declarative command definitions
//!
//! A [`CommandDefinition`] is pure data: a name, an optional set of
//! subcommands and an ordered list of [`ArgumentSpec`]s. The binder walks the
//! specs in order, so adding a command never means touching parser code.
//!
//! ```
//! use kube_bot_core::{ArgumentSpec, CommandDefinition, LogDirection, TokenValidator, BoundValue};
//!
//! let logs = CommandDefinition::new("logs", "Show pod logs")
//!     .with_argument(ArgumentSpec::query("query"))
//!     .with_argument(ArgumentSpec::keywords::<LogDirection>("direction"))
//!     .with_argument(ArgumentSpec::validated(
//!         "lines",
//!         TokenValidator::PositiveInteger,
//!         BoundValue::Integer(25),
//!     ));
//! assert_eq!(logs.usage(), "logs <query> [top|bottom] [lines]");
//! ```

use itertools::Itertools;

use crate::{keywords::KeywordSet, request::BoundValue};

// ═══════════════════════════════════════════════════════════════════════════
// TOKEN PREDICATES
// ═══════════════════════════════════════════════════════════════════════════

/// Predicate and conversion for optional validated positionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValidator {
    /// ASCII digits parsing to an integer greater than zero
    PositiveInteger,
    /// ASCII digits parsing to any integer, zero included
    NonNegativeInteger,
    /// Any token, bound as text
    Any,
}

impl TokenValidator {
    /// Bind `token` if it satisfies the validator
    #[must_use]
    pub fn validate(self, token: &str) -> Option<BoundValue> {
        match self {
            Self::PositiveInteger => parse_digits(token)
                .filter(|value| *value > 0)
                .map(BoundValue::Integer),
            Self::NonNegativeInteger => parse_digits(token).map(BoundValue::Integer),
            Self::Any => Some(BoundValue::Text(token.to_string())),
        }
    }
}

fn parse_digits(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Which tokens a list argument accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPredicate {
    /// Tokens starting with the prefix; the prefix is stripped when bound
    Prefixed(String),
    /// Any token that does not start with `#`
    Bareword,
}

impl ListPredicate {
    /// The list item `token` binds to, if it is accepted
    #[must_use]
    pub fn accept<'t>(&self, token: &'t str) -> Option<&'t str> {
        match self {
            Self::Prefixed(prefix) => token
                .strip_prefix(prefix.as_str())
                .filter(|item| !item.is_empty()),
            Self::Bareword => (!token.starts_with('#')).then_some(token),
        }
    }

    /// Inverse of [`accept`](Self::accept)
    #[must_use]
    pub fn render(&self, item: &str) -> String {
        match self {
            Self::Prefixed(prefix) => format!("{prefix}{item}"),
            Self::Bareword => item.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// KEYWORD GROUPS
// ═══════════════════════════════════════════════════════════════════════════

/// Mutually exclusive literal keywords mapping to canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    keywords: Vec<(String, String)>,
    default: String,
}

impl KeywordGroup {
    /// Empty group binding `default` when no keyword is present
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            keywords: Vec::new(),
            default: default.into(),
        }
    }

    /// Group whose keywords are the variants of `E`
    #[must_use]
    pub fn of<E: KeywordSet>() -> Self {
        E::iter().fold(Self::new(E::default().to_string()), |group, variant| {
            let literal = variant.to_string();
            group.with_keyword(literal.clone(), literal)
        })
    }

    /// Add a literal keyword binding `canonical`
    #[must_use]
    pub fn with_keyword(mut self, literal: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.keywords.push((literal.into(), canonical.into()));
        self
    }

    /// Canonical value for a literal (case-sensitive)
    #[must_use]
    pub fn canonical_for(&self, literal: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(candidate, _)| candidate == literal)
            .map(|(_, canonical)| canonical.as_str())
    }

    /// First literal that binds `canonical`
    #[must_use]
    pub fn literal_for(&self, canonical: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(_, value)| value == canonical)
            .map(|(literal, _)| literal.as_str())
    }

    /// All literal keywords in declaration order
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|(literal, _)| literal.as_str())
    }

    /// Canonical value bound when no keyword is present
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ARGUMENT SPECS
// ═══════════════════════════════════════════════════════════════════════════

/// How an argument consumes tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Exactly the next token, as text
    Positional,
    /// The next token if the validator accepts it; otherwise the default.
    /// Without a default the argument is required.
    Validated {
        validator: TokenValidator,
        default: Option<BoundValue>,
    },
    /// One keyword from the group, found anywhere in the remaining tokens
    Keywords(KeywordGroup),
    /// A contiguous run of accepted tokens
    List(ListPredicate),
    /// The next token, parsed as `type/name[/revision]`
    Query,
}

/// One named argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    name: String,
    kind: ArgumentKind,
}

impl ArgumentSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Positional)
    }

    #[must_use]
    pub fn validated(name: impl Into<String>, validator: TokenValidator, default: BoundValue) -> Self {
        Self::new(
            name,
            ArgumentKind::Validated {
                validator,
                default: Some(default),
            },
        )
    }

    #[must_use]
    pub fn required(name: impl Into<String>, validator: TokenValidator) -> Self {
        Self::new(
            name,
            ArgumentKind::Validated {
                validator,
                default: None,
            },
        )
    }

    /// Any single token, left [`BoundValue::Unset`] when absent
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::validated(name, TokenValidator::Any, BoundValue::Unset)
    }

    #[must_use]
    pub fn keywords<E: KeywordSet>(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Keywords(KeywordGroup::of::<E>()))
    }

    #[must_use]
    pub fn keyword_group(name: impl Into<String>, group: KeywordGroup) -> Self {
        Self::new(name, ArgumentKind::Keywords(group))
    }

    #[must_use]
    pub fn list(name: impl Into<String>, predicate: ListPredicate) -> Self {
        Self::new(name, ArgumentKind::List(predicate))
    }

    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Query)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &ArgumentKind {
        &self.kind
    }

    /// Keyword literals this argument reserves
    pub fn reserved_keywords(&self) -> impl Iterator<Item = &str> {
        let group = match &self.kind {
            ArgumentKind::Keywords(group) => Some(group),
            _ => None,
        };
        group.into_iter().flat_map(|group| group.literals())
    }

    /// Value bound when the message does not supply this argument
    #[must_use]
    pub fn default_value(&self) -> Option<BoundValue> {
        match &self.kind {
            ArgumentKind::Validated { default, .. } => default.clone(),
            ArgumentKind::Keywords(group) => {
                Some(BoundValue::Keyword(group.default_value().to_string()))
            }
            ArgumentKind::List(_) => Some(BoundValue::List(Vec::new())),
            ArgumentKind::Positional | ArgumentKind::Query => None,
        }
    }

    /// Usage fragment, e.g. `<query>`, `[top|bottom]`, `[#channels...]`
    #[must_use]
    pub fn usage(&self) -> String {
        match &self.kind {
            ArgumentKind::Positional
            | ArgumentKind::Query
            | ArgumentKind::Validated { default: None, .. } => format!("<{}>", self.name),
            ArgumentKind::Validated { .. } => format!("[{}]", self.name),
            ArgumentKind::Keywords(group) => format!("[{}]", group.literals().join("|")),
            ArgumentKind::List(predicate) => format!("[{}...]", predicate.render(&self.name)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMAND DEFINITION
// ═══════════════════════════════════════════════════════════════════════════

/// What happens to tokens left after every argument is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPolicy {
    /// Leftovers are an `UnexpectedArgument` error
    #[default]
    Reject,
    /// Leftovers are dropped silently
    Ignore,
}

/// Immutable schema of one chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    name: String,
    description: String,
    subcommands: Vec<String>,
    arguments: Vec<ArgumentSpec>,
    trailing: TrailingPolicy,
}

impl CommandDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            subcommands: Vec::new(),
            arguments: Vec::new(),
            trailing: TrailingPolicy::Reject,
        }
    }

    /// Require one of `subcommands` right after the command name.
    ///
    /// Duplicates (ignoring case) are dropped, keeping the first spelling.
    #[must_use]
    pub fn with_subcommands<I, S>(mut self, subcommands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for subcommand in subcommands.into_iter().map(Into::into) {
            if self.find_subcommand(&subcommand).is_none() {
                self.subcommands.push(subcommand);
            }
        }
        self
    }

    /// Append an argument; arguments bind in the order they are added
    #[must_use]
    pub fn with_argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    #[must_use]
    pub fn with_trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn subcommands(&self) -> &[String] {
        &self.subcommands
    }

    #[must_use]
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    #[must_use]
    pub const fn trailing(&self) -> TrailingPolicy {
        self.trailing
    }

    /// Declared spelling of the subcommand matching `token`, ignoring case
    #[must_use]
    pub fn find_subcommand(&self, token: &str) -> Option<&str> {
        self.subcommands
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(token))
            .map(String::as_str)
    }

    /// Whether `token` is a keyword of any argument other than `except`
    #[must_use]
    pub fn is_reserved_elsewhere(&self, token: &str, except: usize) -> bool {
        self.arguments
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != except)
            .any(|(_, spec)| spec.reserved_keywords().any(|keyword| keyword == token))
    }

    /// First keyword literal used by more than one argument
    #[must_use]
    pub fn ambiguous_keyword(&self) -> Option<&str> {
        self.arguments
            .iter()
            .enumerate()
            .flat_map(|(index, spec)| spec.reserved_keywords().map(move |kw| (index, kw)))
            .find(|(index, keyword)| self.is_reserved_elsewhere(keyword, *index))
            .map(|(_, keyword)| keyword)
    }

    /// One-line usage, e.g. `rollout {status|undo} <query>`
    #[must_use]
    pub fn usage(&self) -> String {
        let subcommands = (!self.subcommands.is_empty())
            .then(|| format!("{{{}}}", self.subcommands.join("|")));
        std::iter::once(self.name.clone())
            .chain(subcommands)
            .chain(self.arguments.iter().map(ArgumentSpec::usage))
            .join(" ")
    }
}
