//! Argument binding: the grammar engine
//!
//! Walks a definition's argument specs in order over the tokens that follow
//! the command (and subcommand). Tokens are removed from the stream as they
//! are consumed; the rest keep their relative order.
//!
//! | kind        | consumes                                                  |
//! |-------------|-----------------------------------------------------------|
//! | positional  | the next token, required                                  |
//! | validated   | the next token if the validator accepts it, else default  |
//! | keywords    | the first matching token anywhere; a second is an error   |
//! | list        | the run of accepted tokens at the front of the stream     |
//! | query       | the next token, parsed as `type/name[/revision]`          |

use std::collections::{BTreeMap, VecDeque};

use crate::{
    definition::{
        ArgumentKind, ArgumentSpec, CommandDefinition, KeywordGroup, ListPredicate,
        TokenValidator, TrailingPolicy,
    },
    error::ParseError,
    query::Query,
    request::BoundValue,
    tokenizer::Token,
};

/// Bind `tokens` to every argument of `definition`.
///
/// `end` is the position just past the last token of the message and is
/// reported when a required argument is missing.
pub(crate) fn bind(
    definition: &CommandDefinition,
    tokens: Vec<Token>,
    end: usize,
) -> Result<BTreeMap<String, BoundValue>, ParseError> {
    let mut binder = Binder {
        definition,
        remaining: tokens.into(),
        end,
    };

    let augments = definition
        .arguments()
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            binder
                .bind_spec(index, spec)
                .map(|value| (spec.name().to_string(), value))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    match (definition.trailing(), binder.remaining.pop_front()) {
        (TrailingPolicy::Reject, Some(token)) => Err(ParseError::UnexpectedArgument { token }),
        _ => Ok(augments),
    }
}

struct Binder<'d> {
    definition: &'d CommandDefinition,
    remaining: VecDeque<Token>,
    end: usize,
}

impl Binder<'_> {
    fn bind_spec(&mut self, index: usize, spec: &ArgumentSpec) -> Result<BoundValue, ParseError> {
        match spec.kind() {
            ArgumentKind::Positional => self
                .take_next(spec)
                .map(|token| BoundValue::Text(token.as_str().to_string())),
            ArgumentKind::Validated { validator, default } => {
                self.bind_validated(spec, *validator, default.as_ref())
            }
            ArgumentKind::Keywords(group) => self.bind_keyword(spec, group),
            ArgumentKind::List(predicate) => Ok(self.bind_list(index, predicate)),
            ArgumentKind::Query => {
                let token = self.take_next(spec)?;
                match Query::parse(token.as_str()) {
                    Ok(query) => Ok(BoundValue::Query(query)),
                    Err(source) => Err(ParseError::InvalidQuery { token, source }),
                }
            }
        }
    }

    fn take_next(&mut self, spec: &ArgumentSpec) -> Result<Token, ParseError> {
        self.remaining
            .pop_front()
            .ok_or_else(|| self.missing(spec))
    }

    fn missing(&self, spec: &ArgumentSpec) -> ParseError {
        ParseError::MissingArgument {
            command: self.definition.name().to_string(),
            argument: spec.name().to_string(),
            position: self.remaining.front().map_or(self.end, Token::position),
        }
    }

    fn bind_validated(
        &mut self,
        spec: &ArgumentSpec,
        validator: TokenValidator,
        default: Option<&BoundValue>,
    ) -> Result<BoundValue, ParseError> {
        let accepted = self
            .remaining
            .front()
            .and_then(|token| validator.validate(token.as_str()));
        match (accepted, default) {
            (Some(value), _) => {
                self.remaining.pop_front();
                Ok(value)
            }
            (None, Some(default)) => Ok(default.clone()),
            (None, None) => Err(self.missing(spec)),
        }
    }

    fn bind_keyword(
        &mut self,
        spec: &ArgumentSpec,
        group: &KeywordGroup,
    ) -> Result<BoundValue, ParseError> {
        let hits: Vec<(usize, String)> = self
            .remaining
            .iter()
            .enumerate()
            .filter_map(|(at, token)| {
                group
                    .canonical_for(token.as_str())
                    .map(|canonical| (at, canonical.to_string()))
            })
            .take(2)
            .collect();

        match hits.as_slice() {
            [] => Ok(BoundValue::Keyword(group.default_value().to_string())),
            [(first, _), (second, _)] => Err(ParseError::DuplicateKeyword {
                argument: spec.name().to_string(),
                first: self.remaining[*first].clone(),
                duplicate: self.remaining[*second].clone(),
            }),
            [(at, canonical), ..] => {
                self.remaining.remove(*at);
                Ok(BoundValue::Keyword(canonical.clone()))
            }
        }
    }

    fn bind_list(&mut self, index: usize, predicate: &ListPredicate) -> BoundValue {
        let mut items = Vec::new();
        loop {
            let Some(item) = self
                .remaining
                .front()
                .filter(|token| !self.definition.is_reserved_elsewhere(token.as_str(), index))
                .and_then(|token| predicate.accept(token.as_str()))
                .map(str::to_string)
            else {
                break;
            };
            items.push(item);
            self.remaining.pop_front();
        }
        BoundValue::List(items)
    }
}
