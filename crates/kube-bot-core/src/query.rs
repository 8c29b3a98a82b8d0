//! Resource locator sub-grammar: `type/name[/revision]`
//!
//! # Parse-at-Boundaries Pattern
//!
//! A [`Query`] can only be built through [`Query::parse`] (or `FromStr`), so
//! its `kind` and `name` are never empty and a present revision is never empty.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEPARATOR: char = '/';

/// Why a token is not a valid query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Not 2 or 3 `/`-separated segments
    #[error("expected type/name or type/name/revision, found {segments} segment(s)")]
    SegmentCount {
        /// Number of segments found
        segments: usize,
    },

    /// First segment is empty
    #[error("resource type cannot be empty")]
    EmptyType,

    /// Second segment is empty
    #[error("resource name cannot be empty")]
    EmptyName,

    /// Third segment is present but empty
    #[error("revision cannot be empty")]
    EmptyRevision,
}

/// A parsed `type/name[/revision]` resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<String>,
}

impl Query {
    /// Parse a query token
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the token does not split into 2 or 3
    /// segments or when any present segment is empty.
    pub fn parse(token: &str) -> Result<Self, QueryError> {
        let segments: Vec<&str> = token.split(SEPARATOR).collect();
        match segments.as_slice() {
            [kind, name] => Self::from_segments(kind, name, None),
            [kind, name, revision] => Self::from_segments(kind, name, Some(revision)),
            _ => Err(QueryError::SegmentCount {
                segments: segments.len(),
            }),
        }
    }

    fn from_segments(kind: &str, name: &str, revision: Option<&str>) -> Result<Self, QueryError> {
        if kind.is_empty() {
            return Err(QueryError::EmptyType);
        }
        if name.is_empty() {
            return Err(QueryError::EmptyName);
        }
        if revision.is_some_and(str::is_empty) {
            return Err(QueryError::EmptyRevision);
        }
        Ok(Self {
            kind: kind.to_string(),
            name: name.to_string(),
            revision: revision.map(str::to_string),
        })
    }

    /// Resource type, e.g. `deployment`
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Resource name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional revision segment
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}/{}/{revision}", self.kind, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}
