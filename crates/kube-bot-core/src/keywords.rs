//! Mutually exclusive keyword groups used by the built-in commands
//!
//! Each group is an enum whose variants are the literal keywords and whose
//! `#[default]` variant is bound when the message names none of them.
//! [`KeywordGroup::of`](crate::KeywordGroup::of) turns such an enum into the
//! data-driven group the binder works with, and
//! [`CommandRequest::keyword`](crate::CommandRequest::keyword) reads the bound
//! value back into the enum.

use std::{fmt, str::FromStr};

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// An enum usable as a keyword group.
pub trait KeywordSet: Copy + Default + fmt::Display + FromStr + IntoEnumIterator {}

impl<T> KeywordSet for T where T: Copy + Default + fmt::Display + FromStr + IntoEnumIterator {}

/// Which end of the log to show (`logs`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LogDirection {
    Top,
    #[default]
    Bottom,
}

/// Whose deployments to report (`track`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AuthorFilter {
    Anyones,
    #[default]
    Mine,
    #[strum(to_string = "none")]
    Nobody,
}

/// Which deployment outcomes to report (`track`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ResultFilter {
    #[default]
    All,
    Failure,
    Success,
}
