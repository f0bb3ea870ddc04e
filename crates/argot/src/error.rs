use serde::Serialize;
use thiserror::Error;

use crate::handler::HandlerError;

/// A diagnostic produced while tokenizing or dispatching argv.
///
/// These never abort a parse; they are collected into
/// [`Matches::errors`](crate::Matches) in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `-abc`: a single dash followed by more than one character.
    #[error("-{name}: short options must only use a single character")]
    ShortOptionTooLong { name: String },

    /// The option is neither a declared name nor an alias.
    #[error("{option}: unknown option")]
    UnknownOption { option: String },

    /// A handler refused the elements following its option.
    ///
    /// `option` is the option as written; `alias_of` is the rendered
    /// canonical name when the option was reached through an alias.
    #[error("{}: {kind}", written(.option, .alias_of))]
    Rejected {
        option: String,
        alias_of: Option<String>,
        kind: HandlerError,
    },
}

fn written(option: &str, alias_of: &Option<String>) -> String {
    match alias_of {
        Some(canonical) => format!("{option} (alias of {canonical})"),
        None => option.to_string(),
    }
}

impl Serialize for ParseError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
