use serde::Serialize;

/// One classified unit of tokenized input.
///
/// Produced by [`tokenize`](crate::tokenize::tokenize) and consumed by
/// [`Handler`](crate::Handler)s, which give the elements following an option
/// their meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    /// An option trigger such as `--is-cool` or `-v`.
    ///
    /// `name` is already normalized to camel case (`isCool`). `short` records
    /// whether the token used the single-dash form, and `written` keeps the
    /// token as the user typed it (`--is-cool`) for diagnostics.
    Option {
        name: String,
        short: bool,
        written: String,
    },
    /// A positional value.
    Free { value: String },
    /// The literal `--` token.
    EndOptions,
}

impl Element {
    /// A long option whose token was `--<name>`.
    pub fn option(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Option {
            written: format_option(&name, false),
            name,
            short: false,
        }
    }

    /// A short option whose token was `-<name>`.
    pub fn short(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Option {
            written: format_option(&name, true),
            name,
            short: true,
        }
    }

    pub fn free(value: impl Into<String>) -> Self {
        Self::Free {
            value: value.into(),
        }
    }

    /// The value of a free element.
    pub fn as_free(&self) -> Option<&str> {
        match self {
            Self::Free { value } => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Render an option name the way a user would type it.
pub(crate) fn format_option(name: &str, short: bool) -> String {
    if short {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Render a declared name: single characters get one dash, the rest two.
pub(crate) fn format_declared(name: &str) -> String {
    format_option(name, name.chars().count() == 1)
}
