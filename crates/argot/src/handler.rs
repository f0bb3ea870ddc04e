//! Handlers: how an option consumes the elements that follow it.
//!
//! A [`Handler`] pairs a consume function with metadata (default value,
//! aliases, help). Handlers are immutable; every builder method returns a new
//! handler that shares the consume function with the one it came from, so a
//! built-in like [`string()`] can be configured for many options without any
//! of them seeing each other's aliases or defaults.

use std::fmt;
use std::sync::{Arc, LazyLock};

use thiserror::Error;

use crate::element::Element;
use crate::value::Value;

/// Why a handler refused its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("unknown problem")]
    Unknown,
    #[error("missing value for option")]
    MissingValue,
    #[error("expected an integer")]
    NotInt,
    #[error("expected one of the valid values")]
    NotOneOf,
}

/// A successful handler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumed<T> {
    pub value: T,
    /// Where the dispatcher resumes scanning.
    pub next_index: usize,
}

pub type HandlerResult<T> = Result<Consumed<T>, HandlerError>;

/// Help metadata read by [`usage`](crate::usage::usage).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    pub text: Option<String>,
    /// Placeholder for the option's argument, e.g. `PORT`.
    pub arg_name: Option<String>,
}

type ExecFn<T> = dyn Fn(&[Element], usize) -> HandlerResult<T> + Send + Sync;

/// Describes how to interpret the elements following one option.
#[derive(Clone)]
pub struct Handler<T> {
    exec: Arc<ExecFn<T>>,
    default: Option<T>,
    aliases: Vec<String>,
    help: Help,
}

impl<T> Handler<T> {
    /// Create a handler from a consume function.
    ///
    /// `exec(elements, i)` is called with `i` pointing right after the option
    /// element. It must not look past `elements[i]`, and on success must
    /// return a `next_index` of at least `i`.
    pub fn new<F>(exec: F) -> Self
    where
        F: Fn(&[Element], usize) -> HandlerResult<T> + Send + Sync + 'static,
    {
        Self {
            exec: Arc::new(exec),
            default: None,
            aliases: Vec::new(),
            help: Help::default(),
        }
    }

    pub fn exec(&self, elements: &[Element], i: usize) -> HandlerResult<T> {
        (self.exec)(elements, i)
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn help_info(&self) -> &Help {
        &self.help
    }
}

impl<T: Clone> Handler<T> {
    /// A new handler whose value defaults to `value` when the option is absent.
    pub fn default(&self, value: T) -> Self {
        Self {
            default: Some(value),
            ..self.clone()
        }
    }

    /// A new handler with `names` appended to the alias list.
    pub fn alias<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut aliases = self.aliases.clone();
        aliases.extend(names.into_iter().map(Into::into));
        Self {
            aliases,
            ..self.clone()
        }
    }

    pub fn help(&self, text: impl Into<String>) -> Self {
        Self {
            help: Help {
                text: Some(text.into()),
                ..self.help.clone()
            },
            ..self.clone()
        }
    }

    pub fn arg_name(&self, name: impl Into<String>) -> Self {
        Self {
            help: Help {
                arg_name: Some(name.into()),
                ..self.help.clone()
            },
            ..self.clone()
        }
    }

    /// Derive a handler producing `f(value)`; the default is mapped too.
    pub fn map<U, F>(&self, f: F) -> Handler<U>
    where
        T: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let default = self.default.clone().map(&f);
        let exec = Arc::clone(&self.exec);
        Handler {
            exec: Arc::new(move |elements: &[Element], i: usize| {
                exec(elements, i).map(|c| Consumed {
                    value: f(c.value),
                    next_index: c.next_index,
                })
            }),
            default,
            aliases: self.aliases.clone(),
            help: self.help.clone(),
        }
    }

    /// Type-erase into a handler that can live in a [`Spec`](crate::Spec).
    pub fn erase(&self) -> Handler<Value>
    where
        T: Into<Value> + 'static,
    {
        self.map(Into::into)
    }
}

impl<T: fmt::Debug> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("default", &self.default)
            .field("aliases", &self.aliases)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

fn next_free(elements: &[Element], i: usize) -> Result<&str, HandlerError> {
    elements
        .get(i)
        .and_then(Element::as_free)
        .ok_or(HandlerError::MissingValue)
}

static STRING: LazyLock<Handler<String>> = LazyLock::new(|| {
    Handler::new(|elements, i| {
        let value = next_free(elements, i)?;
        Ok(Consumed {
            value: value.to_string(),
            next_index: i + 1,
        })
    })
    .arg_name("string")
});

static FLAG: LazyLock<Handler<bool>> = LazyLock::new(|| {
    Handler::new(|_elements, i| {
        Ok(Consumed {
            value: true,
            next_index: i,
        })
    })
    .default(false)
});

static INT: LazyLock<Handler<u64>> = LazyLock::new(|| {
    Handler::new(|elements, i| {
        let value = next_free(elements, i)?;
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HandlerError::NotInt);
        }
        // Digit strings past u64::MAX are not integers we can represent.
        let value: u64 = value.parse().map_err(|_| HandlerError::NotInt)?;
        Ok(Consumed {
            value,
            next_index: i + 1,
        })
    })
    .arg_name("int")
});

/// Takes the next element as-is. Fails if it is missing or not a value.
pub fn string() -> Handler<String> {
    STRING.clone()
}

/// Consumes nothing and yields `true`; defaults to `false`.
pub fn flag() -> Handler<bool> {
    FLAG.clone()
}

/// Takes the next element as a non-negative decimal integer.
///
/// Only ASCII digits are accepted: no sign, no `0x`, no fractions.
pub fn int() -> Handler<u64> {
    INT.clone()
}

/// Takes the next element if it is exactly one of `values`.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn one_of<I, S>(values: I) -> Handler<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = values.into_iter().map(Into::into).collect();
    assert!(!allowed.is_empty(), "one_of needs at least one value");
    let hint = allowed.join("|");

    Handler::new(move |elements, i| {
        let value = next_free(elements, i)?;
        if allowed.iter().any(|a| a == value) {
            Ok(Consumed {
                value: value.to_string(),
                next_index: i + 1,
            })
        } else {
            Err(HandlerError::NotOneOf)
        }
    })
    .arg_name(hint)
}
