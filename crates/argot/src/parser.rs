use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::element::{Element, format_declared};
use crate::error::ParseError;
use crate::handler::{Consumed, Handler};
use crate::spec::Spec;
use crate::tokenize::{Tokens, tokenize};
use crate::value::{FromValue, Value};

/// Parsed option values keyed by canonical name.
///
/// Every option of the spec has an entry; options that were not given and
/// have no default map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options(IndexMap<String, Option<Value>>);

impl Options {
    /// The value of `name`, if it is declared and set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).and_then(Option::as_ref)
    }

    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(T::from_value)
    }

    /// Whether `name` is a declared option (set or not).
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// `true` only if `name` holds `Bool(true)`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.0.get_mut(name) {
            *slot = Some(value);
        }
    }
}

/// The outcome of one parse.
#[derive(Debug, Clone, Serialize)]
pub struct Matches {
    /// Values for every declared option, including `help`.
    pub options: Options,
    /// Positional arguments in order.
    pub args: Vec<String>,
    /// Diagnostics in encounter order; lexical errors come first.
    pub errors: Vec<ParseError>,
    /// The spec used, including the implicit `help` option.
    #[serde(skip)]
    pub spec: Arc<Spec>,
}

impl Matches {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Render help text for the spec these matches were produced with.
    pub fn usage(&self, cli_name: &str, synopsis: &str) -> String {
        crate::usage::usage(cli_name, synopsis, &self.spec)
    }
}

/// A spec bound into a reusable parser.
///
/// Alias resolution and defaults are computed once by [`compile`]; each call
/// to [`Parser::parse`] works on fresh state, so a parser can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct Parser {
    spec: Arc<Spec>,
    aliases: HashMap<String, String>,
    defaults: Options,
}

/// Bind `spec` (plus the implicit `help` flag) into a [`Parser`].
pub fn compile(spec: Spec) -> Parser {
    let spec = spec.with_help();

    let mut aliases: HashMap<String, String> = HashMap::new();
    for (canonical, handler) in spec.iter() {
        for alias in handler.aliases() {
            // Later declarations take over an alias silently.
            if let Some(previous) = aliases.insert(alias.clone(), canonical.to_string())
                && previous != canonical
            {
                tracing::debug!(%alias, %previous, %canonical, "alias reassigned");
            }
        }
    }

    let defaults = Options(
        spec.iter()
            .map(|(name, handler)| (name.to_string(), handler.default_value().cloned()))
            .collect(),
    );

    tracing::debug!(
        options = spec.len(),
        aliases = aliases.len(),
        "compiled option spec"
    );

    Parser {
        spec: Arc::new(spec),
        aliases,
        defaults,
    }
}

/// Parse `argv` against `spec` in one go.
pub fn parse<I, S>(argv: I, spec: Spec) -> Matches
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    compile(spec).parse(argv)
}

impl Parser {
    /// The effective spec, including `help`.
    pub fn spec(&self) -> &Arc<Spec> {
        &self.spec
    }

    /// Option values when nothing is given on the command line.
    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    /// Parse the current process arguments, skipping the program path.
    pub fn parse_env(&self) -> Matches {
        self.parse(std::env::args().skip(1))
    }

    pub fn parse<I, S>(&self, argv: I) -> Matches
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Tokens {
            elements,
            mut errors,
        } = tokenize(argv);
        let mut options = self.defaults.clone();
        let mut args = Vec::new();

        let mut i = 0;
        while i < elements.len() {
            let element = &elements[i];
            i += 1;

            match element {
                Element::Option { name, written, .. } => match self.resolve(name) {
                    Some((canonical, handler)) => match handler.exec(&elements, i) {
                        Ok(Consumed { value, next_index }) => {
                            options.set(canonical, value);
                            i = next_index.max(i);
                        }
                        // The next element is left for the next iteration.
                        Err(kind) => errors.push(ParseError::Rejected {
                            option: written.clone(),
                            alias_of: (canonical != name.as_str())
                                .then(|| format_declared(canonical)),
                            kind,
                        }),
                    },
                    None => errors.push(ParseError::UnknownOption {
                        option: written.clone(),
                    }),
                },
                Element::Free { value } => args.push(value.clone()),
                Element::EndOptions => {}
            }
        }

        tracing::debug!(
            elements = elements.len(),
            args = args.len(),
            errors = errors.len(),
            "parsed argv"
        );

        Matches {
            options,
            args,
            errors,
            spec: Arc::clone(&self.spec),
        }
    }

    /// Canonical name and handler for `name`: a declared name first, then an alias.
    fn resolve(&self, name: &str) -> Option<(&str, &Handler<Value>)> {
        self.spec.get_key_value(name).or_else(|| {
            let canonical = self.aliases.get(name)?;
            self.spec.get_key_value(canonical)
        })
    }
}
