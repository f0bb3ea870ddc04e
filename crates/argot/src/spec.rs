use indexmap::IndexMap;

use crate::handler::{Handler, flag};
use crate::value::Value;

/// Name of the option every compiled spec answers to.
pub const HELP_OPTION: &str = "help";

/// Option names mapped to their handlers, in declaration order.
///
/// Declaration order matters: when two options claim the same alias, the one
/// declared later wins.
#[derive(Debug, Clone, Default)]
pub struct Spec {
    options: IndexMap<String, Handler<Value>>,
}

impl Spec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option (builder form of [`Spec::insert`]).
    pub fn option<T>(mut self, name: impl Into<String>, handler: Handler<T>) -> Self
    where
        T: Clone + Into<Value> + 'static,
    {
        self.insert(name, handler);
        self
    }

    /// Declare an option, replacing any previous handler under `name`.
    ///
    /// A replaced option keeps its original position.
    pub fn insert<T>(
        &mut self,
        name: impl Into<String>,
        handler: Handler<T>,
    ) -> Option<Handler<Value>>
    where
        T: Clone + Into<Value> + 'static,
    {
        self.options.insert(name.into(), handler.erase())
    }

    pub fn get(&self, name: &str) -> Option<&Handler<Value>> {
        self.options.get(name)
    }

    pub fn get_key_value(&self, name: &str) -> Option<(&str, &Handler<Value>)> {
        self.options
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler<Value>)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// `self` with the implicit `--help`/`-h` flag in front.
    ///
    /// A `help` option declared by the caller replaces the implicit one.
    pub(crate) fn with_help(self) -> Self {
        let mut options = IndexMap::with_capacity(self.options.len() + 1);
        options.insert(HELP_OPTION.to_string(), flag().alias(["h"]).erase());
        for (name, handler) in self.options {
            options.insert(name, handler);
        }
        Self { options }
    }
}
