//! Option specs described as JSON.
//!
//! A spec file lists options in declaration order; [`SpecFile::to_spec`]
//! validates it and builds the equivalent [`argot::Spec`].
//!
//! ```json
//! {
//!   "name": "serve",
//!   "synopsis": "Serve files over HTTP",
//!   "options": [
//!     { "name": "port", "kind": "int", "default": 8080, "aliases": ["p"] },
//!     { "name": "level", "kind": "one-of", "values": ["low", "high"] },
//!     { "name": "verbose", "kind": "flag", "aliases": ["v"] }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use argot::tokenize::camel_case;
use argot::{Handler, Spec, Value, flag, int, one_of, string};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read spec file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid spec JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("option #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("option '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("option '{0}': one-of needs at least one value")]
    NoValues(String),

    #[error("option '{name}': values are only allowed for one-of, not {kind}")]
    UnexpectedValues { name: String, kind: OptionKind },

    #[error("option '{name}': default {default} is not a valid {kind}")]
    DefaultType {
        name: String,
        kind: OptionKind,
        default: serde_json::Value,
    },

    #[error("option '{name}': default '{default}' is not one of its values")]
    DefaultNotAllowed { name: String, default: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    #[default]
    String,
    Flag,
    Int,
    OneOf,
}

impl OptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Flag => "flag",
            Self::Int => "int",
            Self::OneOf => "one-of",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionDef {
    pub name: String,
    #[serde(default)]
    pub kind: OptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    /// Allowed values for `one-of`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecFile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub synopsis: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
}

impl SpecFile {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            options = file.options.len(),
            "loaded spec file"
        );
        Ok(file)
    }

    /// Validate the file and build the spec it describes.
    ///
    /// Names and aliases may be written dashed (`dry-run`); they are stored
    /// camel-cased (`dryRun`), the form the tokenizer produces for
    /// `--dry-run`, so both spellings in one file count as duplicates.
    ///
    /// Aliases are not checked for collisions: a later option silently takes
    /// over an alias declared by an earlier one, exactly as in a spec built
    /// in code.
    pub fn to_spec(&self) -> Result<Spec, SchemaError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut spec = Spec::new();

        for (index, def) in self.options.iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(SchemaError::EmptyName { index });
            }
            let name = camel_case(&def.name);
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateName(def.name.clone()));
            }
            if def.kind != OptionKind::OneOf && !def.values.is_empty() {
                return Err(SchemaError::UnexpectedValues {
                    name: def.name.clone(),
                    kind: def.kind,
                });
            }

            match def.kind {
                OptionKind::String => {
                    let default = def.typed_default(|v| v.as_str().map(str::to_string))?;
                    spec.insert(&name, def.configure(string(), default));
                }
                OptionKind::Flag => {
                    let default = def.typed_default(serde_json::Value::as_bool)?;
                    spec.insert(&name, def.configure(flag(), default));
                }
                OptionKind::Int => {
                    let default = def.typed_default(serde_json::Value::as_u64)?;
                    spec.insert(&name, def.configure(int(), default));
                }
                OptionKind::OneOf => {
                    if def.values.is_empty() {
                        return Err(SchemaError::NoValues(def.name.clone()));
                    }
                    let default = def.typed_default(|v| v.as_str().map(str::to_string))?;
                    if let Some(d) = &default
                        && !def.values.contains(d)
                    {
                        return Err(SchemaError::DefaultNotAllowed {
                            name: def.name.clone(),
                            default: d.clone(),
                        });
                    }
                    let handler = one_of(def.values.iter().cloned());
                    spec.insert(&name, def.configure(handler, default));
                }
            }
        }

        Ok(spec)
    }
}

impl OptionDef {
    fn typed_default<T>(
        &self,
        convert: impl Fn(&serde_json::Value) -> Option<T>,
    ) -> Result<Option<T>, SchemaError> {
        match &self.default {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(raw) => convert(raw).map(Some).ok_or_else(|| SchemaError::DefaultType {
                name: self.name.clone(),
                kind: self.kind,
                default: raw.clone(),
            }),
        }
    }

    fn configure<T>(&self, handler: Handler<T>, default: Option<T>) -> Handler<T>
    where
        T: Clone + Into<Value> + 'static,
    {
        let mut handler = handler.alias(self.aliases.iter().map(|a| camel_case(a)));
        if let Some(default) = default {
            handler = handler.default(default);
        }
        if let Some(text) = &self.help {
            handler = handler.help(text.clone());
        }
        if let Some(arg_name) = &self.arg_name {
            handler = handler.arg_name(arg_name.clone());
        }
        handler
    }
}
