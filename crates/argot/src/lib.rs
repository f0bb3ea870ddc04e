//! Declarative command-line option parsing.
//!
//! A [`Spec`] maps option names to [`Handler`]s. [`compile`] binds a spec into
//! a reusable [`Parser`], which turns argv into [`Matches`]: typed option
//! values, positional arguments and error messages.
//!
//! Parsing is total: bad input never aborts a parse, it produces entries in
//! [`Matches::errors`] and the caller decides what to do with them.
//!
//! ```
//! use argot::{Spec, compile, flag, int, string};
//!
//! let parser = compile(
//!     Spec::new()
//!         .option("port", int().default(8080).alias(["p"]))
//!         .option("host", string())
//!         .option("verbose", flag().alias(["v"])),
//! );
//!
//! let m = parser.parse(["-p", "3000", "-v", "site/"]);
//! assert!(m.is_ok());
//! assert_eq!(m.options.int("port"), Some(3000));
//! assert_eq!(m.options.str("host"), None);
//! assert!(m.options.flag("verbose"));
//! assert!(!m.options.flag("help"));
//! assert_eq!(m.args, ["site/"]);
//! ```
//!
//! Syntax:
//! - `--some-name` is an option, looked up as `someName`.
//! - `-x` is a short option; `-xyz` is an error (no bundling).
//! - `-` alone is a positional value.
//! - `--` ends option parsing; everything after it is positional.
//! - Values always follow as a separate token: `--opt=value` and `-ovalue`
//!   are not split.

pub mod element;
pub mod error;
pub mod handler;
pub mod parser;
pub mod spec;
pub mod tokenize;
pub mod usage;
pub mod value;

pub use element::Element;
pub use error::ParseError;
pub use handler::{
    Consumed, Handler, HandlerError, HandlerResult, Help, flag, int, one_of, string,
};
pub use parser::{Matches, Options, Parser, compile, parse};
pub use spec::{HELP_OPTION, Spec};
pub use tokenize::{Tokens, tokenize};
pub use usage::usage;
pub use value::{FromValue, Value};
