use serde::Serialize;

use crate::element::Element;
use crate::error::ParseError;

/// Output of [`tokenize`]: the element stream and any lexical errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tokens {
    pub elements: Vec<Element>,
    pub errors: Vec<ParseError>,
}

/// Classify raw argv tokens into [`Element`]s.
///
/// Tokens are trimmed and empty ones dropped. Before the first `--`:
/// - `--name` becomes an option (dash-separated words camel-cased),
/// - `-x` becomes a short option; `-xyz` is a lexical error and is dropped,
/// - a lone `-` and everything else is a free value.
///
/// After `--` every token is free, whatever it looks like.
pub fn tokenize<I, S>(argv: I) -> Tokens
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Tokens::default();
    let mut options_ended = false;

    for raw in argv {
        let arg = raw.as_ref().trim();
        if arg.is_empty() {
            continue;
        }

        if options_ended {
            tokens.elements.push(Element::free(arg));
            continue;
        }

        if arg == "--" {
            options_ended = true;
            tokens.elements.push(Element::EndOptions);
        } else if let Some(long) = arg.strip_prefix("--") {
            tokens.elements.push(Element::Option {
                name: camel_case(long),
                short: false,
                written: arg.to_string(),
            });
        } else if let Some(short) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
            if short.chars().count() > 1 {
                tokens.errors.push(ParseError::ShortOptionTooLong {
                    name: short.to_string(),
                });
            } else {
                tokens.elements.push(Element::short(short));
            }
        } else {
            tokens.elements.push(Element::free(arg));
        }
    }

    tracing::trace!(
        elements = tokens.elements.len(),
        errors = tokens.errors.len(),
        "tokenized argv"
    );
    tokens
}

/// `is-the-thing-on` -> `isTheThingOn`.
///
/// Only a dash between a non-dash and a letter is folded; leading dashes,
/// runs of dashes and trailing dashes are kept literally.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    // A leading dash follows the `--` prefix, so it counts as part of a run.
    let mut prev = Some('-');
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' && prev != Some('-') {
            let next = chars.peek().copied();
            if let Some(next) = next.filter(|n| n.is_alphabetic()) {
                chars.next();
                out.extend(next.to_uppercase());
                prev = Some(next);
                continue;
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(argv: &[&str]) -> Vec<Element> {
        let tokens = tokenize(argv);
        assert!(tokens.errors.is_empty(), "{:?}", tokens.errors);
        tokens.elements
    }

    #[test]
    fn empty_args() {
        assert_eq!(tokenize(Vec::<String>::new()), Tokens::default());
    }

    #[test]
    fn positional_args_are_trimmed() {
        assert_eq!(
            elements(&["foo", "bar", " baz "]),
            vec![
                Element::free("foo"),
                Element::free("bar"),
                Element::free("baz")
            ]
        );
    }

    #[test]
    fn blank_tokens_are_dropped() {
        assert_eq!(
            elements(&["", "a", "   ", "b", "\n", "c"]),
            vec![Element::free("a"), Element::free("b"), Element::free("c")]
        );
    }

    #[test]
    fn short_and_long_options() {
        assert_eq!(
            elements(&["rice", "--sausage", "french", "-f", "ries"]),
            vec![
                Element::free("rice"),
                Element::option("sausage"),
                Element::free("french"),
                Element::short("f"),
                Element::free("ries"),
            ]
        );
    }

    #[test]
    fn short_options_must_be_a_single_character() {
        let tokens = tokenize(["-foo", "-x"]);
        assert_eq!(tokens.elements, vec![Element::short("x")]);
        assert_eq!(
            tokens.errors,
            vec![ParseError::ShortOptionTooLong {
                name: "foo".to_string()
            }]
        );
        assert_eq!(
            tokens.errors[0].to_string(),
            "-foo: short options must only use a single character"
        );
    }

    #[test]
    fn lone_dash_is_free() {
        assert_eq!(elements(&["-"]), vec![Element::free("-")]);
    }

    #[test]
    fn double_dash_ends_options() {
        assert_eq!(
            elements(&["--foo", "--", "--foo", "-x", "--", "-abc"]),
            vec![
                Element::option("foo"),
                Element::EndOptions,
                Element::free("--foo"),
                Element::free("-x"),
                Element::free("--"),
                Element::free("-abc"),
            ]
        );
    }

    #[test]
    fn long_options_are_camel_cased() {
        assert_eq!(
            elements(&["--is-the-thing-on"]),
            vec![Element::Option {
                name: "isTheThingOn".to_string(),
                short: false,
                written: "--is-the-thing-on".to_string(),
            }]
        );
    }

    #[test]
    fn camel_case_keeps_odd_dashes() {
        assert_eq!(camel_case("is-cool"), "isCool");
        assert_eq!(camel_case("a--b"), "a--b");
        assert_eq!(camel_case("trailing-"), "trailing-");
        assert_eq!(camel_case("level-2"), "level-2");
        assert_eq!(camel_case("plain"), "plain");
        assert_eq!(camel_case("-foo"), "-foo");
        assert_eq!(camel_case("-foo-bar"), "-fooBar");
    }

    #[test]
    fn triple_dash_keeps_the_extra_dash() {
        assert_eq!(
            elements(&["---foo"]),
            vec![Element::Option {
                name: "-foo".to_string(),
                short: false,
                written: "---foo".to_string(),
            }]
        );
    }
}
