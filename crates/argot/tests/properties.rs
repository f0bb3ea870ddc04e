use std::sync::Arc;
use std::thread;

use argot::{Spec, Value, compile, flag, int, one_of, parse, string};

fn no_args() -> Vec<String> {
    Vec::new()
}

#[test]
fn no_input_yields_defaults() {
    let parser = compile(
        Spec::new()
            .option("name", string())
            .option("port", int().default(8080))
            .option("verbose", flag())
            .option("level", one_of(["low", "high"]).default("low".to_string())),
    );

    let m = parser.parse(no_args());
    assert_eq!(&m.options, parser.defaults());
    assert_eq!(m.options.get("help"), Some(&Value::Bool(false)));
    assert_eq!(m.options.get("name"), None);
    assert!(m.options.contains("name"));
    assert_eq!(m.options.int("port"), Some(8080));
    assert!(!m.options.flag("verbose"));
    assert_eq!(m.options.str("level"), Some("low"));
    assert!(m.args.is_empty());
    assert!(m.errors.is_empty());
}

#[test]
fn string_option_round_trip() {
    let m = parse(["--n", "v"], Spec::new().option("n", string()));
    assert_eq!(m.options.str("n"), Some("v"));
    assert!(m.args.is_empty());
    assert!(m.errors.is_empty());
}

#[test]
fn flags_never_consume_a_value() {
    let m = parse(["--flag", "value"], Spec::new().option("flag", flag()));
    assert!(m.options.flag("flag"));
    assert_eq!(m.args, ["value"]);
}

#[test]
fn alias_is_equivalent_to_canonical_name() {
    let parser = compile(Spec::new().option("n", string().alias(["a"])));
    assert_eq!(
        parser.parse(["--a", "v"]).options.get("n"),
        parser.parse(["--n", "v"]).options.get("n"),
    );

    let m = parser.parse(["--a"]);
    assert_eq!(m.errors.len(), 1);
    let message = m.errors[0].to_string();
    assert!(message.contains("--a"), "{message}");
    assert!(message.contains("(alias of -n)"), "{message}");
}

#[test]
fn end_of_options_freezes_option_parsing() {
    let parser = compile(Spec::new().option("foo", string()));

    let m = parser.parse(["--"]);
    assert!(m.args.is_empty());
    assert!(m.errors.is_empty());

    let m = parser.parse(["--", "--foo"]);
    assert_eq!(m.args, ["--foo"]);
    assert!(m.errors.is_empty());
    assert_eq!(m.options.str("foo"), None);

    // A handler never crosses `--` for its value.
    let m = parser.parse(["--foo", "--", "--foo"]);
    assert_eq!(m.args, ["--foo"]);
    assert_eq!(m.error_messages(), ["--foo: missing value for option"]);
}

#[test]
fn unknown_option_yields_one_error() {
    let parser = compile(Spec::new().option("port", int().default(1)));
    let m = parser.parse(["--bogus"]);
    assert_eq!(m.error_messages(), ["--bogus: unknown option"]);
    assert_eq!(&m.options, parser.defaults());
    assert!(m.args.is_empty());
}

#[test]
fn integer_validation_boundary() {
    let parser = compile(Spec::new().option("n", int()));

    let m = parser.parse(["--n", "007"]);
    assert_eq!(m.options.int("n"), Some(7));
    assert!(m.is_ok());

    for bad in ["12.5", "nope", "+5", "0x1f"] {
        let m = parser.parse(["--n", bad]);
        assert_eq!(m.error_messages(), ["--n: expected an integer"], "{bad}");
        assert_eq!(m.options.int("n"), None, "{bad}");
        // The refused value is not consumed.
        assert_eq!(m.args, [bad]);
    }
}

#[test]
fn negative_number_token_is_a_lexical_error_not_a_value() {
    // `-1` reads as a one-character short option, so `--n` sees no value.
    let m = parse(["--n", "-1"], Spec::new().option("n", int()));
    assert_eq!(
        m.error_messages(),
        ["--n: missing value for option", "-1: unknown option"]
    );

    // Behind `--` it is just a positional.
    let m = parse(["--n", "--", "-1"], Spec::new().option("n", int()));
    assert_eq!(m.error_messages(), ["--n: missing value for option"]);
    assert_eq!(m.args, ["-1"]);

    // A sign that does reach the handler is refused.
    let int_handler = int();
    let elements = [argot::Element::free("-1")];
    assert_eq!(
        int_handler.exec(&elements, 0),
        Err(argot::HandlerError::NotInt)
    );
}

#[test]
fn one_of_rejects_unknown_literal() {
    let m = parse(
        ["--v", "medium"],
        Spec::new().option("v", one_of(["low", "high"])),
    );
    assert_eq!(m.error_messages(), ["--v: expected one of the valid values"]);
    assert_eq!(m.options.get("v"), None);
}

#[test]
fn one_of_accepts_each_literal() {
    let parser = compile(Spec::new().option("verbose", one_of(["low", "medium", "high"])));
    for level in ["low", "medium", "high"] {
        assert_eq!(parser.parse(["--verbose", level]).options.str("verbose"), Some(level));
    }
}

#[test]
fn consecutive_malformed_options_each_error() {
    let m = parse(["--wrong", "--wrong"], Spec::new().option("wrong", string()));
    assert_eq!(
        m.error_messages(),
        [
            "--wrong: missing value for option",
            "--wrong: missing value for option",
        ]
    );
}

#[test]
fn dashed_names_are_camel_cased() {
    let m = parse(["--is-the-thing-on"], Spec::new().option("isTheThingOn", flag()));
    assert!(m.options.flag("isTheThingOn"));
    assert!(m.is_ok());
}

#[test]
fn caller_defined_help_replaces_the_implicit_one() {
    let m = parse(["--help", "topic"], Spec::new().option("help", string()));
    assert_eq!(m.options.str("help"), Some("topic"));

    // `-h` belonged to the implicit flag only.
    let m = parse(["-h"], Spec::new().option("help", string()));
    assert_eq!(m.error_messages(), ["-h: unknown option"]);
}

#[test]
fn result_carries_the_effective_spec() {
    let m = parse(no_args(), Spec::new().option("port", int()));
    assert_eq!(m.spec.names().collect::<Vec<_>>(), ["help", "port"]);
    assert_eq!(m.spec.get("help").unwrap().aliases(), ["h"]);
    assert!(m.usage("serve", "Serve things").contains("--port <int>"));
}

#[test]
fn compiled_parser_is_shared_across_threads() {
    let parser = Arc::new(compile(
        Spec::new()
            .option("id", int())
            .option("tag", string().alias(["t"])),
    ));

    let handles: Vec<_> = (0..8u64)
        .map(|n| {
            let parser = Arc::clone(&parser);
            thread::spawn(move || {
                let id = n.to_string();
                let tag = format!("t{n}");
                let m = parser.parse(["--id", id.as_str(), "-t", tag.as_str(), "rest"]);
                (n, m)
            })
        })
        .collect();

    for handle in handles {
        let (n, m) = handle.join().unwrap();
        assert!(m.is_ok());
        assert_eq!(m.options.int("id"), Some(n));
        assert_eq!(m.options.str("tag"), Some(format!("t{n}").as_str()));
        assert_eq!(m.args, ["rest"]);
    }

    assert_eq!(parser.defaults().int("id"), None);
}
