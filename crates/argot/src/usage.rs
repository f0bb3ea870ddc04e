use crate::element::format_declared;
use crate::handler::Handler;
use crate::spec::Spec;
use crate::value::Value;

struct Row {
    canonical: String,
    left: String,
    desc: String,
}

fn build_row(name: &str, handler: &Handler<Value>) -> Row {
    let mut names: Vec<&str> = std::iter::once(name)
        .chain(handler.aliases().iter().map(String::as_str))
        .collect();
    names.sort_by_key(|n| n.chars().count());

    let mut left = names
        .iter()
        .map(|n| format_declared(n))
        .collect::<Vec<_>>()
        .join(" | ");

    let help = handler.help_info();
    let default = handler.default_value().filter(|v| v.is_truthy());

    if let Some(arg_name) = &help.arg_name {
        if default.is_some() {
            left.push_str(&format!(" [{arg_name}]"));
        } else {
            left.push_str(&format!(" <{arg_name}>"));
        }
    }

    let mut desc = help.text.clone().unwrap_or_else(|| name.to_string());
    if let Some(default) = default {
        desc.push_str(&format!(" (default {default})"));
    }

    Row {
        canonical: name.to_string(),
        left,
        desc,
    }
}

/// Render help text for `spec`.
///
/// One row per option, sorted by name. Each row lists the option and its
/// aliases (shortest first), the argument placeholder if the handler has one,
/// and the help text. Pass the effective spec (e.g. [`Parser::spec`] or
/// [`Matches::spec`]) to include the implicit `--help` row.
///
/// [`Parser::spec`]: crate::Parser::spec
/// [`Matches::spec`]: crate::Matches
pub fn usage(cli_name: &str, synopsis: &str, spec: &Spec) -> String {
    let mut rows: Vec<Row> = spec.iter().map(|(n, h)| build_row(n, h)).collect();
    rows.sort_by(|a, b| {
        a.canonical
            .to_lowercase()
            .cmp(&b.canonical.to_lowercase())
            .then_with(|| a.canonical.cmp(&b.canonical))
    });

    let width = rows
        .iter()
        .map(|r| r.left.chars().count())
        .max()
        .unwrap_or(0)
        .div_ceil(3)
        * 3;

    let mut out = String::new();
    out.push_str(synopsis.trim_end());
    out.push_str("\n\nUsage:\n");
    out.push_str(&format!("  {cli_name} [options] [arguments]\n"));
    out.push_str("\nOptions:");
    for row in rows {
        out.push_str(&format!("\n  {:width$} {}", row.left, row.desc));
    }
    out
}
