mod spec_file;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::spec_file::load_spec_file;

#[derive(Parser)]
#[command(name = "argot")]
#[command(version, about = "Inspect and exercise argot option specs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how tokens are classified into options and values
    Tokenize(TokenizeArgs),

    /// Parse tokens against a spec file and print the result as JSON
    Parse(ParseArgs),

    /// Print the help text generated from a spec file
    Usage(UsageArgs),
}

#[derive(Parser)]
struct TokenizeArgs {
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Tokens to classify (pass them after `--`)
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the JSON spec file
    #[arg(short, long, value_name = "FILE")]
    spec: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Tokens to parse (pass them after `--`)
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct UsageArgs {
    /// Path to the JSON spec file
    #[arg(short, long, value_name = "FILE")]
    spec: PathBuf,

    /// Command name shown in the usage line (default: spec `name` or file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Text shown above the usage line (default: spec `synopsis`)
    #[arg(long)]
    synopsis: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize(args) => tokenize_command(args),
        Commands::Parse(args) => parse_command(args),
        Commands::Usage(args) => usage_command(args),
    }
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn tokenize_command(args: TokenizeArgs) -> Result<()> {
    tracing::debug!(tokens = args.tokens.len(), "executing tokenize command");

    let tokens = argot::tokenize(&args.tokens);
    print_json(&tokens, args.pretty)
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let loaded = load_spec_file(&args.spec)?;
    let parser = argot::compile(loaded.spec);
    let matches = parser.parse(&args.tokens);

    print_json(&matches, args.pretty)?;

    if !matches.is_ok() {
        for err in &matches.errors {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn usage_command(args: UsageArgs) -> Result<()> {
    tracing::debug!("executing usage command");

    let loaded = load_spec_file(&args.spec)?;
    let name = args.name.unwrap_or_else(|| loaded.command_name());
    let synopsis = args
        .synopsis
        .unwrap_or_else(|| loaded.file.synopsis.clone());

    let parser = argot::compile(loaded.spec);
    println!("{}", argot::usage(&name, &synopsis, parser.spec()));

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
