mod config;

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use serde::Serialize;
use term_json_parsers::{Category, OutputFormat, OutputStyle, format_output, parse, parsers};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::OutputSettings;

#[derive(Debug, Parser)]
#[command(name = "term-json", version)]
#[command(about = "Convert the output of common Unix commands to JSON")]
#[command(after_help = "Example:\n  df -k | term-json df\n  term-json uptime \"$(uptime)\"")]
struct Cli {
    /// Parser to use, named after the command that produced the input.
    #[arg(required_unless_present = "list")]
    parser: Option<String>,
    /// Command output to parse. Read from stdin when omitted.
    #[arg(conflicts_with = "input_file")]
    input: Option<String>,
    /// Read command output from a file instead of stdin.
    #[arg(short = 'i', long)]
    input_file: Option<PathBuf>,
    /// Output format (default: json, or the config file's value).
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Print JSON on a single line.
    #[arg(long, overrides_with = "pretty")]
    compact: bool,
    /// Print indented JSON, even when the config file asks for compact.
    #[arg(long, overrides_with = "compact")]
    pretty: bool,
    /// YAML file with output defaults (`format`, `compact`).
    #[arg(long)]
    config: Option<PathBuf>,
    /// List the available parsers and exit.
    #[arg(long)]
    list: bool,
    /// Log to stderr (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct ParserInfo {
    name: &'static str,
    category: Category,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let settings = match &cli.config {
        Some(path) => OutputSettings::load(path)
            .map_err(|err| format!("{}: {err}", path.display()))?,
        None => OutputSettings::default(),
    }
    .with_overrides(cli.format, compact_flag(cli.compact, cli.pretty));
    let style = if settings.compact {
        OutputStyle::Compact
    } else {
        OutputStyle::Pretty
    };

    if cli.list {
        // Plain text unless a format was asked for on the command line.
        return run_list(cli.format.map(|format| (format, style)));
    }

    let Some(parser) = cli.parser.as_deref() else {
        return Err("missing parser name (see --list)".to_string());
    };
    let input = read_input(cli.input, cli.input_file)?;
    debug!(parser, bytes = input.len(), "Read input");

    let output = parse(parser, &input).map_err(|err| err.to_string())?;
    let rendered =
        format_output(&output, settings.format, style).map_err(|err| err.to_string())?;
    print_rendered(&rendered);
    Ok(())
}

/// `None` when neither flag was given, so the config file decides.
fn compact_flag(compact: bool, pretty: bool) -> Option<bool> {
    match (compact, pretty) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn run_list(structured: Option<(OutputFormat, OutputStyle)>) -> Result<(), String> {
    if let Some((format, style)) = structured {
        let infos: Vec<ParserInfo> = parsers()
            .iter()
            .map(|parser| ParserInfo {
                name: parser.name(),
                category: parser.category(),
            })
            .collect();
        let rendered = format_output(&infos, format, style).map_err(|err| err.to_string())?;
        print_rendered(&rendered);
        return Ok(());
    }

    for category in Category::ALL {
        let names: Vec<&str> = parsers()
            .iter()
            .filter(|parser| parser.category() == category)
            .map(|parser| parser.name())
            .collect();
        if names.is_empty() {
            continue;
        }
        println!("{category}:");
        for name in names {
            println!("  {name}");
        }
    }
    Ok(())
}

fn read_input(literal: Option<String>, file: Option<PathBuf>) -> Result<String, String> {
    if let Some(text) = literal {
        return Ok(text);
    }
    if let Some(path) = file {
        return fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    Ok(text)
}

/// YAML already ends with a newline, JSON does not.
fn print_rendered(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}
