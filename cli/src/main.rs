use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cli_grammar_core::{GrammarConfig, GrammarError, ParseResult};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "grammar-check")]
#[command(about = "Check command-line grammar files and parse tokens against them")]
#[command(version, disable_help_subcommand = true)]
struct Cli {
    /// Emit debug logs on stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the help text declared by a grammar file.
    Help(HelpArgs),
    /// Print the version line declared by a grammar file.
    Version(GrammarArgs),
    /// Check that every declaration in a grammar file is valid.
    Validate(GrammarArgs),
    /// Parse tokens (without the program name) against a grammar file.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct GrammarArgs {
    /// JSON or YAML grammar file.
    #[arg(long)]
    grammar: PathBuf,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// JSON or YAML grammar file.
    #[arg(long)]
    grammar: PathBuf,
    /// Print help for this subcommand instead of the top level.
    #[arg(long)]
    command: Option<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// JSON or YAML grammar file.
    #[arg(long)]
    grammar: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Tokens to parse, given after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Help(args) => run_help(args),
        Command::Version(args) => run_version(args),
        Command::Validate(args) => run_validate(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_grammar(path: &Path) -> Result<cli_grammar_core::Parser, String> {
    let config = GrammarConfig::load(path)
        .map_err(|err| format!("Failed to load grammar '{}': {err}", path.display()))?;
    let parser = config
        .build()
        .map_err(|err| format!("Invalid grammar '{}': {err}", path.display()))?;
    debug!(path = %path.display(), name = %parser.info().name, "Built grammar");
    Ok(parser)
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let parser = load_grammar(&args.grammar)?;
    match args.command {
        Some(name) => {
            let text = parser
                .subcommand_help_text(&name)
                .map_err(|e| e.to_string())?;
            print!("{text}");
        }
        None => parser.help(),
    }
    Ok(())
}

fn run_version(args: GrammarArgs) -> Result<(), String> {
    load_grammar(&args.grammar)?.version();
    Ok(())
}

fn run_validate(args: GrammarArgs) -> Result<(), String> {
    let parser = load_grammar(&args.grammar)?;
    let registry = parser.registry();
    let nested: usize = registry
        .subcommands()
        .iter()
        .map(|s| s.scope().arguments().len() + s.scope().options().len())
        .sum();

    info!(path = %args.grammar.display(), "Grammar is valid");
    println!(
        "Validated grammar '{}': {} argument(s), {} option(s), {} subcommand(s) with {} nested declaration(s).",
        parser.info().name,
        registry.scope().arguments().len(),
        registry.scope().options().len(),
        registry.subcommands().len(),
        nested,
    );
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let mut parser = load_grammar(&args.grammar)?;

    let outcome = parser.parse_tokens(&args.tokens).cloned();
    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            if let Some(usage) = usage_line(&parser.help_text()) {
                eprintln!("{usage}");
            }
            return Err(describe_parse_error(&err));
        }
    };

    println!("{}", format_result(&result, args.format)?);
    Ok(())
}

fn usage_line(help: &str) -> Option<&str> {
    help.lines().find(|line| line.starts_with("usage:"))
}

fn describe_parse_error(err: &GrammarError) -> String {
    match err {
        GrammarError::NoArguments => "no tokens given; pass them after `--`".to_string(),
        other => other.to_string(),
    }
}

fn format_result(result: &ParseResult, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(result).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}
