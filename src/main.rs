//! The `egg` CLI (§3 "CLI surface", §6 "External interfaces"): a thin
//! wrapper wiring the Tokenizer/Parser/lowering/Linker/Runtime pipeline
//! together behind three subcommands. The language itself has no CLI of its
//! own in spec.md — this is scaffolding so the crate is a runnable program,
//! not a feature of egg.

mod cli_error;
mod config;
mod logger;
mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli_error::CliError;
use config::EggConfig;
use logger::ColoredLogger;

/// egg — a small, gradually-typed imperative scripting language.
#[derive(Parser, Debug)]
#[command(name = "egg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize, link, and run egg scripts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose operational logging (parse timings, stage entry/exit).
    #[arg(short, long, global = true, env = "EGG_VERBOSE")]
    verbose: bool,

    /// Disable colored diagnostic output.
    #[arg(long, global = true, env = "EGG_NO_COLOR")]
    no_color: bool,

    /// Path to a `.egg.toml` config file (defaults to `./.egg.toml` if present).
    #[arg(short, long, global = true, env = "EGG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a script to completion.
    Run(FileArgs),
    /// Run a script and check its `///>`/`///<` expected-output directives.
    Test(FileArgs),
    /// Dump the non-trivia token stream for a script (debugging aid).
    Tokens(FileArgs),
}

#[derive(Parser, Debug)]
struct FileArgs {
    /// Path to the `.egg` source file.
    path: PathBuf,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EggConfig::load(cli.config.as_deref())?;
    let color = !(cli.no_color || config.no_color);

    match cli.command {
        Commands::Run(args) => run(&args.path, color),
        Commands::Test(args) => test(&args.path),
        Commands::Tokens(args) => tokens(&args.path),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let _ = tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).try_init();
}

fn read_source(path: &PathBuf) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.clone(), source })
}

fn run(path: &PathBuf, color: bool) -> Result<(), CliError> {
    let source = read_source(path)?;
    let name = path.display().to_string();
    tracing::info!(file = %name, "running script");

    let mut logger = ColoredLogger::new(color);
    let ok = pipeline::run_source(&name, &source, &mut logger);
    if ok && !logger.had_errors {
        Ok(())
    } else {
        Err(CliError::Failed(format!("{name} did not run cleanly")))
    }
}

fn test(path: &PathBuf) -> Result<(), CliError> {
    let source = read_source(path)?;
    let name = path.display().to_string();
    tracing::info!(file = %name, "testing script");

    match egg_test_framework::run_script(&name, &source) {
        Ok(()) => {
            println!("ok: {name}");
            Ok(())
        }
        Err(failure) => Err(CliError::Failed(format!("{name}: {failure}"))),
    }
}

fn tokens(path: &PathBuf) -> Result<(), CliError> {
    let source = read_source(path)?;
    let name = path.display().to_string();

    match pipeline::dump_tokens(&name, &source) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        Err(message) => Err(CliError::Failed(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_subcommand() {
        let cli = Cli::parse_from(["egg", "run", "a.egg"]);
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn parses_test_subcommand() {
        let cli = Cli::parse_from(["egg", "test", "a.egg"]);
        assert!(matches!(cli.command, Commands::Test(_)));
    }

    #[test]
    fn parses_tokens_subcommand() {
        let cli = Cli::parse_from(["egg", "tokens", "a.egg"]);
        assert!(matches!(cli.command, Commands::Tokens(_)));
    }

    #[test]
    fn global_flags_are_order_independent() {
        let cli = Cli::parse_from(["egg", "--verbose", "--no-color", "run", "a.egg"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}
