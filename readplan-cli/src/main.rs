//! Readplan CLI - command line interface for reading plan files
//!
//! Parses, validates and previews Bible reading plans and writes the
//! JSON copy that gets uploaded to the plan store.

mod commands;

use clap::{Parser, Subcommand};
use readplan_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ExportArgs, ParseArgs, PreviewArgs, ValidateArgs};

/// Readplan: parse and check Bible reading plans
#[derive(Parser, Debug)]
#[command(name = "readplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Minimum distinct title languages (overrides config and env)
    #[arg(long, global = true)]
    min_languages: Option<usize>,

    /// Preview language preference, repeatable (overrides config and env)
    #[arg(long = "preview-language", global = true)]
    preview_languages: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Parse a plan file and print it as JSON
    #[command(visible_alias = "p")]
    Parse(ParseArgs),

    /// Check a plan file for structural and language problems
    #[command(visible_alias = "v")]
    Validate(ValidateArgs),

    /// Print a readable summary of a plan file
    Preview(PreviewArgs),

    /// Write a validated plan as JSON under its store path
    Export(ExportArgs),

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.min_languages, cli.preview_languages.clone())?;

    if cli.verbose {
        tracing::info!(
            min_languages = config.validation.min_languages,
            preview_languages = ?config.preview.languages,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("readplan {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Parse(args)) => {
            args.execute()?;
        }
        Some(Commands::Validate(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Preview(args)) => {
            args.execute(cli.verbose, &config)?;
        }
        Some(Commands::Export(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Config) => {
            println!("Readplan Configuration");
            println!("======================");
            println!();
            println!("Validation Settings:");
            println!("  min_languages: {}", config.validation.min_languages);
            println!(
                "  required_languages: {}",
                config.validation.required_languages.join(", ")
            );
            println!();
            println!("Preview Settings:");
            println!("  languages: {}", config.preview.languages.join(", "));
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Readplan - Bible reading plan parser and validator");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
