//! spritemill CLI - character sprite pipeline over an external engine.
//!
//! Drives Aseprite in batch mode through discrete pipeline stages and
//! prints each stage's uniform JSON envelope to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Inspect a sprite's frame timing and tag metadata
//! spritemill analyze hero.aseprite
//!
//! # Auto-crop and flatten frame durations to 100ms
//! spritemill normalize hero.aseprite --target-ms 100
//!
//! # One packed sheet + JSON per animation tag
//! spritemill export hero.aseprite ./export
//!
//! # The full composition: analyze, normalize, export
//! spritemill build hero.aseprite ./export
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// spritemill - character sprite pipeline: analyze, normalize, export.
#[derive(Parser, Debug)]
#[command(name = "spritemill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a sprite's frame timing and tag metadata
    Analyze(cli::analyze::AnalyzeArgs),

    /// Auto-crop and rewrite frame durations to a uniform target
    Normalize(cli::normalize::NormalizeArgs),

    /// Export one tag-scoped sheet + metadata pair per animation tag
    Export(cli::export::ExportArgs),

    /// Run the full pipeline: analyze, normalize, export
    Build(cli::build::BuildArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match spritemill_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `spritemill config path`."
            );
            spritemill_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("spritemill v{}", spritemill_core::VERSION);

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args, &config).await,
        Commands::Normalize(args) => cli::normalize::execute(args, &config).await,
        Commands::Export(args) => cli::export::execute(args, &config).await,
        Commands::Build(args) => cli::build::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
