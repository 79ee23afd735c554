//! The `spritemill analyze` command.

use clap::Args;
use spritemill_core::Config;
use std::path::PathBuf;

use super::{finish, make_pipeline};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Sprite file to analyze
    #[arg(required = true)]
    pub input: PathBuf,

    /// Print the envelope as a single line instead of pretty JSON
    #[arg(long)]
    pub compact: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = make_pipeline(config);
    let result = pipeline.analyze(&args.input).await;
    finish(result, args.compact)
}
