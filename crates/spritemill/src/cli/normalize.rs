//! The `spritemill normalize` command.

use clap::Args;
use spritemill_core::{Config, NormalizeOptions};
use std::path::PathBuf;

use super::{finish, make_pipeline};

/// Arguments for the `normalize` command.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Sprite file to normalize
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to `<stem>_normalized.<ext>` beside the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target frame duration in milliseconds (defaults to the config value)
    #[arg(long)]
    pub target_ms: Option<u32>,

    /// Disable auto-cropping of transparent borders
    #[arg(long)]
    pub no_auto_crop: bool,

    /// Print the envelope as a single line instead of pretty JSON
    #[arg(long)]
    pub compact: bool,
}

impl NormalizeArgs {
    /// Resolve CLI flags against config defaults.
    pub(crate) fn options(&self, config: &Config) -> NormalizeOptions {
        NormalizeOptions {
            save_output: self.output.clone(),
            target_ms: self.target_ms.unwrap_or(config.normalize.target_ms),
            auto_crop: if self.no_auto_crop {
                false
            } else {
                config.normalize.auto_crop
            },
        }
    }
}

/// Execute the normalize command.
pub async fn execute(args: NormalizeArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = make_pipeline(config);
    let options = args.options(config);
    let result = pipeline.normalize(&args.input, options).await;
    finish(result, args.compact)
}
