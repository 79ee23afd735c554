//! The `spritemill build` command: the full pipeline composition.

use clap::Args;
use spritemill_core::{BuildOptions, Config, ExportOptions, NormalizeOptions};
use std::path::PathBuf;

use super::types::{DataFormatArg, SheetLayoutArg};
use super::{finish, make_pipeline};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Sprite file to build
    #[arg(required = true)]
    pub input: PathBuf,

    /// Directory to write per-tag sheets and metadata to
    #[arg(required = true)]
    pub export_dir: PathBuf,

    /// Where to write the intermediate normalized sprite
    /// (defaults to `<stem>_normalized.<ext>` beside the input)
    #[arg(long)]
    pub temp_output: Option<PathBuf>,

    /// Target frame duration in milliseconds (defaults to the config value)
    #[arg(long)]
    pub target_ms: Option<u32>,

    /// Disable auto-cropping of transparent borders
    #[arg(long)]
    pub no_auto_crop: bool,

    /// Sheet packing layout (defaults to the config value)
    #[arg(long, value_enum)]
    pub sheet_layout: Option<SheetLayoutArg>,

    /// Side-car metadata format (defaults to the config value)
    #[arg(long, value_enum)]
    pub data_format: Option<DataFormatArg>,

    /// Print the envelope as a single line instead of pretty JSON
    #[arg(long)]
    pub compact: bool,
}

impl BuildArgs {
    /// Resolve CLI flags against config defaults.
    pub(crate) fn options(&self, config: &Config) -> BuildOptions {
        BuildOptions {
            temp_output: self.temp_output.clone(),
            normalize: NormalizeOptions {
                save_output: None,
                target_ms: self.target_ms.unwrap_or(config.normalize.target_ms),
                auto_crop: if self.no_auto_crop {
                    false
                } else {
                    config.normalize.auto_crop
                },
            },
            export: ExportOptions {
                sheet_layout: self
                    .sheet_layout
                    .map(Into::into)
                    .unwrap_or(config.export.sheet_layout),
                data_format: self
                    .data_format
                    .map(Into::into)
                    .unwrap_or(config.export.data_format),
            },
        }
    }
}

/// Execute the build command.
pub async fn execute(args: BuildArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = make_pipeline(config);
    let options = args.options(config);
    let result = pipeline.build(&args.input, &args.export_dir, options).await;
    finish(result, args.compact)
}
