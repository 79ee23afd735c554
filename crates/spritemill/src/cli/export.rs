//! The `spritemill export` command.

use clap::Args;
use spritemill_core::{Config, ExportOptions};
use std::path::PathBuf;

use super::types::{DataFormatArg, SheetLayoutArg};
use super::{finish, make_pipeline};

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Sprite file to export
    #[arg(required = true)]
    pub input: PathBuf,

    /// Directory to write per-tag sheets and metadata to
    #[arg(required = true)]
    pub export_dir: PathBuf,

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

impl ExportArgs {
    /// Resolve CLI flags against config defaults.
    pub(crate) fn options(&self, config: &Config) -> ExportOptions {
        ExportOptions {
            sheet_layout: self
                .sheet_layout
                .map(Into::into)
                .unwrap_or(config.export.sheet_layout),
            data_format: self
                .data_format
                .map(Into::into)
                .unwrap_or(config.export.data_format),
        }
    }
}

/// Execute the export command.
pub async fn execute(args: ExportArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = make_pipeline(config);
    let options = args.options(config);
    let result = pipeline.export(&args.input, &args.export_dir, options).await;
    finish(result, args.compact)
}
