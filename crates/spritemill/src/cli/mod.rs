//! CLI command handlers.

pub mod analyze;
pub mod build;
pub mod config;
pub mod export;
pub mod normalize;
pub mod types;

use serde::Serialize;
use std::sync::Arc;

use spritemill_core::{AsepriteEngine, CharacterPipeline, Config, EnvelopeWriter, StageResult};

/// Build the pipeline over the configured Aseprite engine.
pub(crate) fn make_pipeline(config: &Config) -> CharacterPipeline {
    CharacterPipeline::new(Arc::new(AsepriteEngine::new(&config.engine)))
}

/// Print a stage envelope to stdout and exit nonzero when the stage failed.
///
/// The envelope always goes out, success or failure; the exit code is how
/// shell callers observe the failure without parsing JSON.
pub(crate) fn finish<T: Serialize>(result: StageResult<T>, compact: bool) -> anyhow::Result<()> {
    let mut writer = EnvelopeWriter::new(std::io::stdout().lock(), !compact);
    writer.write(&result)?;

    if !result.succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
