//! Pipeline stages over the sprite engine collaborator.
//!
//! Each stage is a function from typed input to `StageResult<T>`: failures
//! of any kind (bad input, timeout, engine-reported error, violated
//! precondition) come back as failure envelopes, never as errors or panics.

pub mod artifact;
mod stage;

mod analyze;
mod build;
mod export;
mod normalize;

pub use analyze::AnalyzePayload;
pub use build::{BuildOptions, BuildPayload};
pub use export::{DataFormat, ExportOptions, ExportPayload, ExportedTag, SheetLayout};
pub use normalize::{NormalizeOptions, NormalizePayload, DEFAULT_TARGET_MS, NORMALIZE_SCRIPT};
pub use stage::{Stage, StageFailure, StageResult};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::SpriteEngine;

/// The character sprite pipeline: analyze, normalize, export, build.
///
/// Holds no state beyond the injected engine; every stage invocation derives
/// a fresh, fully-specified path set, so concurrent runs on different inputs
/// are safe by construction.
pub struct CharacterPipeline {
    engine: Arc<dyn SpriteEngine>,
}

impl CharacterPipeline {
    /// Create a pipeline over the given engine.
    pub fn new(engine: Arc<dyn SpriteEngine>) -> Self {
        Self { engine }
    }

    pub(crate) fn engine(&self) -> &dyn SpriteEngine {
        self.engine.as_ref()
    }

    /// Validate and absolutize a stage input path before any engine
    /// invocation.
    pub(crate) fn resolve_input(&self, input: &Path) -> Result<PathBuf, String> {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()));
        }
        Ok(std::fs::canonicalize(input).unwrap_or_else(|_| input.to_path_buf()))
    }
}
