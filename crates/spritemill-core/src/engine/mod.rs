//! Sprite engine collaborator boundary.
//!
//! The pipeline never talks to the external sprite editor directly; it goes
//! through the `SpriteEngine` trait so tests can substitute a scripted fake.
//! A timed-out invocation is data (`EngineInvocation::timed_out`), not an
//! error — errors are reserved for launch failures and unreadable output.

mod aseprite;
mod raw;

pub use aseprite::AsepriteEngine;
pub use raw::parse_sheet_json;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use std::path::Path;

use crate::error::EngineResult;
use crate::types::SpriteMetadata;

/// Captured output of one engine invocation.
#[derive(Debug, Clone, Default)]
pub struct EngineInvocation {
    /// The command line that was run, for diagnostics
    pub command: String,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Process exit code, if the process ran to completion
    pub exit_code: Option<i32>,
    /// Whether the invocation hit the configured timeout
    pub timed_out: bool,
}

impl EngineInvocation {
    /// Whether the engine ran to completion and reported success.
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// A metadata extraction: the parsed snapshot plus the invocation that
/// produced it.
#[derive(Debug, Clone)]
pub struct MetadataExtraction {
    /// Parsed sprite metadata
    pub metadata: SpriteMetadata,
    /// The underlying engine invocation
    pub invocation: EngineInvocation,
}

/// Trait for the external sprite-editing engine.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the pipeline holds an `Arc<dyn SpriteEngine>` for dynamic dispatch).
#[async_trait]
pub trait SpriteEngine: Send + Sync {
    /// Engine name for logging (e.g., "aseprite").
    fn name(&self) -> &str;

    /// Run one batch-mode engine invocation with the given arguments,
    /// bounded by the engine's configured timeout.
    async fn run(&self, args: &[String]) -> EngineResult<EngineInvocation>;

    /// Run a named engine-side script against `input` with `key=value`
    /// parameters.
    async fn run_script(
        &self,
        script: &str,
        input: &Path,
        params: &[(String, String)],
    ) -> EngineResult<EngineInvocation>;

    /// Extract a fresh metadata snapshot from a sprite file via a
    /// metadata-only invocation. No caching: every call re-reads the file.
    async fn extract_metadata(&self, input: &Path) -> EngineResult<MetadataExtraction>;
}
