//! The normalize stage: auto-crop and uniform frame durations.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::artifact;
use super::stage::{Stage, StageResult};
use super::CharacterPipeline;

/// Default target frame duration in milliseconds.
pub const DEFAULT_TARGET_MS: u32 = 100;

/// Engine-side script that rewrites frame durations and optionally crops
/// transparent borders.
pub const NORMALIZE_SCRIPT: &str = "character_normalize.lua";

/// Options for the normalize stage.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Output path; defaults to `<stem>_normalized.<ext>` beside the input
    pub save_output: Option<PathBuf>,
    /// Duration every frame is rewritten to
    pub target_ms: u32,
    /// Whether to crop transparent canvas borders first
    pub auto_crop: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            save_output: None,
            target_ms: DEFAULT_TARGET_MS,
            auto_crop: true,
        }
    }
}

/// Payload of a successful normalize stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizePayload {
    /// The engine command that was run
    pub command: String,
    /// Absolutized input path
    pub input_file: PathBuf,
    /// Where the normalized sprite was written
    pub output_file: PathBuf,
    /// Effective target duration
    pub target_ms: u32,
    /// Effective auto-crop setting
    pub auto_crop: bool,
    /// Trimmed engine stdout
    pub stdout: String,
    /// Trimmed engine stderr
    pub stderr: String,
}

impl CharacterPipeline {
    /// Normalize a sprite: rewrite every frame duration to
    /// `options.target_ms` and optionally auto-crop, persisting to the
    /// output path.
    pub async fn normalize(
        &self,
        input: &Path,
        options: NormalizeOptions,
    ) -> StageResult<NormalizePayload> {
        let input_abs = match self.resolve_input(input) {
            Ok(path) => path,
            Err(detail) => return StageResult::failure(Stage::Normalize, detail),
        };

        let output_file = options
            .save_output
            .unwrap_or_else(|| artifact::normalized_output_path(&input_abs));

        tracing::debug!(
            "Normalizing {} -> {} (target {}ms, auto-crop {})",
            input_abs.display(),
            output_file.display(),
            options.target_ms,
            options.auto_crop
        );

        let params = vec![
            ("saveOutput".to_string(), output_file.display().to_string()),
            ("targetMs".to_string(), options.target_ms.to_string()),
            ("autoCrop".to_string(), options.auto_crop.to_string()),
        ];

        let invocation = match self
            .engine()
            .run_script(NORMALIZE_SCRIPT, &input_abs, &params)
            .await
        {
            Ok(invocation) => invocation,
            Err(e) => {
                return StageResult::failure(
                    Stage::Normalize,
                    format!("Character normalization failed: {e}"),
                )
            }
        };

        if invocation.timed_out {
            return StageResult::failure(
                Stage::Normalize,
                "Engine script timed out while normalizing frame durations",
            );
        }

        if !invocation.succeeded() {
            return StageResult::failure(
                Stage::Normalize,
                format!(
                    "Engine reported an error while normalizing: {}",
                    invocation.stderr.trim()
                ),
            );
        }

        StageResult::success(
            Stage::Normalize,
            NormalizePayload {
                command: invocation.command,
                input_file: input_abs,
                output_file,
                target_ms: options.target_ms,
                auto_crop: options.auto_crop,
                stdout: invocation.stdout.trim().to_string(),
                stderr: invocation.stderr.trim().to_string(),
            },
        )
    }
}
