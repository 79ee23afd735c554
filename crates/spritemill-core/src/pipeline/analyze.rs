//! The analyze stage: metadata extraction plus the pure analysis engine.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::analysis::{self, AnalysisResult};

use super::stage::{Stage, StageResult};
use super::CharacterPipeline;

/// Payload of a successful analyze stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePayload {
    /// The engine command that produced the metadata
    pub command: String,
    /// Absolutized input path
    pub input_file: PathBuf,
    /// The diagnostic report
    pub analysis: AnalysisResult,
    /// Trimmed engine stdout
    pub stdout: String,
    /// Trimmed engine stderr
    pub stderr: String,
}

impl CharacterPipeline {
    /// Analyze a sprite: extract a fresh metadata snapshot and run the pure
    /// analysis over it. Always reads the original input file.
    pub async fn analyze(&self, input: &Path) -> StageResult<AnalyzePayload> {
        let input_abs = match self.resolve_input(input) {
            Ok(path) => path,
            Err(detail) => return StageResult::failure(Stage::Analyze, detail),
        };

        tracing::debug!("Analyzing sprite: {}", input_abs.display());

        let extraction = match self.engine().extract_metadata(&input_abs).await {
            Ok(extraction) => extraction,
            Err(e) => {
                return StageResult::failure(
                    Stage::Analyze,
                    format!("Character analysis failed: {e}"),
                )
            }
        };

        if !extraction.invocation.succeeded() {
            return StageResult::failure(
                Stage::Analyze,
                format!(
                    "Engine reported an error while reading metadata: {}",
                    extraction.invocation.stderr.trim()
                ),
            );
        }

        let analysis = analysis::analyze(&input_abs, &extraction.metadata);
        tracing::debug!(
            "Analysis complete: {} tags, {} warnings",
            analysis.tags.len(),
            analysis.warnings.len()
        );

        StageResult::success(
            Stage::Analyze,
            AnalyzePayload {
                command: extraction.invocation.command,
                input_file: input_abs,
                analysis,
                stdout: extraction.invocation.stdout.trim().to_string(),
                stderr: extraction.invocation.stderr.trim().to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fake::{FakeCall, FakeEngine};
    use crate::types::{FrameRecord, PlaybackDirection, SpriteMetadata, TagRange};
    use std::sync::Arc;

    fn sample_metadata() -> SpriteMetadata {
        SpriteMetadata {
            frames: vec![FrameRecord { duration_ms: 100 }; 4],
            canvas_width: 32,
            canvas_height: 32,
            tags: vec![TagRange {
                name: "Idle".to_string(),
                from_frame: 0,
                to_frame: 3,
                direction: PlaybackDirection::Forward,
            }],
            layers: vec!["Body".to_string()],
            color_mode: Some("RGBA8888".to_string()),
        }
    }

    #[tokio::test]
    async fn test_analyze_produces_report_from_fresh_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hero.aseprite");
        std::fs::write(&input, b"").unwrap();

        let engine = Arc::new(FakeEngine::with_metadata(sample_metadata()));
        let pipeline = CharacterPipeline::new(engine.clone());

        let result = pipeline.analyze(&input).await;
        assert!(result.succeeded());

        let payload = result.payload().unwrap();
        assert_eq!(payload.analysis.sprite.frames, 4);
        assert_eq!(payload.analysis.tags.len(), 1);
        assert!(payload.command.starts_with("fake"));

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], FakeCall::Extract(_)));
    }

    #[tokio::test]
    async fn test_extraction_error_becomes_stage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hero.aseprite");
        std::fs::write(&input, b"").unwrap();

        let engine = Arc::new(
            FakeEngine::with_metadata(sample_metadata()).with_extract_error("binary missing"),
        );
        let pipeline = CharacterPipeline::new(engine);

        let result = pipeline.analyze(&input).await;
        assert!(!result.succeeded());
        assert_eq!(result.stage(), Stage::Analyze);
        let detail = result.failure_detail().unwrap();
        assert!(detail.contains("Character analysis failed"));
        assert!(detail.contains("binary missing"));
    }
}
