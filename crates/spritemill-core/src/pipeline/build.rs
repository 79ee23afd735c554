//! The build orchestrator: analyze, normalize, export as one composition.
//!
//! Modeled as an explicit state machine. Each phase carries the payloads
//! accumulated so far, so reaching the end state proves all three stages
//! ran; the first failing stage short-circuits into the returned failure
//! with its detail forwarded verbatim.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::artifact;
use super::analyze::AnalyzePayload;
use super::export::{ExportOptions, ExportPayload};
use super::normalize::{NormalizeOptions, NormalizePayload};
use super::stage::{Stage, StageResult};
use super::CharacterPipeline;

/// Options for the build orchestrator.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Where to write the intermediate normalized sprite; defaults to
    /// `<stem>_normalized.<ext>` beside the input
    pub temp_output: Option<PathBuf>,
    /// Normalize-stage options (`save_output` is ignored; `temp_output`
    /// decides the intermediate path)
    pub normalize: NormalizeOptions,
    /// Export-stage options
    pub export: ExportOptions,
}

/// Payload of a successful build: the composite of all three stages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPayload {
    /// Absolutized original input path
    pub input_file: PathBuf,
    /// The normalized intermediate artifact
    pub normalized_file: PathBuf,
    /// Directory the export artifacts were written to
    pub export_dir: PathBuf,
    pub analyze: AnalyzePayload,
    pub normalize: NormalizePayload,
    pub export: ExportPayload,
}

/// Build-machine phases. Done and failed states are terminal returns in
/// `build`; each intermediate phase owns the payloads produced so far.
enum BuildPhase {
    Analyze,
    Normalize {
        analyze: AnalyzePayload,
    },
    Export {
        analyze: AnalyzePayload,
        normalize: NormalizePayload,
    },
}

impl CharacterPipeline {
    /// Run the full pipeline: analyze the original input, normalize it, and
    /// export the normalized artifact, short-circuiting on the first failed
    /// stage.
    ///
    /// Analyze always reads the original, unmodified input; the normalized
    /// file is threaded as the export's input. No stage is retried.
    pub async fn build(
        &self,
        input: &Path,
        export_dir: &Path,
        options: BuildOptions,
    ) -> StageResult<BuildPayload> {
        let input_abs = match self.resolve_input(input) {
            Ok(path) => path,
            Err(detail) => return StageResult::failure(Stage::Build, detail),
        };

        let normalized_file = options
            .temp_output
            .clone()
            .unwrap_or_else(|| artifact::normalized_output_path(&input_abs));

        tracing::debug!(
            "Building {} -> {} (via {})",
            input_abs.display(),
            export_dir.display(),
            normalized_file.display()
        );

        let mut phase = BuildPhase::Analyze;
        loop {
            phase = match phase {
                BuildPhase::Analyze => {
                    match self.analyze(&input_abs).await.into_outcome() {
                        Ok(analyze) => BuildPhase::Normalize { analyze },
                        Err(failure) => return StageResult::forwarded(Stage::Build, failure),
                    }
                }

                BuildPhase::Normalize { analyze } => {
                    let normalize_options = NormalizeOptions {
                        save_output: Some(normalized_file.clone()),
                        target_ms: options.normalize.target_ms,
                        auto_crop: options.normalize.auto_crop,
                    };
                    match self
                        .normalize(&input_abs, normalize_options)
                        .await
                        .into_outcome()
                    {
                        Ok(normalize) => BuildPhase::Export { analyze, normalize },
                        Err(failure) => return StageResult::forwarded(Stage::Build, failure),
                    }
                }

                BuildPhase::Export { analyze, normalize } => {
                    match self
                        .export(&normalized_file, export_dir, options.export)
                        .await
                        .into_outcome()
                    {
                        Ok(export) => {
                            return StageResult::success(
                                Stage::Build,
                                BuildPayload {
                                    input_file: input_abs,
                                    normalized_file,
                                    export_dir: export_dir.to_path_buf(),
                                    analyze,
                                    normalize,
                                    export,
                                },
                            )
                        }
                        Err(failure) => return StageResult::forwarded(Stage::Build, failure),
                    }
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fake::{FakeCall, FakeEngine};
    use crate::types::{FrameRecord, PlaybackDirection, SpriteMetadata, TagRange};
    use std::sync::Arc;

    fn tagged_metadata() -> SpriteMetadata {
        SpriteMetadata {
            frames: vec![FrameRecord { duration_ms: 100 }; 4],
            canvas_width: 48,
            canvas_height: 48,
            tags: vec![
                TagRange {
                    name: "Idle".to_string(),
                    from_frame: 0,
                    to_frame: 1,
                    direction: PlaybackDirection::Forward,
                },
                TagRange {
                    name: "Walk".to_string(),
                    from_frame: 2,
                    to_frame: 3,
                    direction: PlaybackDirection::Forward,
                },
            ],
            layers: vec![],
            color_mode: None,
        }
    }

    fn write_input(dir: &Path) -> PathBuf {
        let input = dir.join("hero.aseprite");
        std::fs::write(&input, b"").unwrap();
        input
    }

    #[tokio::test]
    async fn test_build_chains_all_three_stages() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let export_dir = dir.path().join("out");

        let engine = Arc::new(FakeEngine::with_metadata(tagged_metadata()).touching_outputs());
        let pipeline = CharacterPipeline::new(engine.clone());

        let result = pipeline
            .build(&input, &export_dir, BuildOptions::default())
            .await;
        assert!(result.succeeded());

        let payload = result.payload().unwrap();
        assert!(payload.analyze.analysis.sprite.frames > 0);
        assert!(payload.normalized_file.exists());
        assert_eq!(payload.export.generated.len(), 2);
        for entry in &payload.export.generated {
            assert!(entry.sheet_path.exists());
            assert!(entry.data_path.exists());
        }
    }

    #[tokio::test]
    async fn test_build_threads_normalized_artifact_into_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let temp_output = dir.path().join("hero_tmp.aseprite");

        let engine = Arc::new(FakeEngine::with_metadata(tagged_metadata()).touching_outputs());
        let pipeline = CharacterPipeline::new(engine.clone());

        let result = pipeline
            .build(
                &input,
                &dir.path().join("out"),
                BuildOptions {
                    temp_output: Some(temp_output.clone()),
                    ..BuildOptions::default()
                },
            )
            .await;
        assert!(result.succeeded());
        assert_eq!(result.payload().unwrap().normalized_file, temp_output);

        // Analyze extracted from the original; export extracted from the
        // normalized file.
        let extracts: Vec<_> = engine
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCall::Extract(path) => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(extracts.len(), 2);
        assert!(extracts[0].ends_with("hero.aseprite"));
        assert!(extracts[1].ends_with("hero_tmp.aseprite"));
    }

    #[tokio::test]
    async fn test_build_halts_on_normalize_failure_without_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());

        let engine = Arc::new(
            FakeEngine::with_metadata(tagged_metadata()).with_script_timeout(),
        );
        let pipeline = CharacterPipeline::new(engine.clone());

        let result = pipeline
            .build(&input, &dir.path().join("out"), BuildOptions::default())
            .await;
        assert!(!result.succeeded());
        assert_eq!(result.stage(), Stage::Build);
        assert!(result.failure_detail().unwrap().contains("timed out"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["failedStage"], "normalize");

        // One extract (analyze) + one script (normalize); export never ran.
        let calls = engine.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], FakeCall::Extract(_)));
        assert!(matches!(calls[1], FakeCall::Script { .. }));
    }

    #[tokio::test]
    async fn test_build_forwards_analyze_failure_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());

        let engine = Arc::new(
            FakeEngine::with_metadata(tagged_metadata()).with_extract_error("permission denied"),
        );
        let pipeline = CharacterPipeline::new(engine.clone());

        let result = pipeline
            .build(&input, &dir.path().join("out"), BuildOptions::default())
            .await;
        assert!(!result.succeeded());
        assert!(result.failure_detail().unwrap().contains("permission denied"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["failedStage"], "analyze");
        assert_eq!(engine.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_build_missing_input_fails_in_build_itself() {
        let engine = Arc::new(FakeEngine::with_metadata(tagged_metadata()));
        let pipeline = CharacterPipeline::new(engine.clone());

        let result = pipeline
            .build(
                Path::new("/nonexistent/hero.aseprite"),
                Path::new("/tmp/out"),
                BuildOptions::default(),
            )
            .await;
        assert!(!result.succeeded());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["failedStage"], "build");
        assert!(engine.calls().is_empty());
    }
}
