//! The export stage: one tag-scoped sheet plus side-car metadata per tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::artifact;
use super::stage::{Stage, StageResult};
use super::CharacterPipeline;

/// Sheet packing layout understood by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetLayout {
    #[default]
    Packed,
    Rows,
}

impl SheetLayout {
    /// The value passed to the engine's `--sheet-type` flag.
    pub fn as_engine_arg(&self) -> &'static str {
        match self {
            SheetLayout::Packed => "packed",
            SheetLayout::Rows => "rows",
        }
    }
}

impl fmt::Display for SheetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_engine_arg())
    }
}

/// Side-car metadata format understood by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataFormat {
    #[default]
    JsonHash,
    JsonArray,
}

impl DataFormat {
    /// The value passed to the engine's `--format` flag.
    pub fn as_engine_arg(&self) -> &'static str {
        match self {
            DataFormat::JsonHash => "json-hash",
            DataFormat::JsonArray => "json-array",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_engine_arg())
    }
}

/// Options for the export stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub sheet_layout: SheetLayout,
    pub data_format: DataFormat,
}

/// One exported tag: sheet image, side-car metadata, declared frame count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedTag {
    pub tag: String,
    pub sheet_path: PathBuf,
    pub data_path: PathBuf,
    pub frame_count: usize,
}

/// Payload of a successful export stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    /// Absolutized input path
    pub input_file: PathBuf,
    /// Directory the artifacts were written to
    pub export_dir: PathBuf,
    pub sheet_layout: SheetLayout,
    pub data_format: DataFormat,
    /// One entry per tag, in tag order
    pub generated: Vec<ExportedTag>,
}

impl CharacterPipeline {
    /// Export one tag-scoped sheet + metadata pair per animation tag.
    ///
    /// Per-tag invocations run strictly sequentially. The stage is
    /// all-or-nothing: the first failing tag fails the whole stage, with no
    /// partial-success reporting.
    pub async fn export(
        &self,
        input: &Path,
        export_dir: &Path,
        options: ExportOptions,
    ) -> StageResult<ExportPayload> {
        let input_abs = match self.resolve_input(input) {
            Ok(path) => path,
            Err(detail) => return StageResult::failure(Stage::Export, detail),
        };

        if let Err(e) = tokio::fs::create_dir_all(export_dir).await {
            return StageResult::failure(
                Stage::Export,
                format!(
                    "Could not create export directory {}: {e}",
                    export_dir.display()
                ),
            );
        }

        let extraction = match self.engine().extract_metadata(&input_abs).await {
            Ok(extraction) => extraction,
            Err(e) => {
                return StageResult::failure(Stage::Export, format!("Character export failed: {e}"))
            }
        };

        if !extraction.invocation.succeeded() {
            return StageResult::failure(
                Stage::Export,
                format!(
                    "Engine reported an error while reading metadata: {}",
                    extraction.invocation.stderr.trim()
                ),
            );
        }

        // Export without tags is meaningless: no sheet can be tag-scoped.
        if extraction.metadata.tags.is_empty() {
            return StageResult::failure(
                Stage::Export,
                "No tags found in sprite. Define animation tags before export.",
            );
        }

        let base = artifact::base_name(&input_abs);
        let mut generated = Vec::with_capacity(extraction.metadata.tags.len());

        for tag in &extraction.metadata.tags {
            let slug = artifact::tag_slug(&tag.name);
            let (sheet_path, data_path) = artifact::sheet_paths(export_dir, &base, &slug);

            tracing::debug!("Exporting tag \"{}\" -> {}", tag.name, sheet_path.display());

            let args = vec![
                "--batch".to_string(),
                input_abs.display().to_string(),
                "--tag".to_string(),
                tag.name.clone(),
                "--sheet".to_string(),
                sheet_path.display().to_string(),
                "--data".to_string(),
                data_path.display().to_string(),
                "--sheet-type".to_string(),
                options.sheet_layout.as_engine_arg().to_string(),
                "--format".to_string(),
                options.data_format.as_engine_arg().to_string(),
            ];

            let invocation = match self.engine().run(&args).await {
                Ok(invocation) => invocation,
                Err(e) => {
                    return StageResult::failure(
                        Stage::Export,
                        format!("Character export failed: {e}"),
                    )
                }
            };

            if invocation.timed_out {
                return StageResult::failure(
                    Stage::Export,
                    format!("Sheet export timed out for tag \"{}\"", tag.name),
                );
            }

            if !invocation.succeeded() {
                return StageResult::failure(
                    Stage::Export,
                    format!(
                        "Engine reported an error exporting tag \"{}\": {}",
                        tag.name,
                        invocation.stderr.trim()
                    ),
                );
            }

            generated.push(ExportedTag {
                tag: tag.name.clone(),
                sheet_path,
                data_path,
                frame_count: tag.frame_count(),
            });
        }

        StageResult::success(
            Stage::Export,
            ExportPayload {
                input_file: input_abs,
                export_dir: export_dir.to_path_buf(),
                sheet_layout: options.sheet_layout,
                data_format: options.data_format,
                generated,
            },
        )
    }
}
