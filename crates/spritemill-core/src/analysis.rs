//! Pure metadata analysis: sprite metadata in, diagnostic report out.
//!
//! `analyze` never fails and performs no I/O. Missing frames, empty tag
//! lists, and inverted ranges all degrade to reported issues or zero-valued
//! fields instead of errors, so a broken sprite still yields a usable report.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::SpriteMetadata;

/// Canonical animation tags every character sprite is expected to define.
pub const RECOMMENDED_TAGS: [&str; 3] = ["Idle", "Walk", "Attack"];

/// A per-tag diagnostic issue.
///
/// Serializes to the wire strings downstream tooling matches on
/// (`missing_frame_index_<i>`, `duration_inconsistent`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagIssue {
    /// The tag's range references a frame index outside the frame list
    MissingFrameIndex(usize),
    /// Frame durations within the tag are not all equal
    DurationInconsistent,
}

impl fmt::Display for TagIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagIssue::MissingFrameIndex(index) => write!(f, "missing_frame_index_{index}"),
            TagIssue::DurationInconsistent => write!(f, "duration_inconsistent"),
        }
    }
}

impl Serialize for TagIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Diagnostics for a single animation tag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAnalysis {
    /// Tag name
    pub name: String,
    /// Frame count the range declares (zero for an inverted range)
    pub frames: usize,
    /// First frame index
    pub from: usize,
    /// Last frame index
    pub to: usize,
    /// Durations of the frames actually found, in range order
    pub duration_pattern: Vec<u32>,
    /// Issues detected while walking the range
    pub issues: Vec<TagIssue>,
}

/// Canvas-level summary of the analyzed sprite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteSummary {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Total frame count
    pub frames: usize,
    /// Pixel format, if the engine reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    /// Layer names, if the engine listed them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<String>,
}

/// The full diagnostic report for one sprite metadata snapshot.
///
/// Derived deterministically from a single `SpriteMetadata`; never mutated
/// after construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Source sprite file the metadata was extracted from
    pub file: PathBuf,
    /// Canvas summary
    pub sprite: SpriteSummary,
    /// Per-tag diagnostics, one entry per tag range
    pub tags: Vec<TagAnalysis>,
    /// Human-readable warnings
    pub warnings: Vec<String>,
    /// Suggested follow-up actions
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Whether any tag carries a `duration_inconsistent` issue.
    pub fn has_inconsistent_durations(&self) -> bool {
        self.tags
            .iter()
            .any(|t| t.issues.contains(&TagIssue::DurationInconsistent))
    }
}

/// Analyze a sprite metadata snapshot.
///
/// Walks every tag range, collecting the duration pattern and recording a
/// `missing_frame_index_<i>` issue for each index that falls outside the
/// frame list (the scan continues past missing frames). Flags
/// `duration_inconsistent` when a tag's collected durations disagree, then
/// checks the recommended-tag checklist and assembles global warnings and
/// recommendations.
pub fn analyze(source_file: &Path, metadata: &SpriteMetadata) -> AnalysisResult {
    let mut tag_analyses = Vec::with_capacity(metadata.tags.len());
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    for tag in &metadata.tags {
        let mut duration_pattern = Vec::new();
        let mut issues = Vec::new();

        // Inverted ranges produce an empty index iterator: no durations,
        // no issues.
        for index in tag.frame_indices() {
            match metadata.frame(index) {
                Some(frame) => duration_pattern.push(frame.duration_ms),
                None => issues.push(TagIssue::MissingFrameIndex(index)),
            }
        }

        if duration_pattern.len() > 1 {
            let first = duration_pattern[0];
            if duration_pattern.iter().any(|&d| d != first) {
                issues.push(TagIssue::DurationInconsistent);
            }
        }

        tag_analyses.push(TagAnalysis {
            name: tag.name.clone(),
            frames: tag.frame_count(),
            from: tag.from_frame,
            to: tag.to_frame,
            duration_pattern,
            issues,
        });
    }

    for recommended in RECOMMENDED_TAGS {
        let exists = metadata
            .tags
            .iter()
            .any(|tag| tag.name.eq_ignore_ascii_case(recommended));
        if !exists {
            warnings.push(format!("Missing recommended animation tag: {recommended}"));
        }
    }

    if metadata.tags.is_empty() {
        warnings.push("No frame tags found. Consider defining Idle/Walk/Attack tags.".to_string());
        recommendations
            .push("Define basic animation tags like Idle, Walk, and Attack.".to_string());
    }

    if tag_analyses
        .iter()
        .any(|t| t.issues.contains(&TagIssue::DurationInconsistent))
    {
        warnings.push("Some tags have inconsistent frame durations.".to_string());
        recommendations.push("Normalize frame durations for smoother animations.".to_string());
    }

    AnalysisResult {
        file: source_file.to_path_buf(),
        sprite: SpriteSummary {
            width: metadata.canvas_width,
            height: metadata.canvas_height,
            frames: metadata.frame_count(),
            color_mode: metadata.color_mode.clone(),
            layers: metadata.layers.clone(),
        },
        tags: tag_analyses,
        warnings,
        recommendations,
    }
}
