//! Core data types for the spritemill sprite pipeline.
//!
//! These types are the in-memory shape of a sprite's exported metadata:
//! frame timings, animation tag ranges, canvas size, layer names. Pure data,
//! extracted fresh from the engine for every stage invocation.

use serde::{Deserialize, Serialize};

/// Timing for a single sprite frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Display duration in milliseconds
    pub duration_ms: u32,
}

/// Playback direction of an animation tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDirection {
    #[default]
    Forward,
    Reverse,
    Pingpong,
    PingpongReverse,
}

/// One named animation clip as a contiguous frame interval.
///
/// Frame indices are 0-based into the sprite's frame list. Indices outside
/// the frame list are a detectable anomaly the analysis engine reports, not
/// a crash condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRange {
    /// Tag name; unique in practice but duplicates are tolerated
    pub name: String,
    /// First frame index (inclusive)
    pub from_frame: usize,
    /// Last frame index (inclusive)
    pub to_frame: usize,
    /// Playback direction
    pub direction: PlaybackDirection,
}

impl TagRange {
    /// Number of frames the tag spans.
    ///
    /// An inverted range (`from_frame > to_frame`) is treated as zero-length.
    pub fn frame_count(&self) -> usize {
        if self.to_frame >= self.from_frame {
            self.to_frame - self.from_frame + 1
        } else {
            0
        }
    }

    /// Frame indices covered by the tag, in playback-list order.
    ///
    /// Empty for an inverted range.
    pub fn frame_indices(&self) -> std::ops::RangeInclusive<usize> {
        self.from_frame..=self.to_frame
    }
}

/// A sprite's exported metadata snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteMetadata {
    /// Per-frame timing records, in frame order
    pub frames: Vec<FrameRecord>,

    /// Canvas width in pixels
    pub canvas_width: u32,

    /// Canvas height in pixels
    pub canvas_height: u32,

    /// Animation tags defined on the sprite
    pub tags: Vec<TagRange>,

    /// Layer names, top to bottom as the engine reports them
    #[serde(default)]
    pub layers: Vec<String>,

    /// Pixel format reported by the engine (e.g., "RGBA8888"), if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
}

impl SpriteMetadata {
    /// Look up a frame by index.
    pub fn frame(&self, index: usize) -> Option<&FrameRecord> {
        self.frames.get(index)
    }

    /// Total number of frames in the sprite.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
