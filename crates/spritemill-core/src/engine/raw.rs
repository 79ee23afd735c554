//! Parsing of the engine's sheet-JSON metadata export.
//!
//! Aseprite's `--data` export keys frames by filename string; the map's
//! insertion order is the frame order, so deserialization goes through an
//! `IndexMap` to keep indices stable.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::types::{FrameRecord, PlaybackDirection, SpriteMetadata, TagRange};

#[derive(Debug, Deserialize)]
struct RawSheet {
    #[serde(default)]
    frames: IndexMap<String, RawFrame>,
    meta: RawMeta,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    #[serde(default)]
    size: Option<RawSize>,
    #[serde(default, rename = "frameTags")]
    frame_tags: Vec<RawFrameTag>,
    #[serde(default)]
    layers: Vec<RawLayer>,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSize {
    w: u32,
    h: u32,
}

#[derive(Debug, Deserialize)]
struct RawFrameTag {
    name: String,
    from: usize,
    to: usize,
    #[serde(default)]
    direction: PlaybackDirection,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    name: String,
}

/// Parse a sheet-JSON metadata export into a `SpriteMetadata` snapshot.
///
/// Lenient where the export is sparse: missing size, tags, or layers degrade
/// to zero/empty values. Only malformed JSON is an error.
pub fn parse_sheet_json(raw: &str) -> Result<SpriteMetadata, serde_json::Error> {
    let sheet: RawSheet = serde_json::from_str(raw)?;

    let frames = sheet
        .frames
        .values()
        .map(|frame| FrameRecord {
            duration_ms: frame.duration,
        })
        .collect();

    let (canvas_width, canvas_height) = sheet
        .meta
        .size
        .map(|size| (size.w, size.h))
        .unwrap_or((0, 0));

    let tags = sheet
        .meta
        .frame_tags
        .into_iter()
        .map(|tag| TagRange {
            name: tag.name,
            from_frame: tag.from,
            to_frame: tag.to,
            direction: tag.direction,
        })
        .collect();

    let layers = sheet.meta.layers.into_iter().map(|l| l.name).collect();

    Ok(SpriteMetadata {
        frames,
        canvas_width,
        canvas_height,
        tags,
        layers,
        color_mode: sheet.meta.format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "frames": {
            "hero 0.aseprite": { "frame": { "x": 0, "y": 0, "w": 32, "h": 32 }, "duration": 100 },
            "hero 1.aseprite": { "frame": { "x": 32, "y": 0, "w": 32, "h": 32 }, "duration": 150 },
            "hero 2.aseprite": { "frame": { "x": 64, "y": 0, "w": 32, "h": 32 }, "duration": 100 }
        },
        "meta": {
            "app": "https://www.aseprite.org/",
            "format": "RGBA8888",
            "size": { "w": 96, "h": 32 },
            "frameTags": [
                { "name": "Idle", "from": 0, "to": 1, "direction": "forward" },
                { "name": "Walk", "from": 2, "to": 2, "direction": "pingpong" }
            ],
            "layers": [ { "name": "Body", "opacity": 255 }, { "name": "Outline", "opacity": 255 } ]
        }
    }"#;

    #[test]
    fn test_parses_frames_in_map_order() {
        let meta = parse_sheet_json(SAMPLE).unwrap();
        assert_eq!(meta.frame_count(), 3);
        assert_eq!(
            meta.frames.iter().map(|f| f.duration_ms).collect::<Vec<_>>(),
            vec![100, 150, 100]
        );
    }

    #[test]
    fn test_parses_meta_fields() {
        let meta = parse_sheet_json(SAMPLE).unwrap();
        assert_eq!((meta.canvas_width, meta.canvas_height), (96, 32));
        assert_eq!(meta.color_mode.as_deref(), Some("RGBA8888"));
        assert_eq!(meta.layers, vec!["Body", "Outline"]);

        assert_eq!(meta.tags.len(), 2);
        assert_eq!(meta.tags[0].name, "Idle");
        assert_eq!(meta.tags[0].from_frame, 0);
        assert_eq!(meta.tags[0].to_frame, 1);
        assert_eq!(meta.tags[1].direction, PlaybackDirection::Pingpong);
    }

    #[test]
    fn test_sparse_export_degrades_to_empty() {
        let meta = parse_sheet_json(r#"{ "frames": {}, "meta": {} }"#).unwrap();
        assert_eq!(meta.frame_count(), 0);
        assert_eq!((meta.canvas_width, meta.canvas_height), (0, 0));
        assert!(meta.tags.is_empty());
        assert!(meta.layers.is_empty());
        assert!(meta.color_mode.is_none());
    }

    #[test]
    fn test_missing_direction_defaults_to_forward() {
        let meta = parse_sheet_json(
            r#"{
                "frames": { "a": { "duration": 100 } },
                "meta": { "frameTags": [ { "name": "Idle", "from": 0, "to": 0 } ] }
            }"#,
        )
        .unwrap();
        assert_eq!(meta.tags[0].direction, PlaybackDirection::Forward);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_sheet_json("not json").is_err());
    }
}
