//! Deterministic, input-derived artifact naming.
//!
//! Repeated runs with the same input and output directory produce the same
//! paths and overwrite in place. No random identifiers anywhere.

use std::path::{Path, PathBuf};

/// Base name of a sprite file (stem without extension).
pub fn base_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sprite")
        .to_string()
}

/// Filesystem-safe lowercase slug for a tag name.
///
/// Lowercases and maps whitespace and path-hostile characters to `_`, so a
/// tag like "Walk Left" or "a/b" yields a usable file name.
pub fn tag_slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Default output path for a normalized sprite: `<stem>_normalized.<ext>`
/// beside the input, keeping the input's extension.
pub fn normalized_output_path(input: &Path) -> PathBuf {
    let stem = base_name(input);
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("aseprite");
    let file_name = format!("{stem}_normalized.{ext}");
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Per-tag sheet image and side-car metadata paths:
/// `<export_dir>/<base>_<slug>.png` and `...json`.
pub fn sheet_paths(export_dir: &Path, base: &str, slug: &str) -> (PathBuf, PathBuf) {
    let sheet = export_dir.join(format!("{base}_{slug}.png"));
    let data = export_dir.join(format!("{base}_{slug}.json"));
    (sheet, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_slug_lowercases() {
        assert_eq!(tag_slug("Walk"), "walk");
        assert_eq!(tag_slug("IDLE"), "idle");
    }

    #[test]
    fn test_tag_slug_sanitizes_hostile_characters() {
        assert_eq!(tag_slug("Walk Left"), "walk_left");
        assert_eq!(tag_slug("a/b\\c"), "a_b_c");
        assert_eq!(tag_slug("hit?"), "hit_");
    }

    #[test]
    fn test_normalized_output_path_keeps_extension() {
        assert_eq!(
            normalized_output_path(Path::new("/work/hero.aseprite")),
            PathBuf::from("/work/hero_normalized.aseprite")
        );
        assert_eq!(
            normalized_output_path(Path::new("/work/hero.ase")),
            PathBuf::from("/work/hero_normalized.ase")
        );
    }

    #[test]
    fn test_normalized_output_path_without_extension() {
        assert_eq!(
            normalized_output_path(Path::new("/work/hero")),
            PathBuf::from("/work/hero_normalized.aseprite")
        );
    }

    #[test]
    fn test_sheet_paths_are_deterministic() {
        let dir = Path::new("/out");
        let (sheet, data) = sheet_paths(dir, "hero", "walk");
        assert_eq!(sheet, PathBuf::from("/out/hero_walk.png"));
        assert_eq!(data, PathBuf::from("/out/hero_walk.json"));
        assert_eq!(sheet_paths(dir, "hero", "walk"), (sheet, data));
    }
}
