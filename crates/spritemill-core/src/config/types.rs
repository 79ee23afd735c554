//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pipeline::{DataFormat, SheetLayout, DEFAULT_TARGET_MS};

/// External sprite engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine binary; a bare name is resolved through PATH
    pub binary: PathBuf,

    /// Per-invocation timeout in milliseconds
    pub timeout_ms: u64,

    /// Directory holding the engine-side scripts
    pub script_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("aseprite"),
            timeout_ms: 30_000,
            script_dir: PathBuf::from("~/.spritemill/scripts"),
        }
    }
}

/// Normalize-stage defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Target frame duration in milliseconds
    pub target_ms: u32,

    /// Crop transparent canvas borders before rewriting durations
    pub auto_crop: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target_ms: DEFAULT_TARGET_MS,
            auto_crop: true,
        }
    }
}

/// Export-stage defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Sheet packing layout
    pub sheet_layout: SheetLayout,

    /// Side-car metadata format
    pub data_format: DataFormat,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
