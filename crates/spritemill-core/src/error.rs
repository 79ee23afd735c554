//! Error types for the spritemill sprite pipeline.
//!
//! Stage failures (a bad input, a timed-out invocation, an export with no
//! tags) are *values* carried in `StageResult` and never travel as errors.
//! The enums here cover the remaining faults: configuration problems and
//! unexpected engine launch/parse failures.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for spritemill operations.
#[derive(Error, Debug)]
pub enum SpritemillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sprite engine invocation errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from the external sprite engine collaborator.
///
/// A nonzero exit or garbled output from the engine is *not* an error here;
/// stages read that out of the captured invocation. These variants cover the
/// cases where no usable invocation result exists at all.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine process could not be started (binary missing, permission denied)
    #[error("Failed to launch sprite engine `{binary}`: {message}")]
    Launch { binary: PathBuf, message: String },

    /// An invocation exceeded the configured timeout
    #[error("Engine invocation timed out after {timeout_ms}ms: {command}")]
    Timeout { command: String, timeout_ms: u64 },

    /// The metadata export file the engine was asked to write could not be read
    #[error("Failed to read engine metadata export {path}: {message}")]
    MetadataRead { path: PathBuf, message: String },

    /// The metadata export was not valid sheet JSON
    #[error("Failed to parse engine metadata export: {0}")]
    MetadataParse(#[from] serde_json::Error),
}

/// Convenience type alias for spritemill results.
pub type Result<T> = std::result::Result<T, SpritemillError>;

/// Convenience type alias for engine-boundary results.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
