//! spritemill-core - Character sprite pipeline library.
//!
//! Drives an external sprite-editing engine (Aseprite in batch mode) through
//! discrete stages that turn a raw character sprite into a tagged
//! sprite-sheet export:
//!
//! ```text
//! Sprite → Analyze (metadata diagnostics)
//!        → Normalize (auto-crop + uniform frame durations)
//!        → Export (one tag-scoped sheet + side-car JSON per tag)
//! ```
//!
//! The `build` orchestrator composes all three, short-circuiting on the
//! first failure. Every stage returns the uniform `StageResult` envelope;
//! the engine is injected behind the `SpriteEngine` trait.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use spritemill_core::{AsepriteEngine, BuildOptions, CharacterPipeline, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load().unwrap_or_default();
//!     let engine = Arc::new(AsepriteEngine::new(&config.engine));
//!     let pipeline = CharacterPipeline::new(engine);
//!
//!     let result = pipeline
//!         .build("hero.aseprite".as_ref(), "export/".as_ref(), BuildOptions::default())
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! }
//! ```

// Module declarations
pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use analysis::{analyze, AnalysisResult, TagAnalysis, TagIssue, RECOMMENDED_TAGS};
pub use config::Config;
pub use engine::{AsepriteEngine, EngineInvocation, MetadataExtraction, SpriteEngine};
pub use error::{ConfigError, EngineError, EngineResult, Result, SpritemillError};
pub use output::EnvelopeWriter;
pub use pipeline::{
    AnalyzePayload, BuildOptions, BuildPayload, CharacterPipeline, DataFormat, ExportOptions,
    ExportPayload, ExportedTag, NormalizeOptions, NormalizePayload, SheetLayout, Stage,
    StageFailure, StageResult,
};
pub use types::{FrameRecord, PlaybackDirection, SpriteMetadata, TagRange};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
