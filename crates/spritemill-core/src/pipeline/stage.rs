//! The uniform result envelope every pipeline operation returns.
//!
//! `StageResult` is a sum type: a success carries exactly a payload, a
//! failure carries exactly a detail string plus the stage it originated in.
//! It serializes to the wire envelope `{ "success", "tool", "result" }` /
//! `{ "success", "tool", "failedStage", "error" }`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// One discrete pipeline operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Analyze,
    Normalize,
    Export,
    Build,
}

impl Stage {
    /// The operation name callers see in the envelope.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Stage::Analyze => "analyze",
            Stage::Normalize => "normalize",
            Stage::Export => "export",
            Stage::Build => "build",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tool_name())
    }
}

/// A stage failure: the originating stage plus its detail, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// The stage the failure originated in
    pub stage: Stage,
    /// Failure detail, never rewritten across stage boundaries
    pub detail: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.detail)
    }
}

/// Result envelope for one pipeline operation.
#[derive(Debug, Clone)]
pub enum StageResult<T> {
    Success {
        /// The reporting operation
        stage: Stage,
        payload: T,
    },
    Failure {
        /// The reporting operation
        stage: Stage,
        /// Where the failure originated (differs from `stage` only when an
        /// orchestrator forwards a sub-stage failure)
        failure: StageFailure,
    },
}

impl<T> StageResult<T> {
    pub fn success(stage: Stage, payload: T) -> Self {
        StageResult::Success { stage, payload }
    }

    /// A failure originating in the reporting stage itself.
    pub fn failure(stage: Stage, detail: impl Into<String>) -> Self {
        StageResult::Failure {
            stage,
            failure: StageFailure {
                stage,
                detail: detail.into(),
            },
        }
    }

    /// A failure forwarded verbatim from a sub-stage.
    pub fn forwarded(stage: Stage, failure: StageFailure) -> Self {
        StageResult::Failure { stage, failure }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, StageResult::Success { .. })
    }

    /// The reporting stage.
    pub fn stage(&self) -> Stage {
        match self {
            StageResult::Success { stage, .. } | StageResult::Failure { stage, .. } => *stage,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            StageResult::Success { payload, .. } => Some(payload),
            StageResult::Failure { .. } => None,
        }
    }

    pub fn failure_detail(&self) -> Option<&str> {
        match self {
            StageResult::Success { .. } => None,
            StageResult::Failure { failure, .. } => Some(&failure.detail),
        }
    }

    /// Split into payload or originating failure.
    pub fn into_outcome(self) -> Result<T, StageFailure> {
        match self {
            StageResult::Success { payload, .. } => Ok(payload),
            StageResult::Failure { failure, .. } => Err(failure),
        }
    }
}

impl<T: Serialize> Serialize for StageResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StageResult::Success { stage, payload } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("tool", stage)?;
                map.serialize_entry("result", payload)?;
                map.end()
            }
            StageResult::Failure { stage, failure } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("tool", stage)?;
                map.serialize_entry("failedStage", &failure.stage)?;
                map.serialize_entry("error", &failure.detail)?;
                map.end()
            }
        }
    }
}
