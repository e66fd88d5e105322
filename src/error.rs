//! Error types for curve construction, population, and evaluation

use serde::{Deserialize, Serialize};

/// Error type for animation curve operations.
///
/// Registry lookup misses are not errors; they surface as `None` and callers
/// are expected to handle unanimated channels.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CurveError {
    /// Curve constructed with zero samples
    #[error("curve must have at least one sample")]
    EmptyCurve,

    /// Sample index past the end of the curve
    #[error("sample index {index} out of range (sample count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// First populated point carried no components
    #[error("sample value must have at least one component")]
    ZeroWidth,

    /// Value or destination slice length disagrees with the curve's width
    #[error("component width mismatch: curve has {expected}, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Keyframe ingestion arrays disagree
    #[error(
        "keyframe arrays disagree: {key_count} times but {value_count} values for width {component_width}"
    )]
    KeyArrayMismatch {
        key_count: usize,
        value_count: usize,
        component_width: usize,
    },

    /// Sample times are not in ascending order
    #[error("sample {index} breaks ascending time order")]
    UnorderedSamples { index: usize },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl CurveError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyCurve | Self::KeyArrayMismatch { .. } => "construction",
            Self::IndexOutOfRange { .. } | Self::ZeroWidth | Self::WidthMismatch { .. } => {
                "population"
            }
            Self::UnorderedSamples { .. } => "validation",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
