//! Animation Curves
//!
//! Keyframe curve storage and evaluation for real-time animation, plus a
//! registry that shares loaded curves across consumers. A loader decodes an
//! animation asset into parallel key arrays, builds curves through the
//! registry factory, and registers them under `(source id, target id)` keys;
//! consumers fetch a curve per channel and evaluate it once per frame.

pub mod curve;
pub mod error;
pub mod interp;
pub mod registry;

// Re-export common types for convenience
pub use curve::{AnimationCurve, InterpolationMode, Sample, ROTATION_WIDTH};
pub use error::CurveError;
pub use interp::{lerp_f32, lerp_slice, slerp_quat};
pub use registry::{CurveRegistry, CurveSet};

/// Curve operation result type
pub type Result<T> = core::result::Result<T, CurveError>;
