//! Keyframe curve storage and point-in-time evaluation.
//!
//! A curve owns an ordered run of timestamped fixed-width samples for one
//! animated channel (a translation, a rotation quaternion, a scalar weight)
//! and answers queries by interpolating between the two bracketing samples.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::interp::{lerp_slice, slerp_quat};

/// Component width of a rotation channel. Width-4 curves are treated as unit
/// quaternions under [`InterpolationMode::Linear`].
pub const ROTATION_WIDTH: usize = 4;

/// How [`AnimationCurve::evaluate`] blends between bracketing samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Component-wise linear interpolation; width-4 channels take the
    /// quaternion slerp path instead.
    #[default]
    Linear,
    /// Nearest-neighbor: no arithmetic blending.
    Near,
}

/// A single keyframe: a time in integral milliseconds and an exclusively
/// owned run of floating-point components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time at which this sample occurs, in milliseconds.
    pub time: u32,
    /// Component values, `component_width` entries once populated.
    pub value: Box<[f32]>,
}

/// An n-component animation curve.
///
/// Lifecycle: construct with a fixed sample count, then populate every index
/// via [`set_point`](Self::set_point). The first populated point fixes the
/// component width for the curve's lifetime; unpopulated samples hold time 0
/// and zeroed components, so evaluating a half-populated curve yields zeros
/// rather than a crash. Callers insert samples in ascending time order; the
/// curve does not sort ([`validate`](Self::validate) checks ordering for
/// loaders that want it).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationCurve {
    samples: Vec<Sample>,
    component_width: usize,
    /// Cached `end_time - start_time`, refreshed on every `set_point`.
    duration: u32,
}

impl AnimationCurve {
    /// Create a curve with `sample_count` zero-initialized samples.
    pub fn with_sample_count(sample_count: usize) -> Result<Self, CurveError> {
        if sample_count == 0 {
            return Err(CurveError::EmptyCurve);
        }
        Ok(Self {
            samples: vec![
                Sample {
                    time: 0,
                    value: Box::default(),
                };
                sample_count
            ],
            component_width: 0,
            duration: 0,
        })
    }

    /// Build a fully populated curve from parallel keyframe arrays:
    /// `key_times` in ascending milliseconds and `key_values` flattened
    /// row-major, `key_times.len() * component_width` entries.
    ///
    /// Array lengths are validated here; time ordering is the loader's
    /// contract (decoded key arrays arrive sorted).
    pub fn from_keyframes(
        component_width: usize,
        key_times: &[u32],
        key_values: &[f32],
    ) -> Result<Self, CurveError> {
        if key_times.is_empty() {
            return Err(CurveError::EmptyCurve);
        }
        if component_width == 0 || key_values.len() != key_times.len() * component_width {
            return Err(CurveError::KeyArrayMismatch {
                key_count: key_times.len(),
                value_count: key_values.len(),
                component_width,
            });
        }

        let mut curve = Self::with_sample_count(key_times.len())?;
        for (index, (&time, value)) in key_times
            .iter()
            .zip(key_values.chunks_exact(component_width))
            .enumerate()
        {
            curve.set_point(index, time, value)?;
        }
        Ok(curve)
    }

    /// Store `time` and copy `value` into the sample at `index`.
    ///
    /// The first call fixes the curve's component width; every later call
    /// (and every evaluation destination) must match it.
    pub fn set_point(&mut self, index: usize, time: u32, value: &[f32]) -> Result<(), CurveError> {
        let count = self.samples.len();
        if index >= count {
            return Err(CurveError::IndexOutOfRange { index, count });
        }
        if self.component_width == 0 {
            if value.is_empty() {
                return Err(CurveError::ZeroWidth);
            }
            self.component_width = value.len();
            for sample in &mut self.samples {
                sample.value = vec![0.0; self.component_width].into_boxed_slice();
            }
        } else if value.len() != self.component_width {
            return Err(CurveError::WidthMismatch {
                expected: self.component_width,
                actual: value.len(),
            });
        }

        let sample = &mut self.samples[index];
        sample.time = time;
        sample.value.copy_from_slice(value);

        // Saturates while later indices are still unpopulated.
        self.duration = self.samples[count - 1]
            .time
            .saturating_sub(self.samples[0].time);
        Ok(())
    }

    /// Number of samples on the curve.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Components per sample; 0 until the first point is populated.
    #[inline]
    pub fn component_width(&self) -> usize {
        self.component_width
    }

    /// The samples in storage order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Time of the first sample, in milliseconds.
    #[inline]
    pub fn start_time(&self) -> u32 {
        self.samples[0].time
    }

    /// Time of the last sample, in milliseconds.
    #[inline]
    pub fn end_time(&self) -> u32 {
        self.samples[self.samples.len() - 1].time
    }

    /// Cached `end_time - start_time`, in milliseconds.
    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration
    }

    /// Find the indices of the samples bracketing `time`.
    ///
    /// Times at or before the first sample clamp to `(0, 0)`; times at or
    /// past the last clamp to `(last, last)`. Otherwise returns `(i, i + 1)`
    /// where `samples[i].time <= time <= samples[i + 1].time`, with an exact
    /// sample time resolving to that sample as the lower bound.
    pub fn sample_indices_at_time(&self, time: f32) -> (usize, usize) {
        let last = self.samples.len() - 1;
        if time <= self.samples[0].time as f32 {
            return (0, 0);
        }
        if time >= self.samples[last].time as f32 {
            return (last, last);
        }

        // Binary search for the rightmost sample with time <= query.
        let mut lo = 0;
        let mut hi = last;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.samples[mid].time as f32 <= time {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        (lo, lo + 1)
    }

    /// Evaluate the curve at `time` (milliseconds), writing
    /// `component_width` floats into `dst`.
    ///
    /// Times outside the sampled range clamp to the boundary sample; there
    /// is no extrapolation. The call mutates nothing but `dst` and is safe
    /// to repeat with the same or different times.
    pub fn evaluate(
        &self,
        time: f32,
        dst: &mut [f32],
        mode: InterpolationMode,
    ) -> Result<(), CurveError> {
        if dst.len() != self.component_width {
            return Err(CurveError::WidthMismatch {
                expected: self.component_width,
                actual: dst.len(),
            });
        }

        let (from_index, to_index) = self.sample_indices_at_time(time);
        let from = &self.samples[from_index];
        let to = &self.samples[to_index];

        let span = to.time.saturating_sub(from.time) as f32;
        let t = if from_index == to_index || span <= 0.0 {
            0.0
        } else {
            (time - from.time as f32) / span
        };

        match mode {
            InterpolationMode::Linear => {
                if self.component_width == ROTATION_WIDTH {
                    let from_q = [from.value[0], from.value[1], from.value[2], from.value[3]];
                    let to_q = [to.value[0], to.value[1], to.value[2], to.value[3]];
                    dst.copy_from_slice(&slerp_quat(&from_q, &to_q, t));
                } else {
                    lerp_slice(&from.value, &to.value, t, dst);
                }
            }
            InterpolationMode::Near => {
                let nearest = if t < 0.5 { from } else { to };
                dst.copy_from_slice(&nearest.value);
            }
        }
        Ok(())
    }

    /// Check loader-facing invariants: a fixed nonzero width and ascending
    /// sample times.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.component_width == 0 {
            return Err(CurveError::ZeroWidth);
        }
        for (index, pair) in self.samples.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(CurveError::UnorderedSamples { index: index + 1 });
            }
        }
        Ok(())
    }
}
