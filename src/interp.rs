//! Numeric interpolation helpers:
//! - lerp_f32 / lerp_slice (component-wise linear)
//! - slerp_quat (spherical, shortest-arc)

use nalgebra::{Quaternion, UnitQuaternion};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation into `dst`.
///
/// All three slices must have the same length; this is checked by the
/// callers against the curve's component width.
#[inline]
pub fn lerp_slice(from: &[f32], to: &[f32], t: f32, dst: &mut [f32]) {
    for ((d, a), b) in dst.iter_mut().zip(from).zip(to) {
        *d = lerp_f32(*a, *b, t);
    }
}

/// Spherical linear interpolation of `(x, y, z, w)` quaternions with
/// shortest-arc correction, returning a unit-length quaternion.
///
/// Degenerate inputs degrade instead of panicking: a zero-norm quaternion
/// falls back to component-wise lerp, and an exactly antipodal pair (no
/// unique shortest arc) snaps to the nearer endpoint.
pub fn slerp_quat(from: &[f32; 4], to: &[f32; 4], t: f32) -> [f32; 4] {
    let from_q = Quaternion::new(from[3], from[0], from[1], from[2]);
    let to_q = Quaternion::new(to[3], to[0], to[1], to[2]);
    if from_q.norm_squared() <= f32::EPSILON || to_q.norm_squared() <= f32::EPSILON {
        let mut out = [0.0; 4];
        lerp_slice(from, to, t, &mut out);
        return out;
    }

    let from_unit = UnitQuaternion::new_normalize(from_q);
    let to_unit = UnitQuaternion::new_normalize(to_q);
    match from_unit.try_slerp(&to_unit, t, 1.0e-6) {
        Some(slerped) => [slerped.i, slerped.j, slerped.k, slerped.w],
        None => {
            if t < 0.5 {
                *from
            } else {
                *to
            }
        }
    }
}
