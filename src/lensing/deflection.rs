//! Deflection Model
//!
//! Closed-form weak-field bending with a stylized frame-dragging term. The
//! constants are part of the look; changing them changes every frame.

use crate::math3d::{Vec2, Vec3};
use crate::scene::Camera;
use std::f32::consts::PI;

/// Smallest impact parameter fed into `r_g / b`
pub const IMPACT_EPS: f32 = 1e-4;

/// Bending angle for impact parameter `b`.
///
/// `4u + (15π/4)u²` with `u = r_g / b`, plus `spin_sign·a·4u²`, then soft-clamped
/// by `alpha / (1 + alpha/4)` so the result stays below 4 as `b → 0`.
#[inline]
pub fn deflection_angle(b: f32, r_g: f32, a: f32, spin_sign: f32) -> f32 {
    let u = r_g / b.max(IMPACT_EPS);
    let mut alpha = 4.0 * u + (15.0 * PI / 4.0) * u * u;
    alpha += spin_sign * a * 4.0 * u * u;
    alpha / (1.0 + alpha * 0.25)
}

/// Which side of the spin axis a camera-plane offset lies on.
///
/// Returns +1 where frame dragging carries light forward, -1 on the opposite
/// side and 0 for a zero offset or an offset parallel to the projected axis.
pub fn spin_handedness(q_cam: Vec2, spin_axis: Vec3, camera: &Camera) -> f32 {
    let bearing = camera.to_world(Vec3::new(q_cam.x, q_cam.y, 0.0)).normalize();
    let side = spin_axis.dot(&camera.forward.cross(&bearing));
    if side > 0.0 {
        1.0
    } else if side < 0.0 {
        -1.0
    } else {
        0.0
    }
}
