//! The lensing core: a pure map from (frame parameters, pixel) to color.
//!
//! Data flows one way: `scene::FrameParams` → `PixelCompositor` →
//! {deflection, disk, background}. Nothing here holds mutable state, so
//! pixels can be evaluated in any order or in parallel.

pub mod background;
pub mod compositor;
pub mod deflection;
pub mod disk;

pub use background::{direction_to_uv, sample_background};
pub use compositor::{photon_ring_glow, PixelCompositor};
pub use deflection::{deflection_angle, spin_handedness};
pub use disk::{sample_disk, DiskSample};

use crate::color::Rgba;
use crate::scene::FrameParams;

/// Shade a single pixel from scratch.
///
/// Convenience for hosts that invoke the core one pixel at a time; frame
/// renderers should build one `PixelCompositor` and reuse it.
pub fn shade_pixel(params: &FrameParams, x: u32, y: u32) -> Rgba {
    PixelCompositor::new(params).shade_pixel(x, y)
}
