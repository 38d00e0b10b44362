//! lensfield: a stylized, per-pixel gravitationally lensed black hole.
//!
//! The core (`lensing`) is a pure function of a per-frame parameter block
//! (`scene::FrameParams`) and a pixel coordinate. `render` maps it over a
//! `display::PixelBuffer`; `effects` wraps it for an interactive host loop.

pub mod color;
pub mod display;
pub mod effects;
pub mod lensing;
pub mod math3d;
pub mod noise;
pub mod render;
pub mod scene;
pub mod util;

pub use color::{Rgb, Rgba};
pub use display::PixelBuffer;
pub use lensing::{shade_pixel, PixelCompositor};
pub use render::{render_frame, render_frame_sequential, render_to_buffer};
pub use scene::{FrameParams, SceneError};
