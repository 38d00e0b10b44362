mod black_hole;

pub use black_hole::BlackHoleEffect;

use crate::display::PixelBuffer;

/// Anything the host loop can animate and draw each frame
pub trait Effect {
    /// Update effect state (called each frame)
    /// - dt: delta time in seconds
    /// - width/height: current output size
    fn update(&mut self, dt: f32, width: u32, height: u32);

    /// Render effect to the pixel buffer
    fn render(&self, buffer: &mut PixelBuffer);

    /// Effect name for UI/debugging
    fn name(&self) -> &str;
}
