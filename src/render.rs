//! Frame drivers: map the per-pixel core over a whole `PixelBuffer`.

use crate::display::PixelBuffer;
use crate::lensing::PixelCompositor;
use crate::scene::FrameParams;
use rayon::prelude::*;
use std::borrow::Cow;
use std::time::Instant;

/// Parameters whose camera resolution matches the buffer
fn fit_to_buffer<'a>(params: &'a FrameParams, buffer: &PixelBuffer) -> Cow<'a, FrameParams> {
    let camera = &params.camera;
    if camera.width == buffer.width() && camera.height == buffer.height() {
        Cow::Borrowed(params)
    } else {
        log::debug!(
            "camera resolution {}x{} differs from buffer {}x{}; rendering at buffer size",
            camera.width,
            camera.height,
            buffer.width(),
            buffer.height()
        );
        let mut fitted = params.clone();
        fitted.camera = fitted.camera.with_resolution(buffer.width(), buffer.height());
        Cow::Owned(fitted)
    }
}

#[inline]
fn shade_row(compositor: &PixelCompositor, y: u32, row: &mut [u8], srgb: bool) {
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        px.copy_from_slice(&compositor.shade_pixel(x as u32, y).to_bytes(srgb));
    }
}

/// Render one frame with rows shaded in parallel
pub fn render_frame(params: &FrameParams, buffer: &mut PixelBuffer) {
    let params = fit_to_buffer(params, buffer);
    let compositor = PixelCompositor::new(&params);
    let srgb = params.render.srgb_output;
    let stride = buffer.stride();
    if stride == 0 {
        return;
    }

    let start = Instant::now();
    buffer
        .as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| shade_row(&compositor, y as u32, row, srgb));
    log::debug!(
        "rendered {}x{} in {:.2} ms",
        params.camera.width,
        params.camera.height,
        start.elapsed().as_secs_f64() * 1000.0
    );
}

/// Render one frame on the calling thread, top row first
pub fn render_frame_sequential(params: &FrameParams, buffer: &mut PixelBuffer) {
    let params = fit_to_buffer(params, buffer);
    let compositor = PixelCompositor::new(&params);
    let srgb = params.render.srgb_output;
    let stride = buffer.stride();
    if stride == 0 {
        return;
    }

    for (y, row) in buffer.as_bytes_mut().chunks_mut(stride).enumerate() {
        shade_row(&compositor, y as u32, row, srgb);
    }
}

/// Allocate a buffer at the camera's resolution and render into it
pub fn render_to_buffer(params: &FrameParams) -> PixelBuffer {
    let mut buffer = PixelBuffer::with_size(params.camera.width, params.camera.height);
    render_frame(params, &mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BackgroundPattern;

    fn small_scene(pattern: BackgroundPattern) -> FrameParams {
        let mut params = FrameParams::default();
        params.camera = params.camera.with_resolution(96, 54);
        params.black_hole.spin = 0.7;
        params.background.pattern = pattern;
        params
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for pattern in BackgroundPattern::ALL {
            let params = small_scene(pattern);
            let mut par = PixelBuffer::with_size(96, 54);
            let mut seq = PixelBuffer::with_size(96, 54);
            render_frame(&params, &mut par);
            render_frame_sequential(&params, &mut seq);
            assert_eq!(par, seq, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_every_pixel_opaque() {
        let buffer = render_to_buffer(&small_scene(BackgroundPattern::Beams));
        assert!(buffer.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_center_pixel_is_shadow() {
        let buffer = render_to_buffer(&small_scene(BackgroundPattern::Grid));
        assert_eq!(buffer.get_pixel(48, 27), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_buffer_size_wins() {
        let params = small_scene(BackgroundPattern::Grid);
        let mut buffer = PixelBuffer::with_size(32, 18);
        render_frame(&params, &mut buffer);
        assert_eq!(buffer.get_pixel(16, 9), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_empty_buffer_is_noop() {
        let params = small_scene(BackgroundPattern::Starfield);
        let mut buffer = PixelBuffer::with_size(0, 0);
        render_frame(&params, &mut buffer);
        assert!(buffer.as_bytes().is_empty());
    }
}
