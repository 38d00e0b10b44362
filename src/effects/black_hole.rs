use super::Effect;
use crate::display::PixelBuffer;
use crate::render::render_frame;
use crate::scene::{BackgroundPattern, Camera, FrameParams};

const ORBIT_SPEED: f32 = 0.15; // radians per second
const MIN_ORBIT_DISTANCE: f32 = 1e-3;

/// Camera position on a sphere around the black hole
#[derive(Debug, Clone, Copy, PartialEq)]
struct Orbit {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

/// Lensed black hole scene driven by a parameter block.
///
/// The parameters stay untouched between frames unless the orbit moves or the
/// output size changes; shading itself is pure.
pub struct BlackHoleEffect {
    params: FrameParams,
    orbit: Orbit,
    auto_orbit: bool,
    dirty_camera: bool,
}

impl BlackHoleEffect {
    pub fn new(params: FrameParams) -> Self {
        let offset = params.camera.position - params.black_hole.position;
        let distance = offset.length().max(MIN_ORBIT_DISTANCE);
        let orbit = Orbit {
            yaw: offset.x.atan2(-offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        };
        Self {
            params,
            orbit,
            auto_orbit: false,
            dirty_camera: false,
        }
    }

    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    pub fn set_pattern(&mut self, pattern: BackgroundPattern) {
        if self.params.background.pattern != pattern {
            log::info!("background pattern: {}", pattern);
            self.params.background.pattern = pattern;
        }
    }

    /// Multiply brightness by `factor`, keeping it non-negative
    pub fn scale_brightness(&mut self, factor: f32) {
        let b = (self.params.render.brightness * factor).clamp(0.0, 64.0);
        self.params.render.brightness = b;
        log::info!("brightness: {:.3}", b);
    }

    /// Move the camera around the hole by the given angles (radians)
    pub fn nudge_orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.orbit.yaw += d_yaw;
        self.orbit.pitch = (self.orbit.pitch + d_pitch).clamp(-1.5, 1.5);
        self.dirty_camera = true;
    }

    pub fn toggle_auto_orbit(&mut self) -> bool {
        self.auto_orbit = !self.auto_orbit;
        log::info!("auto orbit: {}", if self.auto_orbit { "on" } else { "off" });
        self.auto_orbit
    }

    fn rebuild_camera(&mut self, width: u32, height: u32) {
        let fov_y = self.params.camera.fov_y;
        self.params.camera = Camera::orbiting(
            self.params.black_hole.position,
            self.orbit.distance,
            self.orbit.yaw,
            self.orbit.pitch,
            fov_y,
            width,
            height,
        );
        self.dirty_camera = false;
    }
}

impl Effect for BlackHoleEffect {
    fn update(&mut self, dt: f32, width: u32, height: u32) {
        if self.auto_orbit {
            self.orbit.yaw += ORBIT_SPEED * dt;
            self.dirty_camera = true;
        }

        if self.dirty_camera {
            self.rebuild_camera(width, height);
        } else if self.params.camera.width != width || self.params.camera.height != height {
            self.params.camera = self.params.camera.clone().with_resolution(width, height);
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        render_frame(&self.params, buffer);
    }

    fn name(&self) -> &str {
        "Black Hole"
    }
}
