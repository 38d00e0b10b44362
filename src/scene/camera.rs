use super::SceneError;
use crate::math3d::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

const BASIS_TOLERANCE: f32 = 1e-3;

/// Pinhole camera. Right-handed basis with `right = forward × up`; looks along `forward`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    /// Build an orthonormal camera looking from `position` toward `target`
    pub fn look_at(
        position: Vec3,
        target: Vec3,
        world_up: Vec3,
        fov_y: f32,
        width: u32,
        height: u32,
    ) -> Self {
        let forward = (target - position).normalize();
        let mut right = forward.cross(&world_up).normalize();
        if right.length() < 0.5 {
            // Looking straight along world_up
            right = forward.any_orthogonal();
        }
        let up = right.cross(&forward);

        Self {
            position,
            right,
            up,
            forward,
            fov_y,
            aspect: width as f32 / height.max(1) as f32,
            width,
            height,
        }
    }

    /// Camera on a sphere of `distance` around `target`, always facing it.
    /// yaw = pitch = 0 puts the camera on the -Z side of the target.
    pub fn orbiting(
        target: Vec3,
        distance: f32,
        yaw: f32,
        pitch: f32,
        fov_y: f32,
        width: u32,
        height: u32,
    ) -> Self {
        let pitch = pitch.clamp(-1.5, 1.5);
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        let offset = Vec3::new(cp * sy, sp, -cp * cy) * distance;
        Self::look_at(target + offset, target, Vec3::Y, fov_y, width, height)
    }

    /// Same camera rendering into a different target size
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height.max(1) as f32;
        self
    }

    #[inline]
    pub fn tan_half_fov(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }

    /// Components of a world vector along (right, up, forward)
    #[inline]
    pub fn to_camera(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(&self.right), v.dot(&self.up), v.dot(&self.forward))
    }

    /// World vector from (right, up, forward) components
    #[inline]
    pub fn to_world(&self, c: Vec3) -> Vec3 {
        self.right * c.x + self.up * c.y + self.forward * c.z
    }

    /// Pixel center to camera-plane coordinates (plane at unit depth, y up)
    #[inline]
    pub fn pixel_to_plane(&self, x: u32, y: u32) -> Vec2 {
        let ndc_x = (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (y as f32 + 0.5) / self.height as f32 * 2.0;
        let t = self.tan_half_fov();
        Vec2::new(ndc_x * t * self.aspect, ndc_y * t)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |msg: &str| Err(SceneError::InvalidCamera(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return Err(SceneError::ZeroResolution);
        }
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return invalid("fov_y must lie in (0, pi)");
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return invalid("aspect must be positive");
        }
        for (name, axis) in [("right", self.right), ("up", self.up), ("forward", self.forward)] {
            if (axis.length() - 1.0).abs() > BASIS_TOLERANCE {
                return Err(SceneError::InvalidCamera(format!("{} is not unit length", name)));
            }
        }
        if self.right.dot(&self.up).abs() > BASIS_TOLERANCE
            || self.right.dot(&self.forward).abs() > BASIS_TOLERANCE
            || self.up.dot(&self.forward).abs() > BASIS_TOLERANCE
        {
            return invalid("basis vectors are not mutually orthogonal");
        }
        if !self
            .forward
            .cross(&self.up)
            .approx_eq(&self.right, BASIS_TOLERANCE * 4.0)
        {
            return invalid("basis is not right-handed (expected right = forward x up)");
        }
        Ok(())
    }
}
