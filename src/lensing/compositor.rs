//! Pixel Compositor
//!
//! Per-pixel entry point: camera-plane setup, shadow test, deflection, then
//! background + disk + photon-ring glow.

use super::background::sample_background;
use super::deflection::{deflection_angle, spin_handedness};
use super::disk::sample_disk;
use crate::color::{Rgb, Rgba};
use crate::math3d::{Vec2, Vec3};
use crate::noise::smoothstep;
use crate::scene::FrameParams;

const DEPTH_EPS: f32 = 1e-4;
const THETA_EPS: f32 = 1e-6;

pub const GLOW_TINT: Rgb = Rgb::new(1.0, 0.72, 0.4);
pub const GLOW_WEIGHT: f32 = 0.18;

/// Clamp a signed depth away from zero, keeping its sign (0 counts as in front)
#[inline]
fn guard_depth(z: f32) -> f32 {
    if z.abs() >= DEPTH_EPS {
        z
    } else if z < 0.0 {
        -DEPTH_EPS
    } else {
        DEPTH_EPS
    }
}

/// Cosmetic ring just outside the shadow edge
#[inline]
pub fn photon_ring_glow(r_cam: f32, theta_shadow: f32) -> Rgb {
    let rise = smoothstep(theta_shadow * 1.02, theta_shadow * 1.1, r_cam);
    let fall = smoothstep(theta_shadow * 1.8, theta_shadow * 1.2, r_cam);
    GLOW_TINT * (rise * fall * GLOW_WEIGHT)
}

/// Shades pixels of one frame. Holds only the borrowed parameters and values
/// derived from them, so one instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct PixelCompositor<'a> {
    params: &'a FrameParams,
    /// Projected black hole center on the unit-depth camera plane
    center: Vec2,
    /// |z_bh|, depth of the black hole along the view axis
    depth: f32,
    theta_shadow: f32,
}

impl<'a> PixelCompositor<'a> {
    pub fn new(params: &'a FrameParams) -> Self {
        let camera = &params.camera;
        let to_hole = camera.to_camera(params.black_hole.position - camera.position);
        let z = guard_depth(to_hole.z);
        let depth = z.abs();

        Self {
            params,
            center: Vec2::new(to_hole.x / z, to_hole.y / z),
            depth,
            theta_shadow: params.black_hole.critical_impact_parameter() / depth,
        }
    }

    #[inline]
    pub fn params(&self) -> &'a FrameParams {
        self.params
    }

    #[inline]
    pub fn projected_center(&self) -> Vec2 {
        self.center
    }

    /// Angular radius of the shadow on the camera plane
    #[inline]
    pub fn theta_shadow(&self) -> f32 {
        self.theta_shadow
    }

    /// Color of pixel (x, y), y counted downward from the top row
    #[inline]
    pub fn shade_pixel(&self, x: u32, y: u32) -> Rgba {
        self.shade_plane(self.params.camera.pixel_to_plane(x, y))
    }

    /// Color seen through camera-plane point `p`
    pub fn shade_plane(&self, p: Vec2) -> Rgba {
        let theta = (p - self.center).length();

        // Shadow pixels skip brightness and glow entirely
        if theta < self.theta_shadow {
            return Rgba::OPAQUE_BLACK;
        }

        let params = self.params;
        let dir = self.source_direction(p);
        let sky = sample_background(dir, &params.background);
        let disk = sample_disk(params.camera.position, dir, &params.black_hole, &params.disk);

        let lit = if disk.is_hit() {
            sky.mix(disk.color, disk.alpha.clamp(0.0, 1.0))
        } else {
            sky
        };
        let color = lit + photon_ring_glow(theta, self.theta_shadow);
        (color * params.render.brightness).with_alpha(1.0)
    }

    /// Unit world direction the light seen at `p` originally came from
    pub fn source_direction(&self, p: Vec2) -> Vec3 {
        let params = self.params;
        let hole = &params.black_hole;
        let offset = p - self.center;
        let theta = offset.length();

        let b = self.depth * theta;
        let spin_sign = spin_handedness(offset, params.disk.disk_n, &params.camera);
        let alpha = deflection_angle(b, hole.r_g, hole.spin, spin_sign);
        let theta_src = (theta - alpha).max(0.0);

        let source = self.center + offset * (theta_src / theta.max(THETA_EPS));
        params
            .camera
            .to_world(Vec3::new(source.x, source.y, 1.0).normalize())
            .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lensing::background::sample_background;
    use crate::lensing::disk::sample_disk;
    use crate::scene::BackgroundPattern;

    /// Reference scenario: r_g = 1, a = 0, hole 10 units ahead, 60° FOV, 16:9
    fn scenario() -> FrameParams {
        let mut params = FrameParams::default();
        params.camera = params.camera.with_resolution(160, 90);
        params
    }

    #[test]
    fn test_scenario_geometry() {
        let params = scenario();
        let comp = PixelCompositor::new(&params);
        assert!((comp.theta_shadow() - 3.0 * 3.0_f32.sqrt() / 10.0).abs() < 1e-6);
        assert!(comp.projected_center().approx_eq(&Vec2::new(0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_shadow_is_exact_black() {
        for brightness in [0.0, 1.0, 7.5] {
            for pattern in BackgroundPattern::ALL {
                let mut params = scenario();
                params.render.brightness = brightness;
                params.background.pattern = pattern;
                params.disk.opacity = 1.0;
                let comp = PixelCompositor::new(&params);
                let ts = comp.theta_shadow();
                for k in 0..16 {
                    let a = k as f32 / 16.0 * std::f32::consts::TAU;
                    let p = Vec2::new(a.cos(), a.sin()) * (ts * 0.99);
                    assert_eq!(comp.shade_plane(p), Rgba::OPAQUE_BLACK);
                }
                assert_eq!(comp.shade_pixel(80, 45), Rgba::OPAQUE_BLACK);
            }
        }
    }

    #[test]
    fn test_glow_band_outside_shadow() {
        let mut params = scenario();
        params.disk.opacity = 0.0;
        let comp = PixelCompositor::new(&params);
        let ts = comp.theta_shadow();

        let p = Vec2::new(ts * 1.15, 0.0);
        let c = comp.shade_plane(p);
        let sky = sample_background(comp.source_direction(p), &params.background);
        let glow = photon_ring_glow(ts * 1.15, ts);

        assert!(glow.r > glow.b && glow.r > 0.17, "glow should read warm: {:?}", glow);
        assert!(c.rgb().approx_eq(&(sky + glow), 1e-6));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_fades_back_to_background() {
        let mut params = scenario();
        params.disk.opacity = 0.0;
        let comp = PixelCompositor::new(&params);
        let p = Vec2::new(comp.theta_shadow() * 2.5, 0.1);

        let expected = sample_background(comp.source_direction(p), &params.background);
        assert_eq!(comp.shade_plane(p).rgb(), expected);
    }

    #[test]
    fn test_disk_blends_over_sky() {
        let mut params = scenario();
        params.render.brightness = 1.5;
        // Flat dark sky so the disk contribution is unambiguous
        params.background.pattern = BackgroundPattern::Beams;
        params.background.intensity = 0.0;
        let comp = PixelCompositor::new(&params);

        // Beside the shadow, the lensed ray crosses the tilted disk near r = 3.7
        let p = Vec2::new(0.9, -0.1);
        let dir = comp.source_direction(p);
        let disk = sample_disk(params.camera.position, dir, &params.black_hole, &params.disk);
        assert!(disk.alpha > 0.5, "expected a disk hit, got {:?}", disk);

        let sky = sample_background(dir, &params.background);
        let glow = photon_ring_glow((p - comp.projected_center()).length(), comp.theta_shadow());
        let expected = (sky.mix(disk.color, disk.alpha.clamp(0.0, 1.0)) + glow) * 1.5;
        let c = comp.shade_plane(p);
        assert!(c.rgb().approx_eq(&expected, 1e-5), "{:?} vs {:?}", c, expected);

        let lum = |c: Rgb| c.r + c.g + c.b;
        let sky_only = (sky + glow) * 1.5;
        assert!(lum(c.rgb()) - lum(sky_only) > 0.01, "disk left no trace");
    }

    #[test]
    fn test_glow_profile() {
        let ts = 0.5;
        assert_eq!(photon_ring_glow(ts * 1.01, ts), Rgb::BLACK);
        assert_eq!(photon_ring_glow(ts * 1.9, ts), Rgb::BLACK);
        let peak = photon_ring_glow(ts * 1.15, ts);
        assert!(peak.approx_eq(&(GLOW_TINT * GLOW_WEIGHT), 1e-6));
    }

    #[test]
    fn test_brightness_scales_lit_pixels() {
        let mut params = scenario();
        params.background.pattern = BackgroundPattern::Grid;
        let one = PixelCompositor::new(&params).shade_pixel(10, 10);
        params.render.brightness = 2.0;
        let two = PixelCompositor::new(&params).shade_pixel(10, 10);
        assert!(two.rgb().approx_eq(&(one.rgb() * 2.0), 1e-5));
        assert_eq!(two.a, 1.0);
    }

    #[test]
    fn test_source_direction_is_unit_and_bent_inward() {
        let params = scenario();
        let comp = PixelCompositor::new(&params);
        let p = Vec2::new(0.9, 0.2);
        let dir = comp.source_direction(p);
        assert!((dir.length() - 1.0).abs() < 1e-5);

        // Lensing pulls the sampled direction toward the hole
        let straight = params
            .camera
            .to_world(Vec3::new(p.x, p.y, 1.0).normalize());
        let to_hole = (params.black_hole.position - params.camera.position).normalize();
        assert!(dir.dot(&to_hole) > straight.dot(&to_hole));
    }

    #[test]
    fn test_every_pixel_is_finite_and_opaque() {
        let mut params = scenario();
        params.black_hole.spin = 0.9;
        let comp = PixelCompositor::new(&params);
        for y in 0..90 {
            for x in 0..160 {
                let c = comp.shade_pixel(x, y);
                assert!(c.rgb().is_finite(), "NaN at ({}, {})", x, y);
                assert_eq!(c.a, 1.0);
            }
        }
    }

    #[test]
    fn test_hole_beside_camera_is_guarded() {
        let mut params = scenario();
        params.black_hole.position = params.camera.position + params.camera.right * 3.0;
        let comp = PixelCompositor::new(&params);
        assert!(comp.shade_pixel(40, 40).rgb().is_finite());
    }
}
