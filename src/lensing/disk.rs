//! Disk Radiative Sampler
//!
//! Intersects a ray with the disk plane and shades the hit with Keplerian
//! Doppler beaming, gravitational redshift and a hot/cool color ramp.

use crate::color::Rgb;
use crate::math3d::Vec3;
use crate::noise::smoothstep;
use crate::scene::{AccretionDisk, BlackHole};

const PARALLEL_EPS: f32 = 1e-4;
const RADIUS_EPS: f32 = 1e-3;
const MAX_ORBITAL_SPEED: f32 = 0.95;

/// Emitted color and coverage; `alpha == 0` means the ray missed the disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskSample {
    pub color: Rgb,
    pub alpha: f32,
}

impl DiskSample {
    pub const MISS: Self = Self {
        color: Rgb::BLACK,
        alpha: 0.0,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Relativistic Doppler factor for speed `v` (units of c) and the cosine between
/// the velocity and the direction toward the observer
#[inline]
pub fn doppler_factor(v: f32, cos_theta: f32) -> f32 {
    let gamma = 1.0 / (1.0 - v * v).max(1e-4).sqrt();
    1.0 / (gamma * (1.0 - v * cos_theta)).max(1e-3)
}

/// sqrt(1 - r_g/r), with `r` floored at 1.001 and the radicand at zero
#[inline]
pub fn gravitational_redshift(r: f32, r_g: f32) -> f32 {
    (1.0 - r_g / r.max(1.001)).max(0.0).sqrt()
}

/// Beamed intensity before the facing term: g³ / sqrt(r)
#[inline]
pub fn emitted_intensity(g_total: f32, r: f32) -> f32 {
    g_total.powi(3) / r.max(RADIUS_EPS).sqrt()
}

/// Trace `origin + t·dir` (t > 0) to the disk midplane and shade the hit
pub fn sample_disk(origin: Vec3, dir: Vec3, black_hole: &BlackHole, disk: &AccretionDisk) -> DiskSample {
    let denom = dir.dot(&disk.disk_n);
    if denom.abs() < PARALLEL_EPS {
        return DiskSample::MISS;
    }
    let t = (black_hole.position - origin).dot(&disk.disk_n) / denom;
    if t <= 0.0 {
        return DiskSample::MISS;
    }
    shade_disk_point(origin + dir * t, dir, black_hole, disk)
}

/// Shade an arbitrary point of the emitting slab seen along `dir`
pub fn shade_disk_point(
    point: Vec3,
    dir: Vec3,
    black_hole: &BlackHole,
    disk: &AccretionDisk,
) -> DiskSample {
    let rel = point - black_hole.position;
    let h = rel.dot(&disk.disk_n);
    if h.abs() > disk.thickness {
        return DiskSample::MISS;
    }

    let px = rel.dot(&disk.disk_x);
    let py = rel.dot(&disk.disk_y);
    let r = (px * px + py * py).sqrt();
    if r < disk.r_in || r > disk.r_out {
        return DiskSample::MISS;
    }
    let r_safe = r.max(RADIUS_EPS);

    let v = (disk.orbital_speed / r_safe.sqrt()).clamp(0.0, MAX_ORBITAL_SPEED);
    // Prograde about disk_n
    let tangent = (disk.disk_y * px - disk.disk_x * py).normalize();
    let toward_observer = -dir;
    let doppler = doppler_factor(v, tangent.dot(&toward_observer));
    let g_total = doppler * gravitational_redshift(r, black_hole.r_g);

    let boost = (0.4 + 0.6 * (doppler - 1.0)).clamp(0.0, 1.0);
    let heat = ((disk.r_in / r_safe).powf(0.75) + 0.5 * boost).clamp(0.0, 1.0);
    let facing = (disk.disk_n.dot(&toward_observer) * 0.5 + 0.5).clamp(0.0, 1.0);
    let intensity = emitted_intensity(g_total, r) * facing;

    DiskSample {
        color: disk.cool.mix(disk.hot, heat) * intensity,
        alpha: disk.opacity * smoothstep(disk.thickness, 0.0, h.abs()),
    }
}
