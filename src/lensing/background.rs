//! Background Synthesizer
//!
//! Maps a world direction to a sky color through an equirectangular UV and one
//! of three procedural generators. Star placement comes from the integer
//! `cell_hash`, so the layout does not depend on platform trig precision.

use crate::color::Rgb;
use crate::math3d::{Vec2, Vec3};
use crate::noise::{cell_hash, mix, smoothstep, wrap_centered};
use crate::scene::{Background, BackgroundPattern};
use std::f32::consts::{PI, TAU};

const STAR_THRESHOLD: f32 = 0.996;
const STAR_SIZE_MIN: f32 = 0.0025;
const STAR_SIZE_MAX: f32 = 0.012;
const STAR_COOL: Rgb = Rgb::new(0.62, 0.74, 1.0);
const STAR_WARM: Rgb = Rgb::new(1.0, 0.95, 0.86);
const SKY_AMBIENT: Rgb = Rgb::new(0.004, 0.005, 0.012);

// Independent hash streams per star attribute
const CH_PRESENCE: u32 = 0;
const CH_POS_X: u32 = 1;
const CH_POS_Y: u32 = 2;
const CH_SIZE: u32 = 3;
const CH_HUE: u32 = 4;

pub const PATTERN_DARK: Rgb = Rgb::new(0.01, 0.012, 0.025);
pub const BEAM_HIGHLIGHT: Rgb = Rgb::new(0.35, 0.6, 1.0);
pub const GRID_HIGHLIGHT: Rgb = Rgb::new(0.25, 0.95, 0.65);
const GRID_AXIS_WEIGHT: f32 = 0.8;

/// Unit direction to equirectangular UV. u in [0, 1), v = 0 at +Y.
#[inline]
pub fn direction_to_uv(d: Vec3) -> Vec2 {
    let u = (d.z.atan2(d.x) / TAU + 0.5).fract();
    let v = 0.5 - d.y.clamp(-1.0, 1.0).asin() / PI;
    Vec2::new(u, v)
}

/// Sparse hashed starfield with soft halos over a faint ambient sky
pub fn starfield(uv: Vec2, tiling: f32) -> Rgb {
    let p = uv * tiling;
    let cell = p.floor();
    let local = p - cell;

    // Integer tilings wrap horizontally so the u = 0/1 seam is invisible
    let columns = tiling.round();
    let columns = (columns >= 1.0 && (tiling - columns).abs() < 1e-3).then_some(columns as i32);

    let mut color = SKY_AMBIENT;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let cy = cell.y as i32 + dy;
            let cx = cell.x as i32 + dx;
            let cx = columns.map_or(cx, |n| cx.rem_euclid(n));

            if cell_hash(cx, cy, CH_PRESENCE) <= STAR_THRESHOLD {
                continue;
            }

            let star = Vec2::new(
                dx as f32 + cell_hash(cx, cy, CH_POS_X),
                dy as f32 + cell_hash(cx, cy, CH_POS_Y),
            );
            let dist = (star - local).length();
            let size = mix(STAR_SIZE_MIN, STAR_SIZE_MAX, cell_hash(cx, cy, CH_SIZE));
            let tint = STAR_COOL.mix(STAR_WARM, cell_hash(cx, cy, CH_HUE));

            let core = smoothstep(size, 0.0, dist) * 2.0;
            let halo = smoothstep(0.25, 0.0, dist) * 0.05;
            color = color + tint * (core + halo);
        }
    }
    color
}

/// Periodic Gaussian stripe profile centred on multiples of `spacing`
#[inline]
fn stripe(x: f32, spacing: f32, width: f32) -> f32 {
    let w = wrap_centered(x, spacing);
    let sigma = width.max(1e-4);
    (-0.5 * w * w / (sigma * sigma)).exp()
}

#[inline]
fn rotate_about_center(uv: Vec2, angle: f32) -> Vec2 {
    let c = Vec2::new(0.5, 0.5);
    (uv - c).rotate(angle) + c
}

/// Parallel glowing beams along one rotated axis
pub fn beams_color(uv: Vec2, bg: &Background) -> Rgb {
    let q = rotate_about_center(uv, bg.angle);
    let i = (stripe(q.x, bg.spacing, bg.width) * bg.intensity).clamp(0.0, 1.0);
    PATTERN_DARK.mix(BEAM_HIGHLIGHT, i)
}

/// Two crossed stripe families
pub fn grid_color(uv: Vec2, bg: &Background) -> Rgb {
    let q = rotate_about_center(uv, bg.angle);
    let lines = stripe(q.x, bg.spacing, bg.width) + stripe(q.y, bg.spacing, bg.width);
    let i = (lines * GRID_AXIS_WEIGHT * bg.intensity).clamp(0.0, 1.0);
    PATTERN_DARK.mix(GRID_HIGHLIGHT, i)
}

/// Sky color seen along a unit world direction
pub fn sample_background(dir: Vec3, bg: &Background) -> Rgb {
    let uv = direction_to_uv(dir);
    match bg.pattern {
        BackgroundPattern::Starfield => starfield(uv, bg.tiling),
        BackgroundPattern::Beams => beams_color(uv, bg),
        BackgroundPattern::Grid => grid_color(uv, bg),
    }
}
