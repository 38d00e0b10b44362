//! Hashing and Interpolation Utilities
//!
//! Integer-only hashing keeps procedural patterns identical on every platform:
//! nothing here depends on the precision of `sin`/`cos`.

/// Hash-based pseudo-random value for an integer cell and a channel.
/// Returns a value in [0.0, 1.0).
///
/// Different `channel` values give independent streams for the same cell
/// (presence, position, size, hue...).
#[inline]
pub fn cell_hash(x: i32, y: i32, channel: u32) -> f32 {
    let mut h = channel
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add(x as u32)
        .wrapping_mul(374761393);
    h = h.wrapping_add(y as u32).wrapping_mul(668265263);
    h = (h ^ (h >> 13)).wrapping_mul(1274126177);
    h ^= h >> 16;
    // Top 24 bits fit exactly in an f32 mantissa
    (h >> 8) as f32 / 16_777_216.0
}

/// Hermite step between two edges, GLSL-style.
///
/// Edges may be given in reverse order (`edge0 > edge1`) for a falling step.
/// Coincident edges degrade to a hard step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation; `t` is not clamped
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Signed distance to the nearest multiple of `period`, in [-period/2, period/2]
#[inline]
pub fn wrap_centered(x: f32, period: f32) -> f32 {
    let period = period.max(1e-4);
    x - period * (x / period).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_hash_deterministic() {
        let v1 = cell_hash(10, 20, 3);
        let v2 = cell_hash(10, 20, 3);
        assert_eq!(v1, v2);
    }

    #[test]
    fn test_cell_hash_range() {
        for x in -50..50 {
            for y in -50..50 {
                let v = cell_hash(x, y, 0);
                assert!(v >= 0.0 && v < 1.0);
            }
        }
    }

    #[test]
    fn test_cell_hash_channels_differ() {
        let same = (0..64)
            .filter(|&i| cell_hash(i, 7, 0) == cell_hash(i, 7, 1))
            .count();
        assert!(same < 4, "channels should be independent, {} collisions", same);
    }

    #[test]
    fn test_cell_hash_density() {
        // Roughly 0.4% of cells clear the star threshold
        let hits = (0..200)
            .flat_map(|x| (0..200).map(move |y| (x, y)))
            .filter(|&(x, y)| cell_hash(x, y, 0) > 0.996)
            .count();
        assert!(hits > 80 && hits < 240, "unexpected density: {}", hits);
    }

    #[test]
    fn test_smoothstep_bounds() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_smoothstep_reversed_edges() {
        assert_eq!(smoothstep(0.25, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(0.25, 0.0, 0.3), 0.0);
        let a = smoothstep(0.25, 0.0, 0.05);
        let b = smoothstep(0.25, 0.0, 0.10);
        assert!(a > b);
    }

    #[test]
    fn test_smoothstep_coincident_edges() {
        assert_eq!(smoothstep(0.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
    }

    #[test]
    fn test_wrap_centered() {
        assert!((wrap_centered(0.26, 0.1) - (-0.04)).abs() < 1e-5);
        assert!(wrap_centered(0.3, 0.1).abs() < 1e-5);
        assert!(wrap_centered(0.05, 0.0).abs() < 1e-3);
    }
}
