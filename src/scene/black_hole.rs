use super::SceneError;
use crate::color::Rgb;
use crate::math3d::Vec3;
use serde::{Deserialize, Serialize};

const BASIS_TOLERANCE: f32 = 1e-3;

/// The lens itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackHole {
    pub position: Vec3,
    /// Gravitational (Schwarzschild) radius in world units
    pub r_g: f32,
    /// Dimensionless spin; sign picks the frame-dragging direction
    pub spin: f32,
}

impl Default for BlackHole {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            r_g: 1.0,
            spin: 0.0,
        }
    }
}

impl BlackHole {
    /// Critical impact parameter of the photon sphere, 3√3·r_g
    #[inline]
    pub fn critical_impact_parameter(&self) -> f32 {
        3.0 * 3.0_f32.sqrt() * self.r_g
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.r_g >= 0.0 && self.r_g.is_finite()) {
            return Err(SceneError::InvalidGeometry(
                "r_g must be a finite non-negative length".into(),
            ));
        }
        if !self.spin.is_finite() {
            return Err(SceneError::InvalidGeometry("spin must be finite".into()));
        }
        Ok(())
    }
}

/// Thin emitting disk centered on the black hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccretionDisk {
    pub disk_x: Vec3,
    pub disk_y: Vec3,
    /// Disk normal, also used as the black hole spin axis
    pub disk_n: Vec3,
    pub r_in: f32,
    pub r_out: f32,
    /// Keplerian speed scale: v = orbital_speed / sqrt(r)
    pub orbital_speed: f32,
    pub opacity: f32,
    /// Half-thickness of the emitting slab
    pub thickness: f32,
    pub hot: Rgb,
    pub cool: Rgb,
}

impl Default for AccretionDisk {
    fn default() -> Self {
        Self::from_normal(Vec3::new(0.0, 1.0, -0.25))
    }
}

impl AccretionDisk {
    /// Disk with default radiative settings whose plane is perpendicular to `normal`
    pub fn from_normal(normal: Vec3) -> Self {
        let disk_n = normal.normalize();
        let disk_x = disk_n.any_orthogonal();
        let disk_y = disk_n.cross(&disk_x);
        Self {
            disk_x,
            disk_y,
            disk_n,
            r_in: 3.0,
            r_out: 9.0,
            orbital_speed: 1.0,
            opacity: 0.9,
            thickness: 0.15,
            hot: Rgb::new(1.0, 0.85, 0.6),
            cool: Rgb::new(0.9, 0.35, 0.08),
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        for (name, axis) in [("disk_x", self.disk_x), ("disk_y", self.disk_y), ("disk_n", self.disk_n)]
        {
            if (axis.length() - 1.0).abs() > BASIS_TOLERANCE {
                return Err(SceneError::InvalidDisk(format!("{} is not unit length", name)));
            }
        }
        if self.disk_x.dot(&self.disk_y).abs() > BASIS_TOLERANCE
            || self.disk_x.dot(&self.disk_n).abs() > BASIS_TOLERANCE
            || self.disk_y.dot(&self.disk_n).abs() > BASIS_TOLERANCE
        {
            return Err(SceneError::InvalidDisk(
                "disk basis vectors are not mutually orthogonal".into(),
            ));
        }
        if !(self.r_in > 0.0 && self.r_in < self.r_out) {
            return Err(SceneError::InvalidGeometry(format!(
                "disk radii must satisfy 0 < r_in < r_out (got {} .. {})",
                self.r_in, self.r_out
            )));
        }
        // Plane hits land within rounding noise of h = 0, so the slab needs real depth
        if !(self.thickness > 0.0 && self.thickness.is_finite()) {
            return Err(SceneError::InvalidGeometry(format!(
                "disk thickness must be a positive half-height (got {}); a zero-thickness slab \
                 rejects plane hits at random",
                self.thickness
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SceneError::InvalidGeometry(format!(
                "disk opacity must lie in [0, 1] (got {})",
                self.opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_normal_builds_orthonormal_basis() {
        for n in [Vec3::Y, Vec3::X, Vec3::new(0.2, 1.0, -0.4)] {
            let disk = AccretionDisk::from_normal(n);
            assert!(disk.validate().is_ok());
            assert!(disk.disk_x.cross(&disk.disk_y).approx_eq(&disk.disk_n, 1e-5));
        }
    }

    #[test]
    fn test_rejects_inverted_radii() {
        let disk = AccretionDisk {
            r_in: 8.0,
            r_out: 4.0,
            ..AccretionDisk::default()
        };
        assert!(matches!(disk.validate(), Err(SceneError::InvalidGeometry(_))));
    }

    #[test]
    fn test_rejects_flat_slab() {
        for thickness in [0.0, -0.1, f32::NAN] {
            let disk = AccretionDisk {
                thickness,
                ..AccretionDisk::default()
            };
            assert!(
                matches!(disk.validate(), Err(SceneError::InvalidGeometry(_))),
                "thickness {} accepted",
                thickness
            );
        }
        let thin = AccretionDisk {
            thickness: 1e-3,
            ..AccretionDisk::default()
        };
        assert!(thin.validate().is_ok());
    }

    #[test]
    fn test_critical_impact_parameter() {
        let bh = BlackHole::default();
        assert!((bh.critical_impact_parameter() - 5.196152).abs() < 1e-5);
    }
}
