use super::SceneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which sky generator the background synthesizer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    #[default]
    Starfield,
    #[serde(alias = "radial-beam")]
    Beams,
    Grid,
}

impl BackgroundPattern {
    pub const ALL: [Self; 3] = [Self::Starfield, Self::Beams, Self::Grid];

    /// Numeric selector as used by hosts that pass the pattern as an integer
    pub fn selector(self) -> u32 {
        match self {
            Self::Starfield => 0,
            Self::Beams => 1,
            Self::Grid => 2,
        }
    }
}

impl TryFrom<u32> for BackgroundPattern {
    type Error = SceneError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Starfield),
            1 => Ok(Self::Beams),
            2 => Ok(Self::Grid),
            other => Err(SceneError::UnknownPattern(other.to_string())),
        }
    }
}

impl FromStr for BackgroundPattern {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starfield" | "stars" | "0" => Ok(Self::Starfield),
            "beams" | "radial-beam" | "1" => Ok(Self::Beams),
            "grid" | "2" => Ok(Self::Grid),
            other => Err(SceneError::UnknownPattern(other.to_string())),
        }
    }
}

impl fmt::Display for BackgroundPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Starfield => "starfield",
            Self::Beams => "beams",
            Self::Grid => "grid",
        };
        f.write_str(name)
    }
}

/// Sky descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub pattern: BackgroundPattern,
    /// Starfield cells per unit of UV
    pub tiling: f32,
    /// Beam/grid rotation in radians
    pub angle: f32,
    /// Beam/grid period in UV units
    pub spacing: f32,
    /// Gaussian stripe width (sigma) in UV units
    pub width: f32,
    pub intensity: f32,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            pattern: BackgroundPattern::Starfield,
            tiling: 240.0,
            angle: 0.3,
            spacing: 0.08,
            width: 0.01,
            intensity: 1.0,
        }
    }
}
