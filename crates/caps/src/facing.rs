use std::f64::consts::{FRAC_PI_4, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight compass octants a cap can face.
///
/// Declaration order fixes the octant index: `North` is 0, then clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

/// Half-open azimuth interval `[start, start + length)` in radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct AzimuthRange {
    pub start: f64,
    pub length: f64,
}

impl AzimuthRange {
    pub const FULL: Self = Self {
        start: 0.0,
        length: TAU,
    };

    pub fn end(self) -> f64 {
        self.start + self.length
    }

    pub fn contains_range(self, other: AzimuthRange) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::North,
        Facing::NorthEast,
        Facing::East,
        Facing::SouthEast,
        Facing::South,
        Facing::SouthWest,
        Facing::West,
        Facing::NorthWest,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Facing::North => "N",
            Facing::NorthEast => "NE",
            Facing::East => "E",
            Facing::SouthEast => "SE",
            Facing::South => "S",
            Facing::SouthWest => "SW",
            Facing::West => "W",
            Facing::NorthWest => "NW",
        }
    }

    /// The octant this facing highlights: starts at `index · π/4`, spans π/4.
    pub fn wedge(self) -> AzimuthRange {
        AzimuthRange {
            start: self.index() as f64 * FRAC_PI_4,
            length: FRAC_PI_4,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::{AzimuthRange, Facing};
    use std::f64::consts::{FRAC_PI_4, TAU};

    #[test]
    fn index_follows_compass_order() {
        let names: Vec<&str> = Facing::ALL.iter().map(|f| f.abbreviation()).collect();
        assert_eq!(names, ["N", "NE", "E", "SE", "S", "SW", "W", "NW"]);
        for (i, f) in Facing::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(Facing::from_index(i), Some(*f));
        }
        assert_eq!(Facing::from_index(8), None);
    }

    #[test]
    fn wedges_are_one_octant_inside_full_turn() {
        for f in Facing::ALL {
            let wedge = f.wedge();
            assert_eq!(wedge.length, FRAC_PI_4);
            assert!(AzimuthRange::FULL.contains_range(wedge), "{f} escapes [0, 2π)");
        }
        assert_eq!(Facing::North.wedge().start, 0.0);
        assert!((Facing::NorthWest.wedge().end() - TAU).abs() < 1e-12);
    }

    #[test]
    fn serde_uses_compass_abbreviations() {
        let f: Facing = serde_json::from_str("\"SW\"").unwrap();
        assert_eq!(f, Facing::SouthWest);
        assert_eq!(serde_json::to_string(&Facing::East).unwrap(), "\"E\"");
    }
}
