use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius (km), the default reference sphere.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Named cap sizes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaClass {
    #[serde(alias = "Neighborhood")]
    Neighborhood,
    #[serde(alias = "Small Town")]
    SmallTown,
    #[serde(alias = "Small City")]
    SmallCity,
    #[default]
    #[serde(alias = "Large City")]
    LargeCity,
    #[serde(alias = "State")]
    State,
}

impl AreaClass {
    pub const ALL: [AreaClass; 5] = [
        AreaClass::Neighborhood,
        AreaClass::SmallTown,
        AreaClass::SmallCity,
        AreaClass::LargeCity,
        AreaClass::State,
    ];

    /// Preset surface area in km².
    pub fn area_km2(self) -> f64 {
        match self {
            AreaClass::Neighborhood => 5.0,
            AreaClass::SmallTown => 50.0,
            AreaClass::SmallCity => 250.0,
            AreaClass::LargeCity => 1000.0,
            AreaClass::State => 100_000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AreaClass::Neighborhood => "Neighborhood",
            AreaClass::SmallTown => "Small Town",
            AreaClass::SmallCity => "Small City",
            AreaClass::LargeCity => "Large City",
            AreaClass::State => "State",
        }
    }

    /// Opening angle of this preset on a sphere of `sphere_radius`.
    pub fn opening_angle(self, sphere_radius: f64) -> f64 {
        theta_from_area(self.area_km2(), sphere_radius)
    }
}

impl fmt::Display for AreaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Half-angle (radians) of the spherical cap with surface `area` on a sphere
/// of `sphere_radius`.
///
/// Inverts `A = 2πR²(1 - cos θ)`. The arccos argument is clamped to `[-1, 1]`,
/// so areas of the whole sphere (`4πR²`) or more saturate at π and
/// non-positive areas at 0.
pub fn theta_from_area(area: f64, sphere_radius: f64) -> f64 {
    let normaliser = 2.0 * PI * sphere_radius * sphere_radius;
    let cos_theta = 1.0 - area / normaliser;
    cos_theta.clamp(-1.0, 1.0).acos()
}
