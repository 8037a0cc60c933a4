use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::area::AreaClass;
use crate::facing::Facing;

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;
/// Editable altitude range (km above the reference sphere).
pub const ALTITUDE_RANGE: RangeInclusive<f64> = 0.0..=10_000.0;

/// A cap as the user describes it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapDescriptor {
    /// Degrees, `[-90, 90]`.
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Degrees, `[-180, 180]`.
    #[serde(alias = "lon")]
    pub longitude: f64,
    /// Kilometers above the reference sphere.
    pub altitude: f64,
    #[serde(alias = "size")]
    pub area_class: AreaClass,
    #[serde(alias = "direction")]
    pub facing: Facing,
}

impl Default for CapDescriptor {
    /// The cap created by "add cap": equator/prime meridian, 10 km up.
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 10.0,
            area_class: AreaClass::LargeCity,
            facing: Facing::North,
        }
    }
}

impl CapDescriptor {
    pub fn new(
        latitude: f64,
        longitude: f64,
        altitude: f64,
        area_class: AreaClass,
        facing: Facing,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            area_class,
            facing,
        }
    }

    /// Radius of the sphere the cap is drawn on.
    pub fn cap_radius(&self, sphere_radius: f64) -> f64 {
        sphere_radius + self.altitude
    }

    /// Caps shown on startup: Houston and Los Angeles.
    pub fn initial_set() -> Vec<CapDescriptor> {
        vec![
            CapDescriptor::new(29.749907, -95.358421, 10.0, AreaClass::LargeCity, Facing::North),
            CapDescriptor::new(34.052235, -118.243683, 20.0, AreaClass::LargeCity, Facing::East),
        ]
    }
}
