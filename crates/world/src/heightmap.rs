//! Height field for the island.
//!
//! Elevation is a pure function of world coordinates: a radial falloff from the
//! map center perturbed by three sinusoidal layers so the coastline is not a
//! perfect circle. Nothing here is cached; callers resample on demand.

use serde::{Deserialize, Serialize};

/// Side length of the square map in world units.
pub const MAP_SIZE: f64 = 12_000.0;

/// Below this elevation the player is swimming.
pub const SWIM_THRESHOLD: f64 = 0.08;

/// Spawn validity and NPC movement treat anything at or below this as water.
pub const WATER_THRESHOLD: f64 = 0.1;

/// Radius (as a fraction of map size) at which the radial falloff reaches zero.
const FALLOFF_RADIUS: f64 = MAP_SIZE * 0.48;

/// Map center in world units.
pub fn map_center() -> (f64, f64) {
    (MAP_SIZE / 2.0, MAP_SIZE / 2.0)
}

/// Sample terrain elevation at `(x, y)`.
///
/// Roughly in `[-0.3, 1.1]`. Identical inputs always return bit-identical output.
pub fn height_at(x: f64, y: f64) -> f64 {
    let (cx, cy) = map_center();
    let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
    let mut h = 1.0 - dist / FALLOFF_RADIUS;
    // Continental swell (~1200 units).
    h += (x / 1200.0).sin() * 0.1 + (y / 1200.0).cos() * 0.1;
    // Diagonal ridges (~400-500 units).
    h += (x / 400.0 + y / 500.0).sin() * 0.05;
    // Fine ripple (~150 units).
    h += (x / 150.0).sin() * 0.02;
    h
}

/// Biome band derived from elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    /// `h < 0.08`
    DeepWater,
    /// `0.08 <= h < 0.14`
    Shallows,
    /// `0.14 <= h < 0.22`
    Sand,
    /// `0.22 <= h < 0.45`
    Plains,
    /// `0.45 <= h < 0.75`
    Forest,
    /// `h >= 0.75`
    Rock,
}

impl Biome {
    /// Classify an elevation sample.
    pub fn classify(h: f64) -> Self {
        if h < SWIM_THRESHOLD {
            Biome::DeepWater
        } else if h < 0.14 {
            Biome::Shallows
        } else if h < 0.22 {
            Biome::Sand
        } else if h < 0.45 {
            Biome::Plains
        } else if h < 0.75 {
            Biome::Forest
        } else {
            Biome::Rock
        }
    }

    /// Biome at a world position.
    pub fn at(x: f64, y: f64) -> Self {
        Self::classify(height_at(x, y))
    }

    /// Canonical lowercase key for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Biome::DeepWater => "deep_water",
            Biome::Shallows => "shallows",
            Biome::Sand => "sand",
            Biome::Plains => "plains",
            Biome::Forest => "forest",
            Biome::Rock => "rock",
        }
    }

    /// Whether the band is water.
    pub const fn is_water(self) -> bool {
        matches!(self, Biome::DeepWater | Biome::Shallows)
    }
}

/// Whether a player at this position is swimming.
pub fn is_swimming_at(x: f64, y: f64) -> bool {
    Biome::at(x, y) == Biome::DeepWater
}
