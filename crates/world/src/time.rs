//! In-game day clock.
//!
//! The clock counts minutes of a 24h day and advances a fixed amount per tick,
//! so a full day takes 144,000 ticks (40 minutes at 60 TPS).

use serde::{Deserialize, Serialize};

/// Minutes in a day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Minutes advanced per tick.
pub const MINUTES_PER_TICK: f64 = 0.01;

/// Time of day in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayClock {
    /// Minutes in `[0, 1440)`.
    pub minutes: f64,
}

impl DayClock {
    /// Clock at an explicit time.
    pub fn at(minutes: f64) -> Self {
        Self {
            minutes: minutes.rem_euclid(MINUTES_PER_DAY),
        }
    }

    /// Advance by one tick, wrapping at midnight.
    pub fn tick(self) -> Self {
        Self::at(self.minutes + MINUTES_PER_TICK)
    }

    /// Fraction of the day elapsed (0.0 = midnight, 0.5 = noon).
    pub fn time_of_day(&self) -> f64 {
        self.minutes / MINUTES_PER_DAY
    }

    /// Whole hour, 0-23.
    pub fn hour(&self) -> u32 {
        (self.minutes / 60.0) as u32
    }

    /// Night runs from 20:00 to 06:00.
    pub fn is_night(&self) -> bool {
        let hour = self.hour();
        !(6..20).contains(&hour)
    }

    /// Ambient light level for the renderer (0.2 at midnight, 1.0 at noon).
    pub fn daylight(&self) -> f64 {
        let angle = (self.time_of_day() - 0.25) * std::f64::consts::TAU;
        let normalized = (angle.sin() + 1.0) / 2.0;
        0.2 + 0.8 * normalized
    }
}

impl Default for DayClock {
    /// Games start at noon.
    fn default() -> Self {
        Self::at(720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_noon() {
        let clock = DayClock::default();
        assert_eq!(clock.minutes, 720.0);
        assert_eq!(clock.hour(), 12);
        assert!(!clock.is_night());
        assert!((clock.daylight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wraps_at_midnight() {
        let clock = DayClock::at(1439.995).tick();
        assert!(clock.minutes < 0.01);
        assert!(clock.is_night());
    }

    #[test]
    fn daylight_has_minimum_at_midnight() {
        assert!((DayClock::at(0.0).daylight() - 0.2).abs() < 1e-9);
    }
}
