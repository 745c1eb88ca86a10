//! Deterministic weather cycle.
//!
//! Weather rerolls on a fixed tick cadence from the seeded weather RNG and eases
//! into the new kind so the renderer can crossfade.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ticks between weather rolls (one minute at 60 TPS).
pub const WEATHER_ROLL_INTERVAL: u64 = 3600;

/// Ticks for a new weather kind to fully blend in.
pub const WEATHER_TRANSITION_TICKS: u64 = 300;

/// Weather kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    /// Clear skies.
    #[default]
    Clear,
    /// Rainfall.
    Rain,
    /// Low visibility.
    Fog,
    /// Heavy rain with lightning.
    Storm,
}

impl WeatherKind {
    /// Every kind, in roll order.
    pub const ALL: [WeatherKind; 4] = [
        WeatherKind::Clear,
        WeatherKind::Rain,
        WeatherKind::Fog,
        WeatherKind::Storm,
    ];

    /// Canonical lowercase key.
    pub const fn as_str(self) -> &'static str {
        match self {
            WeatherKind::Clear => "clear",
            WeatherKind::Rain => "rain",
            WeatherKind::Fog => "fog",
            WeatherKind::Storm => "storm",
        }
    }

    /// Full-strength intensity of the kind.
    pub const fn intensity(self) -> f64 {
        match self {
            WeatherKind::Clear => 0.0,
            WeatherKind::Fog => 0.5,
            WeatherKind::Rain => 0.6,
            WeatherKind::Storm => 1.0,
        }
    }
}

/// Current weather descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Active kind.
    pub kind: WeatherKind,
    /// Target intensity of `kind`.
    pub intensity: f64,
    /// Blend progress towards `kind` in `[0, 1]`.
    pub transition: f64,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            kind: WeatherKind::Clear,
            intensity: 0.0,
            transition: 1.0,
        }
    }
}

/// Event emitted when weather changes (for testkit logging and replay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherChanged {
    /// Previous kind.
    pub from: WeatherKind,
    /// New kind.
    pub to: WeatherKind,
}

impl Weather {
    /// Intensity the renderer should draw this tick.
    pub fn effective_intensity(&self) -> f64 {
        self.intensity * self.transition
    }

    /// Advance one tick. Rolls a new kind every [`WEATHER_ROLL_INTERVAL`] ticks.
    ///
    /// `rng` is only drawn from on roll ticks. Returns the change, if any.
    pub fn tick<R: Rng>(self, tick: u64, rng: &mut R) -> (Self, Option<WeatherChanged>) {
        let mut next = self;
        if next.transition < 1.0 {
            next.transition = (next.transition + 1.0 / WEATHER_TRANSITION_TICKS as f64).min(1.0);
        }

        if tick == 0 || tick % WEATHER_ROLL_INTERVAL != 0 {
            return (next, None);
        }

        let kind = WeatherKind::ALL[rng.gen_range(0..WeatherKind::ALL.len())];
        if kind == next.kind {
            return (next, None);
        }
        let change = WeatherChanged {
            from: next.kind,
            to: kind,
        };
        next.kind = kind;
        next.intensity = kind.intensity();
        next.transition = 0.0;
        (next, Some(change))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weather_starts_clear_and_settled() {
        let weather = Weather::default();
        assert_eq!(weather.kind, WeatherKind::Clear);
        assert_eq!(weather.effective_intensity(), 0.0);
        assert_eq!(weather.transition, 1.0);
    }

    #[test]
    fn off_cadence_ticks_do_not_roll() {
        let mut rng = StdRng::seed_from_u64(1);
        let (weather, change) = Weather::default().tick(1234, &mut rng);
        assert!(change.is_none());
        assert_eq!(weather, Weather::default());
    }

    #[test]
    fn transition_eases_in() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut weather = Weather {
            kind: WeatherKind::Storm,
            intensity: 1.0,
            transition: 0.0,
        };
        for t in 1..=150 {
            weather = weather.tick(t, &mut rng).0;
        }
        assert!((weather.transition - 0.5).abs() < 1e-9);
        for t in 151..=400 {
            weather = weather.tick(t, &mut rng).0;
        }
        assert_eq!(weather.transition, 1.0);
    }

    #[test]
    fn changes_report_both_kinds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut weather = Weather::default();
        let mut seen = None;
        for roll in 1..=40 {
            let (next, change) = weather.tick(roll * WEATHER_ROLL_INTERVAL, &mut rng);
            if let Some(change) = change {
                assert_eq!(change.from, weather.kind);
                assert_eq!(change.to, next.kind);
                assert_eq!(next.intensity, next.kind.intensity());
                assert_eq!(next.transition, 0.0);
                seen = Some(change);
                break;
            }
            weather = next;
        }
        assert!(seen.is_some(), "40 rolls never changed the weather");
    }
}
