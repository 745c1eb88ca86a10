//! Player-facing game settings.
//!
//! The simulation only reads `fov` (interaction zoom) and `weather_enabled`;
//! the rest is carried for the render collaborator.

use serde::{Deserialize, Serialize};

/// Narrowest field of view the zoom honours.
pub const MIN_FOV: f64 = 60.0;
/// Widest field of view the zoom honours.
pub const MAX_FOV: f64 = 140.0;
const DEFAULT_FOV: f64 = 60.0;

/// Render quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphicsQuality {
    /// Minimal effects.
    Low,
    /// Balanced.
    Medium,
    /// Default.
    #[default]
    High,
    /// Everything on.
    Ultra,
}

/// Settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw distance in world units.
    pub view_distance: f64,
    /// Quality preset.
    pub graphics_quality: GraphicsQuality,
    /// Skip expensive effects.
    pub performance_mode: bool,
    /// Field of view; top-down zoom is `fov / 90`.
    pub fov: f64,
    /// Show the frame counter.
    pub show_fps: bool,
    /// Camera bob while walking.
    pub camera_bob: bool,
    /// HUD scale factor.
    pub ui_scale: f64,
    /// Crosshair CSS color.
    pub crosshair_color: String,
    /// Roll weather changes.
    pub weather_enabled: bool,
}

impl Settings {
    /// Screen-to-world zoom factor. `fov` is clamped to `MIN_FOV..=MAX_FOV`.
    pub fn zoom(&self) -> f64 {
        let fov = if self.fov.is_finite() {
            self.fov.clamp(MIN_FOV, MAX_FOV)
        } else {
            DEFAULT_FOV
        };
        fov / 90.0
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view_distance: 2500.0,
            graphics_quality: GraphicsQuality::High,
            performance_mode: false,
            fov: DEFAULT_FOV,
            show_fps: true,
            camera_bob: true,
            ui_scale: 1.0,
            crosshair_color: "#f97316".to_string(),
            weather_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zoom() {
        assert!((Settings::default().zoom() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zoom_clamps_out_of_range_fov() {
        let with_fov = |fov| Settings {
            fov,
            ..Settings::default()
        };
        assert_eq!(with_fov(0.0).zoom(), MIN_FOV / 90.0);
        assert_eq!(with_fov(-30.0).zoom(), MIN_FOV / 90.0);
        assert_eq!(with_fov(400.0).zoom(), MAX_FOV / 90.0);
        assert_eq!(with_fov(f64::NAN).zoom(), DEFAULT_FOV / 90.0);
        assert_eq!(with_fov(90.0).zoom(), 1.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"fov": 90.0, "weather_enabled": false}"#).expect("parse");
        assert_eq!(settings.zoom(), 1.0);
        assert!(!settings.weather_enabled);
        assert_eq!(settings.view_distance, 2500.0);
    }
}
