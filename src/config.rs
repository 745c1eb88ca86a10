use rusted_world::{Settings, WorldGenConfig};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";

/// Everything the driver reads from `config/settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Player-facing settings handed to the simulation.
    pub settings: Settings,
    /// Island population tunables.
    pub worldgen: WorldGenConfig,
    /// Optional JSON recipe book replacing the stock recipes.
    pub recipes: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_lenient(&contents, path),
            Err(err) => {
                if path != Path::new(DEFAULT_SETTINGS_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Settings not found at {}. Using defaults", path.display());
                }
                AppConfig::default()
            }
        }
    }

    fn parse_lenient(contents: &str, path: &Path) -> Self {
        match toml::from_str::<AppConfig>(contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                AppConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> AppConfig {
        AppConfig::parse_lenient(contents, Path::new("test.toml"))
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = parse(
            r#"
            [settings]
            fov = 90.0
            weather_enabled = false

            [worldgen]
            entity_target = 300
            "#,
        );
        assert_eq!(cfg.settings.fov, 90.0);
        assert!(!cfg.settings.weather_enabled);
        assert_eq!(cfg.settings.view_distance, Settings::default().view_distance);
        assert_eq!(cfg.worldgen.entity_target, 300);
        assert_eq!(cfg.worldgen.npc_target, WorldGenConfig::default().npc_target);
        assert!(cfg.recipes.is_none());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        assert_eq!(parse("[settings\nfov = "), AppConfig::default());
        assert_eq!(parse("[settings]\nfov = \"wide\""), AppConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load_from_path(Path::new("/nonexistent/rusted/settings.toml"));
        assert_eq!(cfg, AppConfig::default());
    }
}
