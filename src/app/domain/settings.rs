use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::app::infrastructure::error::AppError;

const APP_DIR: &str = "tag-browser";
const REGISTRY_FILE: &str = "dict.csv";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    /// Program used to open documents. `None` defers to the desktop's
    /// default handler for the file type.
    #[serde(default)]
    pub viewer_command: Option<String>,

    /// Where the tag registry lives. `None` uses the per-user data dir.
    #[serde(default)]
    pub registry_file: Option<PathBuf>,

    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            viewer_command: None,
            registry_file: None,
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                if let Err(e) = default.save() {
                    log::warn!("Failed to write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push("settings.json");
        path
    }

    /// The registry file in effect: the configured override, else
    /// `<data dir>/tag-browser/dict.csv`.
    pub fn registry_path(&self) -> PathBuf {
        if let Some(ref custom) = self.registry_file {
            return custom.clone();
        }
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(REGISTRY_FILE);
        path
    }

    /// Viewer command with surrounding blanks removed; blank means unset.
    pub fn viewer(&self) -> Option<&str> {
        self.viewer_command
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_mode, ThemeMode::SystemDefault);
        assert!(settings.viewer_command.is_none());
        assert!(settings.registry_file.is_none());
        assert!(settings.confirm_delete);
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings {
            viewer_command: Some("zathura".to_string()),
            registry_file: Some(PathBuf::from("/tmp/tags.csv")),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Older config missing newer fields
        let json = r#"{"theme_mode": "Dark"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert!(settings.confirm_delete);
        assert!(settings.viewer_command.is_none());
    }

    #[test]
    fn test_registry_path_override() {
        let settings = AppSettings {
            registry_file: Some(PathBuf::from("/srv/papers/dict.csv")),
            ..Default::default()
        };
        assert_eq!(settings.registry_path(), PathBuf::from("/srv/papers/dict.csv"));
    }

    #[test]
    fn test_default_registry_path_file_name() {
        let path = AppSettings::default().registry_path();
        assert!(path.ends_with("tag-browser/dict.csv"));
    }

    #[test]
    fn test_blank_viewer_is_unset() {
        let mut settings = AppSettings {
            viewer_command: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.viewer(), None);
        settings.viewer_command = Some(" zathura ".to_string());
        assert_eq!(settings.viewer(), Some("zathura"));
    }
}
