use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::PersistError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(super) struct AppSettings {
    pub project_path: String,
    /// Where the SVG picker starts; falls back to the working directory.
    pub svg_directory: Option<String>,
    pub slide_width: f32,
    pub slide_height: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            project_path: "project.json".to_string(),
            svg_directory: None,
            slide_width: 960.0,
            slide_height: 540.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SettingsFormat {
    Toml,
    Json,
}

impl SettingsFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Toml => Self::Json,
            Self::Json => Self::Toml,
        }
    }

    fn parse(self, text: &str) -> Option<AppSettings> {
        match self {
            Self::Toml => toml::from_str(text).ok(),
            Self::Json => serde_json::from_str(text).ok(),
        }
    }

    fn render(self, settings: &AppSettings) -> Result<String, PersistError> {
        Ok(match self {
            Self::Toml => toml::to_string_pretty(settings)?,
            Self::Json => serde_json::to_string_pretty(settings)?,
        })
    }
}

/// Reads settings in the format the extension names, accepting the other
/// format's content as well. `None` when the file is missing or neither
/// parser accepts it.
pub(super) fn load_settings(path: impl AsRef<Path>) -> Option<AppSettings> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).ok()?;
    let format = SettingsFormat::of(path);
    let settings = format.parse(&text).or_else(|| format.other().parse(&text));
    if settings.is_none() {
        warn!("ignoring unparsable settings in {}", path.display());
    }
    settings
}

pub(super) fn save_settings(
    path: impl AsRef<Path>,
    settings: &AppSettings,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let text = SettingsFormat::of(path).render(settings)?;
    fs::write(path, text).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "slide_width = 1280.0\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.slide_width, 1280.0);
        assert_eq!(settings.slide_height, 540.0);
        assert_eq!(settings.project_path, "project.json");
    }

    #[test]
    fn json_content_in_toml_file_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, r#"{"project_path": "talk.json"}"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.project_path, "talk.json");
    }

    #[test]
    fn save_then_load_in_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            project_path: "deck.json".to_string(),
            svg_directory: Some("figures".to_string()),
            slide_width: 800.0,
            slide_height: 450.0,
        };
        for name in ["settings.toml", "settings.json"] {
            let path = dir.path().join(name);
            save_settings(&path, &settings).unwrap();
            assert_eq!(load_settings(&path), Some(settings.clone()));
        }
        let toml_text = std::fs::read_to_string(dir.path().join("settings.toml")).unwrap();
        assert!(toml_text.contains("project_path = \"deck.json\""));
    }

    #[test]
    fn extension_picks_format_case_insensitively() {
        assert_eq!(SettingsFormat::of(Path::new("a/SETTINGS.TOML")), SettingsFormat::Toml);
        assert_eq!(SettingsFormat::of(Path::new("settings.json")), SettingsFormat::Json);
        assert_eq!(SettingsFormat::of(Path::new("settings")), SettingsFormat::Json);
    }

    #[test]
    fn garbage_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "{{ not settings").unwrap();
        assert_eq!(load_settings(&path), None);
    }

    #[test]
    fn unreadable_settings_are_none() {
        assert_eq!(load_settings("/nonexistent/settings.toml"), None);
    }
}
