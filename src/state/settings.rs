//! User settings for the dataset source and display.
//!
//! Settings are persisted to localStorage on the web and to a JSON file in
//! the working directory on native, so they survive reloads.

use serde::{Deserialize, Serialize};

/// Default world boundaries document.
pub const DEFAULT_DATASET_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// Default TopoJSON object holding the country boundaries.
pub const DEFAULT_OBJECT_NAME: &str = "countries";

/// Persisted configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL of the boundaries document (TopoJSON or GeoJSON).
    pub dataset_url: String,
    /// Object to extract when the document is a TopoJSON topology.
    pub object_name: String,
    /// Spin the globe while idle in sphere mode.
    pub auto_rotate: bool,
    /// Show the highlighted-country legend in the side panel.
    pub show_legend: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            object_name: DEFAULT_OBJECT_NAME.to_string(),
            auto_rotate: true,
            show_legend: true,
        }
    }
}

impl Settings {
    /// localStorage key for persisting settings.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "globe_workbench_settings";

    /// Settings file used by native builds.
    #[cfg(not(target_arch = "wasm32"))]
    const SETTINGS_FILE: &'static str = "globe-workbench.json";

    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut settings: Self =
            serde_json::from_str(json).map_err(|e| format!("Invalid settings: {}", e))?;
        settings.normalize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }

    /// Blank text fields fall back to their defaults.
    fn normalize(&mut self) {
        if self.dataset_url.trim().is_empty() {
            self.dataset_url = DEFAULT_DATASET_URL.to_string();
        }
        if self.object_name.trim().is_empty() {
            self.object_name = DEFAULT_OBJECT_NAME.to_string();
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Self::parse_or_default(&json),
            _ => Self::default(),
        }
    }

    /// Save settings to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), String> {
        let window = web_sys::window().ok_or("No window")?;
        let storage = window
            .local_storage()
            .map_err(|e| format!("localStorage unavailable: {:?}", e))?
            .ok_or("localStorage unavailable")?;

        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| format!("Failed to save settings: {:?}", e))?;

        log::info!("Saved settings to localStorage");
        Ok(())
    }

    /// Load settings from the working directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::SETTINGS_FILE) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", Self::SETTINGS_FILE, e);
                Self::default()
            }
        }
    }

    /// Save settings to the working directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), String> {
        let json = self.to_json()?;
        std::fs::write(Self::SETTINGS_FILE, json)
            .map_err(|e| format!("Failed to write {}: {}", Self::SETTINGS_FILE, e))?;

        log::info!("Saved settings to {}", Self::SETTINGS_FILE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_world_atlas() {
        let settings = Settings::default();
        assert_eq!(settings.dataset_url, DEFAULT_DATASET_URL);
        assert_eq!(settings.object_name, "countries");
        assert!(settings.auto_rotate);
        assert!(settings.show_legend);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{"auto_rotate": false}"#).unwrap();
        assert!(!settings.auto_rotate);
        assert_eq!(settings.object_name, DEFAULT_OBJECT_NAME);
        assert!(settings.show_legend);
    }

    #[test]
    fn test_blank_strings_are_normalized() {
        let settings = Settings::from_json(r#"{"dataset_url": "  ", "object_name": ""}"#).unwrap();
        assert_eq!(settings.dataset_url, DEFAULT_DATASET_URL);
        assert_eq!(settings.object_name, DEFAULT_OBJECT_NAME);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("not json").is_err());
        assert_eq!(Settings::parse_or_default("{"), Settings::default());
    }

    #[test]
    fn test_json_keeps_edits() {
        let mut settings = Settings::default();
        settings.object_name = "land".to_string();
        settings.show_legend = false;

        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
