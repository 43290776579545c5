//! Application state management.
//!
//! This module contains all state structures used throughout the application.
//! State is organized into logical groupings that correspond to different
//! areas of functionality.

mod auto_rotate;
mod morph;
mod settings;
mod stats;
mod tween;
pub mod url_state;

pub use morph::MorphState;
pub use settings::Settings;
pub use stats::RenderStats;

use crate::geo::FeatureSet;

/// Progress of the world boundaries load.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    /// Load failed; the placeholder is shown
    Fallback(String),
}

/// One-shot requests raised by the UI and handled by the app loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingActions {
    pub reload_dataset: bool,
    pub save_settings: bool,
    pub export_svg: bool,
}

/// Root application state containing all sub-states.
#[derive(Default)]
pub struct AppState {
    /// Morph progress, rotation and the interaction state machine
    pub morph: MorphState,

    /// Boundaries currently rendered
    pub features: FeatureSet,

    /// Dataset load progress
    pub load_status: LoadStatus,

    /// Generation of the most recent load request; older results are dropped
    pub load_generation: u64,

    /// User configuration
    pub settings: Settings,

    /// Application status message displayed in top bar
    pub status_message: String,

    /// Statistics about the last rendered frame
    pub render_stats: RenderStats,

    /// Requests to handle after the UI pass
    pub pending: PendingActions,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            morph: MorphState::new(settings.auto_rotate),
            settings,
            status_message: "Loading world boundaries...".to_string(),
            ..Default::default()
        }
    }

    /// Marks the dataset as loading again and returns the generation the
    /// new request must be tagged with.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_status = LoadStatus::Loading;
        self.status_message = "Loading world boundaries...".to_string();
        self.load_generation
    }

    /// Installs a finished load. Results from superseded requests are
    /// ignored; returns whether the result was applied.
    pub fn apply_load(&mut self, generation: u64, result: crate::atlas::LoadResult) -> bool {
        if generation != self.load_generation {
            log::debug!(
                "Dropping stale load result (generation {}, current {})",
                generation,
                self.load_generation
            );
            return false;
        }
        match result.error() {
            None => {
                self.load_status = LoadStatus::Loaded;
                self.status_message = "Ready".to_string();
            }
            Some(error) => {
                self.load_status = LoadStatus::Fallback(error.to_string());
                self.status_message = "Boundaries unavailable, showing placeholder".to_string();
            }
        }
        self.features = result.into_features();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::resolve;

    #[test]
    fn test_failed_load_installs_placeholder() {
        let mut state = AppState::default();
        let generation = state.begin_load();
        assert!(state.apply_load(generation, resolve(Err("offline".to_string()), "countries")));

        assert_eq!(state.load_status, LoadStatus::Fallback("offline".to_string()));
        assert_eq!(state.features.len(), 1);
        assert!(state.features.is_fallback());
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let geojson = r#"{"type":"FeatureCollection","features":[{"type":"Feature","id":"356",
            "properties":{"name":"India"},"geometry":{"type":"Polygon","coordinates":[[[70,10],[90,10],[90,30],[70,30],[70,10]]]}}]}"#;

        let mut state = AppState::default();
        let first = state.begin_load();
        let second = state.begin_load();
        assert_ne!(first, second);

        // The newer request finishes first, then the older one arrives
        assert!(state.apply_load(second, resolve(Ok(geojson.to_string()), "countries")));
        assert!(!state.apply_load(first, resolve(Err("timeout".to_string()), "countries")));

        assert_eq!(state.load_status, LoadStatus::Loaded);
        assert!(state.features.contains_id("356"));
        assert!(!state.features.is_fallback());
    }

    #[test]
    fn test_new_state_honors_auto_rotate_setting() {
        let settings = Settings {
            auto_rotate: false,
            ..Default::default()
        };
        let state = AppState::new(settings);
        assert!(!state.morph.auto_rotation_active());
        assert_eq!(state.load_status, LoadStatus::Loading);
    }
}
