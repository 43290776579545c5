//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(231, 138, 83);
    /// Success/positive indicator.
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    /// Degraded-but-working indicator.
    pub const WARNING: Color32 = Color32::from_rgb(255, 180, 50);
}

/// Colors for the globe canvas.
pub mod globe {
    use super::Color32;

    /// Canvas background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(10, 10, 10);

    /// Regular country fill (#1a1a1a).
    pub const COUNTRY_FILL: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
    /// Regular country outline (#3a3a3a).
    pub const COUNTRY_STROKE: Color32 = Color32::from_rgb(0x3a, 0x3a, 0x3a);
    pub const COUNTRY_STROKE_WIDTH: f32 = 0.5;

    /// Highlighted country fill, brand orange (#e78a53).
    pub const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(0xe7, 0x8a, 0x53);
    /// Highlighted country outline (#f59e6f).
    pub const HIGHLIGHT_STROKE: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x6f);
    pub const HIGHLIGHT_STROKE_WIDTH: f32 = 1.5;
    pub const HIGHLIGHT_OPACITY: f32 = 0.9;

    /// Width of the soft halo behind highlighted outlines.
    pub const GLOW_WIDTH: f32 = 12.0;

    /// Halo color - requires alpha, use function.
    pub fn glow() -> Color32 {
        Color32::from_rgba_unmultiplied(231, 138, 83, 40)
    }

    /// SVG equivalents of the canvas palette.
    pub mod svg {
        pub const COUNTRY_FILL: &str = "#1a1a1a";
        pub const COUNTRY_STROKE: &str = "#3a3a3a";
        pub const HIGHLIGHT_FILL: &str = "#e78a53";
        pub const HIGHLIGHT_STROKE: &str = "#f59e6f";
        pub const HIGHLIGHT_SHADOW: &str = "drop-shadow(0 0 12px rgba(231, 138, 83, 0.5))";
    }
}
