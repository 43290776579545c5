//! UI modules for the Globe Workbench application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, load status, and frame statistics
//! - Central canvas: The morphing globe with overlay controls
//! - Right panel: Legend, view readout, and settings

mod canvas;
pub mod colors;
mod controls;
mod right_panel;
mod top_bar;

pub use canvas::render_canvas;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;
