#![warn(clippy::all)]

//! Globe Workbench - an interactive globe that unrolls into a flat map.
//!
//! World country boundaries are fetched at startup and drawn through a
//! projection that blends an orthographic globe with an equirectangular map.
//! The globe can be dragged, auto-rotates while idle, and animates between
//! the two modes on demand.

mod atlas;
mod geo;
mod state;
mod ui;

use eframe::egui;
use state::{AppState, Settings};
use std::time::Duration;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Globe Workbench",
        native_options,
        Box::new(|cc| Ok(Box::new(GlobeApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to mount into");
            return;
        };

        let canvas = match document
            .get_element_by_id("app_canvas")
            .map(|e| e.dyn_into::<web_sys::HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("app_canvas missing or not a canvas element");
                return;
            }
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(GlobeApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct GlobeApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Channel for the async world boundaries fetch
    load_channel: atlas::WorldLoadChannel,

    /// Instant of the previous frame, for timer deltas.
    last_frame: web_time::Instant,

    /// Monotonic instant of last URL push (for throttling to ~1/sec).
    last_url_push: web_time::Instant,

    /// View last written to the URL.
    last_pushed_view: Option<(f64, f64, f64)>,
}

impl GlobeApp {
    /// Creates a new GlobeApp instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        install_fonts(&cc.egui_ctx);

        let settings = Settings::load();
        let mut state = AppState::new(settings);

        // Apply URL parameters (progress, yaw, pitch)
        let url_params = state::url_state::parse_from_url();
        if !url_params.is_empty() {
            log::info!("Restoring view from URL: {:?}", url_params);
            state
                .morph
                .restore_view(url_params.progress, url_params.yaw, url_params.pitch);
        }

        let load_channel = atlas::WorldLoadChannel::new();
        let generation = state.begin_load();
        load_channel.load(
            cc.egui_ctx.clone(),
            generation,
            state.settings.dataset_url.clone(),
            state.settings.object_name.clone(),
        );

        let now = web_time::Instant::now();
        Self {
            state,
            load_channel,
            last_frame: now,
            last_url_push: now,
            last_pushed_view: None,
        }
    }

    /// Handles requests raised by the panels during the previous frame.
    fn process_pending_actions(&mut self, ctx: &egui::Context) {
        let pending = std::mem::take(&mut self.state.pending);

        if pending.save_settings {
            match self.state.settings.save() {
                Ok(()) => self.state.status_message = "Settings saved".to_string(),
                Err(e) => {
                    log::warn!("{}", e);
                    self.state.status_message = e;
                }
            }
        }

        if pending.reload_dataset {
            log::info!("Reloading world boundaries");
            let generation = self.state.begin_load();
            self.load_channel.load(
                ctx.clone(),
                generation,
                self.state.settings.dataset_url.clone(),
                self.state.settings.object_name.clone(),
            );
        }

        #[cfg(not(target_arch = "wasm32"))]
        if pending.export_svg {
            match export_svg(&self.state) {
                Ok(file_name) => {
                    log::info!("Exported frame to {}", file_name);
                    self.state.status_message = format!("Exported {}", file_name);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    self.state.status_message = e;
                }
            }
        }
    }

    /// Push current view to the URL (throttled to once per second).
    fn push_view_to_url(&mut self) {
        let now = web_time::Instant::now();
        if now.duration_since(self.last_url_push).as_secs_f64() < 1.0 {
            return;
        }
        self.last_url_push = now;

        let [yaw, pitch] = self.state.morph.rotation();
        let view = (self.state.morph.progress(), yaw, pitch);
        if self.last_pushed_view != Some(view) {
            self.last_pushed_view = Some(view);
            state::url_state::push_to_url(view.0, view.1, view.2);
        }
    }
}

impl eframe::App for GlobeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed boundaries loads
        while let Some((generation, result)) = self.load_channel.try_recv() {
            self.state.apply_load(generation, result);
        }

        // Advance the tween and the auto-rotation timer
        let now = web_time::Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.state.morph.advance(dt);

        self.process_pending_actions(ctx);
        self.push_view_to_url();

        // Render UI panels in the correct order for egui layout
        // Side and top/bottom panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &mut self.state);
        ui::render_right_panel(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state);

        if self.state.morph.needs_repaint() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

/// Adds the Phosphor icon font used by the controls.
fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Writes the current frame as `globe-<timestamp>.svg` in the working
/// directory and returns the file name.
#[cfg(not(target_arch = "wasm32"))]
fn export_svg(state: &AppState) -> Result<String, String> {
    let paths = geo::build_feature_paths(&state.features, &state.morph.projection());
    let svg = geo::render_svg(&paths);

    let file_name = format!("globe-{}.svg", chrono::Utc::now().format("%Y%m%d-%H%M%S"));
    std::fs::write(&file_name, svg).map_err(|e| format!("Failed to write {}: {}", file_name, e))?;
    Ok(file_name)
}
