//! Central canvas UI: the morphing globe.

use super::colors::{globe, ui as ui_colors};
use super::controls::render_controls;
use crate::geo::{build_feature_paths, render_feature_paths, ViewTransform};
use crate::state::{AppState, LoadStatus, MorphState, RenderStats};
use eframe::egui::{self, CursorIcon, RichText, Sense};

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(globe::BACKGROUND))
        .show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate the full available space for the canvas
            let (response, painter) = ui.allocate_painter(available_size, Sense::drag());
            let rect = response.rect;
            let view = ViewTransform::fit(rect);

            handle_canvas_interaction(&response, &mut state.morph);

            if state.features.is_empty() {
                draw_loading(ui, rect, &state.load_status);
            } else {
                let started = web_time::Instant::now();
                let paths = build_feature_paths(&state.features, &state.morph.projection());
                let build_ms = started.elapsed().as_secs_f64() * 1000.0;
                state.render_stats = RenderStats::from_paths(&paths, build_ms);

                render_feature_paths(&painter, &paths, &view);
            }

            render_controls(ui, rect, state);
        });
}

/// Feeds pointer input into the morph state machine.
fn handle_canvas_interaction(response: &egui::Response, morph: &mut MorphState) {
    if response.drag_started() {
        morph.pointer_down();
    }

    if response.dragged() && morph.is_dragging() {
        apply_drag(morph, response.drag_delta());
    }

    // Leaving the canvas ends the drag like a release
    let left_canvas = morph.is_dragging() && !response.contains_pointer();
    if response.drag_stopped() || left_canvas {
        morph.pointer_up();
    }

    if morph.is_dragging() {
        response.ctx.set_cursor_icon(CursorIcon::Grabbing);
    } else if response.hovered() {
        response.ctx.set_cursor_icon(CursorIcon::Grab);
    }
}

/// Rotates by a drag delta in screen points, independent of the view scale.
fn apply_drag(morph: &mut MorphState, delta: egui::Vec2) {
    morph.pointer_moved(delta.x as f64, delta.y as f64);
}

fn draw_loading(ui: &mut egui::Ui, rect: egui::Rect, status: &LoadStatus) {
    let text = match status {
        LoadStatus::Loading => "Loading world boundaries...",
        _ => "No boundaries to draw",
    };

    ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
        ui.centered_and_justified(|ui| {
            ui.horizontal_centered(|ui| {
                ui.spinner();
                ui.label(RichText::new(text).size(13.0).color(ui_colors::VALUE));
            });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_is_measured_in_screen_points() {
        let mut morph = MorphState::new(false);
        morph.pointer_down();

        // The same 100 pt drag turns the globe 50° whatever the canvas size
        apply_drag(&mut morph, egui::Vec2::new(100.0, 0.0));
        assert!((morph.rotation()[0] - 50.0).abs() < 1e-9);

        apply_drag(&mut morph, egui::Vec2::new(0.0, 40.0));
        assert!((morph.rotation()[1] + 20.0).abs() < 1e-9);
    }
}
