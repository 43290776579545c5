//! Overlay controls on the canvas: progress scrubber, morph and reset
//! buttons.

use super::colors::ui as ui_colors;
use crate::state::AppState;
use eframe::egui::{self, Align2, RichText, Vec2};
use egui_phosphor::regular as icons;

pub fn render_controls(ui: &mut egui::Ui, rect: egui::Rect, state: &mut AppState) {
    egui::Area::new(egui::Id::new("morph_controls"))
        .pivot(Align2::CENTER_BOTTOM)
        .fixed_pos(rect.center_bottom() - Vec2::new(0.0, 16.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    render_progress_slider(ui, state);
                    ui.separator();
                    render_buttons(ui, state);
                });
            });
        });
}

fn render_progress_slider(ui: &mut egui::Ui, state: &mut AppState) {
    let animating = state.morph.is_animating();
    let mut progress = state.morph.progress();

    let icon = if state.morph.is_plane_mode() {
        icons::MAP_TRIFOLD
    } else {
        icons::GLOBE
    };
    ui.label(RichText::new(icon).size(16.0).color(ui_colors::ACTIVE));

    let response = ui.add_enabled(
        !animating,
        egui::Slider::new(&mut progress, 0.0..=100.0)
            .suffix("%")
            .fixed_decimals(0)
            .show_value(true),
    );
    if response.changed() {
        state.morph.set_progress(progress);
    }
}

fn render_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    let animating = state.morph.is_animating();
    let icon = if animating {
        icons::SPINNER
    } else if state.morph.progress() == 0.0 {
        icons::MAP_TRIFOLD
    } else {
        icons::GLOBE
    };

    let label = format!("{} {}", icon, state.morph.button_label());
    if ui
        .add_enabled(!animating, egui::Button::new(RichText::new(label).size(13.0)))
        .clicked()
    {
        state.morph.trigger_animation();
    }

    let reset = format!("{} Reset", icons::ARROW_COUNTER_CLOCKWISE);
    if ui.button(RichText::new(reset).size(13.0)).clicked() {
        state.morph.reset_view();
    }
}
