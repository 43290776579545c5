//! Top bar UI: app title, load status, and frame statistics.

use super::colors::ui as ui_colors;
use crate::state::{AppState, LoadStatus};
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("Globe Workbench")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                // Status text
                let status_color = match state.load_status {
                    LoadStatus::Loading => Color32::GRAY,
                    LoadStatus::Loaded => ui_colors::SUCCESS,
                    LoadStatus::Fallback(_) => ui_colors::WARNING,
                };
                let status = ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(status_color),
                );
                if let LoadStatus::Fallback(error) = &state.load_status {
                    status.on_hover_text(error);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(state.render_stats.format_timing())
                            .size(11.0)
                            .color(ui_colors::VALUE),
                    );
                    ui.label(RichText::new("·").size(11.0).color(ui_colors::LABEL));
                    ui.label(
                        RichText::new(state.render_stats.format_features())
                            .size(11.0)
                            .color(ui_colors::VALUE),
                    );
                });
            });
        });
}
