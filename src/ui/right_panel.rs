//! Right panel UI: highlighted-country legend, view readout, and settings.

use super::colors::{globe, ui as ui_colors};
use crate::geo::{legend_entries, HIGHLIGHTED_COUNTRIES};
use crate::state::AppState;
use eframe::egui::{self, RichText, ScrollArea, Sense, Vec2};
use egui_phosphor::regular as icons;

pub fn render_right_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(350.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Controls");
                ui.separator();

                if state.settings.show_legend {
                    render_legend_section(ui, state);
                    ui.add_space(5.0);
                }

                render_view_section(ui, state);
                ui.add_space(5.0);

                render_settings_section(ui, state);
            });
        });
}

fn render_legend_section(ui: &mut egui::Ui, state: &AppState) {
    egui::CollapsingHeader::new(RichText::new("Highlighted").strong())
        .default_open(true)
        .show(ui, |ui| {
            for country in legend_entries() {
                // Some countries are listed under more than one code
                let present = HIGHLIGHTED_COUNTRIES
                    .iter()
                    .filter(|c| c.name == country.name)
                    .any(|c| state.features.contains_id(c.id));

                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                    let color = if present {
                        globe::HIGHLIGHT_FILL
                    } else {
                        globe::COUNTRY_STROKE
                    };
                    ui.painter().rect_filled(swatch, 2.0, color);

                    let text_color = if present {
                        ui_colors::VALUE
                    } else {
                        ui_colors::LABEL
                    };
                    ui.label(RichText::new(country.name).size(12.0).color(text_color));
                });
            }
        });
}

fn render_view_section(ui: &mut egui::Ui, state: &AppState) {
    egui::CollapsingHeader::new(RichText::new("View").strong())
        .default_open(true)
        .show(ui, |ui| {
            let [yaw, pitch] = state.morph.rotation();
            let rows = [
                ("Progress", format!("{:.0}%", state.morph.progress())),
                ("Yaw", format!("{:.1}°", yaw)),
                ("Pitch", format!("{:.1}°", pitch)),
                ("Scale", format!("{:.1}", state.morph.projection().scale())),
                ("Alpha", format!("{:.3}", state.morph.projection().alpha())),
            ];

            egui::Grid::new("view_grid").num_columns(2).show(ui, |ui| {
                for (label, value) in rows {
                    ui.label(RichText::new(label).size(11.0).color(ui_colors::LABEL));
                    ui.label(RichText::new(value).monospace().size(11.0).color(ui_colors::VALUE));
                    ui.end_row();
                }
            });

            let mode = if state.morph.auto_rotation_active() {
                RichText::new("Auto-rotating").color(ui_colors::ACTIVE)
            } else if state.morph.is_dragging() {
                RichText::new("Dragging").color(ui_colors::VALUE)
            } else {
                RichText::new("Static").color(ui_colors::LABEL)
            };
            ui.label(mode.size(11.0));
        });
}

fn render_settings_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Settings").strong())
        .default_open(false)
        .show(ui, |ui| {
            ui.label(RichText::new("Dataset URL").small());
            ui.add(
                egui::TextEdit::singleline(&mut state.settings.dataset_url)
                    .desired_width(f32::INFINITY)
                    .font(egui::FontId::monospace(11.0)),
            );

            ui.label(RichText::new("TopoJSON object").small());
            ui.add(
                egui::TextEdit::singleline(&mut state.settings.object_name)
                    .desired_width(f32::INFINITY)
                    .font(egui::FontId::monospace(11.0)),
            );

            if ui
                .checkbox(&mut state.settings.auto_rotate, "Auto-rotate")
                .changed()
            {
                state.morph.set_auto_rotate_enabled(state.settings.auto_rotate);
            }
            ui.checkbox(&mut state.settings.show_legend, "Show legend");

            ui.separator();

            ui.horizontal_wrapped(|ui| {
                if ui.button(format!("{} Save", icons::FLOPPY_DISK)).clicked() {
                    state.pending.save_settings = true;
                }
                if ui.button(format!("{} Reload", icons::ARROWS_CLOCKWISE)).clicked() {
                    state.pending.reload_dataset = true;
                }
                #[cfg(not(target_arch = "wasm32"))]
                if ui.button(format!("{} Export SVG", icons::EXPORT)).clicked() {
                    state.pending.export_svg = true;
                }
            });
        });
}
