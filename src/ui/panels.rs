use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::hex_or_gray;
use crate::config::DerivationMode;
use crate::data::model::Nutrient;
use crate::state::{AppState, ColorBy};

// ---------------------------------------------------------------------------
// Left side panel – search and view controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Food search ----
            ui.strong("Food search");
            if ui.text_edit_singleline(&mut state.view.search).changed() {
                state.refilter();
            }
            ui.separator();

            // ---- View mode ----
            ui.strong("View");
            ui.horizontal(|ui: &mut Ui| {
                if ui
                    .selectable_label(state.view.mode == DerivationMode::Direct, "Nutrient axes")
                    .clicked()
                {
                    state.view.mode = DerivationMode::Direct;
                }
                if ui
                    .selectable_label(state.view.mode == DerivationMode::Ternary, "Macro triangle")
                    .clicked()
                {
                    state.view.mode = DerivationMode::Ternary;
                }
            });
            ui.separator();

            // ---- Axis selection (direct mode only) ----
            if state.view.mode == DerivationMode::Direct {
                ui.strong("X axis");
                axis_combo(ui, "x_axis", &mut state.view.x_axis);
                ui.strong("Y axis");
                axis_combo(ui, "y_axis", &mut state.view.y_axis);
                ui.separator();
            }

            // ---- Coloring ----
            ui.strong("Color by");
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(match state.view.color_by {
                    ColorBy::MetaGroup => "Meta group",
                    ColorBy::SourceGroup => "Food category",
                })
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.view.color_by == ColorBy::MetaGroup, "Meta group")
                        .clicked()
                    {
                        state.view.color_by = ColorBy::MetaGroup;
                    }
                    if ui
                        .selectable_label(
                            state.view.color_by == ColorBy::SourceGroup,
                            "Food category",
                        )
                        .clicked()
                    {
                        state.view.color_by = ColorBy::SourceGroup;
                    }
                });

            // The colorblind palette only exists for the fixed meta-group
            // colors; generated category hues ignore it.
            if state.view.color_by == ColorBy::MetaGroup {
                ui.checkbox(&mut state.view.colorblind, "Colorblind palette");
            }
            ui.separator();

            legend(ui, state);
        });
}

fn axis_combo(ui: &mut Ui, id: &str, selected: &mut Nutrient) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.column())
        .show_ui(ui, |ui: &mut Ui| {
            for nutrient in Nutrient::ALL {
                if ui
                    .selectable_label(*selected == nutrient, nutrient.column())
                    .clicked()
                {
                    *selected = nutrient;
                }
            }
        });
}

fn legend(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    ui.strong("Legend");
    match state.view.color_by {
        ColorBy::MetaGroup => {
            for entry in &table.legend {
                let hex = if state.view.colorblind {
                    &entry.cb_color
                } else {
                    &entry.color
                };
                ui.label(RichText::new(&entry.label).color(hex_or_gray(hex)));
            }
        }
        ColorBy::SourceGroup => {
            if let Some(colors) = &state.category_colors {
                for (label, color) in colors.legend_entries() {
                    ui.label(RichText::new(label).color(color));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} foods, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
            if state.view.mode == DerivationMode::Ternary && table.zero_sum_count() > 0 {
                ui.separator();
                ui.label(format!(
                    "{} without macro mass hidden",
                    table.zero_sum_count()
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open nutrition table")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
