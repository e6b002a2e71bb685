use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, PlotUi, Points, Text};

use crate::color::hex_or_gray;
use crate::config::DerivationMode;
use crate::data::model::{PlotRow, PlotTable};
use crate::state::{AppState, ColorBy};

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

struct Series {
    label: String,
    color: Color32,
    points: Vec<[f64; 2]>,
}

/// Render the scatter in the central panel.
pub fn scatter(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a nutrition table to explore it  (File → Open…)");
        });
        return;
    };

    let view = &state.view;
    let xy = |row: &PlotRow| -> Option<[f64; 2]> {
        match view.mode {
            DerivationMode::Direct => Some([
                row.nutrients.get(view.x_axis),
                row.nutrients.get(view.y_axis),
            ]),
            // Zero-sum rows carry no projection and stay off this view.
            DerivationMode::Ternary => row.ternary.map(|t| [t.balance, t.p_protein]),
        }
    };

    // Plotted coordinates of every visible row, kept for hover lookup.
    let mut plotted: Vec<(usize, [f64; 2])> = Vec::new();
    for &idx in &state.visible_indices {
        if let Some(point) = xy(&table.rows[idx]) {
            plotted.push((idx, point));
        }
    }

    let series = build_series(state, table, &xy);

    let mut plot = Plot::new("nutrient_scatter").legend(Legend::default());
    plot = match view.mode {
        DerivationMode::Direct => plot
            .x_axis_label(view.x_axis.column())
            .y_axis_label(view.y_axis.column()),
        DerivationMode::Ternary => plot
            .show_axes(false)
            .show_grid(false)
            .include_x(-1.3)
            .include_x(1.3)
            .include_y(-0.2)
            .include_y(1.2)
            .data_aspect(1.0),
    };

    plot.show(ui, |plot_ui| {
        for s in &series {
            plot_ui.points(
                Points::new(PlotPoints::from(s.points.clone()))
                    .name(&s.label)
                    .color(s.color)
                    .radius(3.0)
                    .shape(MarkerShape::Circle),
            );
        }
        if view.mode == DerivationMode::Ternary {
            vertex_captions(plot_ui);
        }
        hover_name(plot_ui, table, &plotted);
    });
}

/// One point series per group, in legend order, so the plot legend
/// mirrors the declared meta groups (or the sorted category list).
fn build_series(
    state: &AppState,
    table: &PlotTable,
    xy: &impl Fn(&PlotRow) -> Option<[f64; 2]>,
) -> Vec<Series> {
    match state.view.color_by {
        ColorBy::MetaGroup => {
            let mut series: Vec<Series> = table
                .legend
                .iter()
                .map(|entry| {
                    let hex = if state.view.colorblind {
                        &entry.cb_color
                    } else {
                        &entry.color
                    };
                    Series {
                        label: entry.label.clone(),
                        color: hex_or_gray(hex),
                        points: Vec::new(),
                    }
                })
                .collect();
            for &idx in &state.visible_indices {
                let row = &table.rows[idx];
                let Some(point) = xy(row) else { continue };
                if let Some(s) = series.iter_mut().find(|s| s.label == row.group) {
                    s.points.push(point);
                }
            }
            series.retain(|s| !s.points.is_empty());
            series
        }
        ColorBy::SourceGroup => {
            let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
            for &idx in &state.visible_indices {
                let row = &table.rows[idx];
                let Some(point) = xy(row) else { continue };
                by_category
                    .entry(row.source_group.as_str())
                    .or_default()
                    .push(point);
            }
            by_category
                .into_iter()
                .map(|(label, points)| Series {
                    color: state
                        .category_colors
                        .as_ref()
                        .map(|colors| colors.color_for(label))
                        .unwrap_or(Color32::GRAY),
                    label: label.to_string(),
                    points,
                })
                .collect()
        }
    }
}

fn vertex_captions(plot_ui: &mut PlotUi) {
    let captions = [
        (-1.025, -0.05, "Carbohydrate"),
        (0.0, 1.025, "Protein"),
        (1.025, -0.05, "Fat"),
    ];
    for (x, y, caption) in captions {
        plot_ui.text(
            Text::new(PlotPoint::new(x, y), RichText::new(caption).strong())
                .anchor(Align2::CENTER_CENTER),
        );
    }
}

/// Show the food name next to the nearest visible point, within a small
/// plot-space radius of the pointer.
fn hover_name(plot_ui: &mut PlotUi, table: &PlotTable, plotted: &[(usize, [f64; 2])]) {
    let Some(pointer) = plot_ui.pointer_coordinate() else {
        return;
    };
    let bounds = plot_ui.plot_bounds();
    let tol_x = bounds.width() * 0.015;
    let tol_y = bounds.height() * 0.015;
    if tol_x <= 0.0 || tol_y <= 0.0 {
        return;
    }

    let mut best: Option<(f64, usize, [f64; 2])> = None;
    for &(idx, point) in plotted {
        let dx = (point[0] - pointer.x) / tol_x;
        let dy = (point[1] - pointer.y) / tol_y;
        let distance = dx * dx + dy * dy;
        if distance <= 1.0 && best.map_or(true, |(d, _, _)| distance < d) {
            best = Some((distance, idx, point));
        }
    }

    if let Some((_, idx, point)) = best {
        let row = &table.rows[idx];
        plot_ui.text(
            Text::new(
                PlotPoint::new(point[0], point[1]),
                RichText::new(format!("  {}", row.name)).strong(),
            )
            .anchor(Align2::LEFT_BOTTOM),
        );
    }
}
