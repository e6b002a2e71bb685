use super::groups::GroupedRecord;
use super::model::{Nutrients, PlotRow, TernaryPoint};

/// Project one measurement set onto the macronutrient ternary plane.
///
/// Returns `None` when protein + carbohydrate + fat is zero; the ternary
/// view excludes those rows instead of plotting NaN. Direct mode needs no
/// derivation step: it reads nutrients through [`Nutrients::get`].
pub fn ternary_point(nutrients: &Nutrients) -> Option<TernaryPoint> {
    let sum = nutrients.protein + nutrients.carbs + nutrients.fat;
    if sum <= 0.0 {
        return None;
    }
    let p_protein = nutrients.protein / sum;
    let p_carb = nutrients.carbs / sum;
    let p_fat = nutrients.fat / sum;
    Some(TernaryPoint {
        p_protein,
        p_carb,
        p_fat,
        balance: p_fat - p_carb,
    })
}

/// Attach the derived metrics, turning grouped records into renderer rows.
/// Runs once per table; the metrics are never recomputed after handoff.
pub fn derive_rows(grouped: Vec<GroupedRecord>) -> Vec<PlotRow> {
    grouped
        .into_iter()
        .map(|g| {
            let ternary = ternary_point(&g.record.nutrients);
            if ternary.is_none() {
                log::warn!(
                    "'{}' has zero macronutrient mass; excluded from the ternary view",
                    g.record.name
                );
            }
            PlotRow {
                name: g.record.name,
                source_group: g.record.group,
                group: g.label,
                color: g.color,
                cb_color: g.cb_color,
                nutrients: g.record.nutrients,
                ternary,
            }
        })
        .collect()
}
