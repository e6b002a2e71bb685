use std::path::Path;

use anyhow::{Context, Result};

use super::model::{FoodDataset, LegendEntry, PlotTable};
use super::{derive, filter, groups, loader};
use crate::config::{PipelineConfig, UNCLASSIFIED_COLOR, UNCLASSIFIED_LABEL};

/// Run the whole pipeline against a source file: load, filter, normalize,
/// derive, snapshot. One shot; any loader failure aborts the run with a
/// descriptive message and nothing is retried.
pub fn run(path: &Path, config: &PipelineConfig) -> Result<PlotTable> {
    let dataset = loader::load_file(path, &config.xlsx)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!("loaded {} records from {}", dataset.len(), path.display());
    let table = build_table(dataset, config);
    log::info!(
        "handing off {} rows ({} without macro mass)",
        table.len(),
        table.zero_sum_count()
    );
    Ok(table)
}

/// The IO-free pipeline: one forward pass, no feedback loops. Exposed
/// separately so tests can drive it from an in-memory dataset.
pub fn build_table(dataset: FoodDataset, config: &PipelineConfig) -> PlotTable {
    let retained = filter::retain_allowed(dataset, &config.allow_list);
    let grouped = groups::assign_groups(retained, &config.groups, config.unmapped);
    let rows = derive::derive_rows(grouped);

    let mut legend: Vec<LegendEntry> = config
        .groups
        .iter()
        .map(|rule| LegendEntry {
            label: rule.label.clone(),
            color: rule.color.clone(),
            cb_color: rule.cb_color.clone(),
        })
        .collect();
    if rows.iter().any(|row| row.group == UNCLASSIFIED_LABEL) {
        legend.push(LegendEntry {
            label: UNCLASSIFIED_LABEL.to_string(),
            color: UNCLASSIFIED_COLOR.to_string(),
            cb_color: UNCLASSIFIED_COLOR.to_string(),
        });
    }

    PlotTable { rows, legend }
}
