use std::collections::BTreeSet;
use std::path::Path;

use crate::color::ColorMap;
use crate::config::{DerivationMode, PipelineConfig};
use crate::data::filter::search_indices;
use crate::data::model::{Nutrient, PlotTable};
use crate::data::pipeline;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which field colors the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBy {
    /// Fixed meta-group palettes (default or colorblind).
    MetaGroup,
    /// Generated hues per fine-grained source category.
    SourceGroup,
}

/// Everything the widgets may change after handoff. Each interaction is a
/// pure function of (table snapshot, input) → view state; none of them
/// write into the table.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: DerivationMode,
    pub x_axis: Nutrient,
    pub y_axis: Nutrient,
    pub colorblind: bool,
    pub color_by: ColorBy,
    pub search: String,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PipelineConfig,

    /// Finished pipeline snapshot (None until a file is loaded).
    pub table: Option<PlotTable>,

    pub view: ViewState,

    /// Indices of rows passing the search box (cached).
    pub visible_indices: Vec<usize>,

    /// Colour map for the color-by-category view, rebuilt per table.
    pub category_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(PipelineConfig::default())
    }
}

impl AppState {
    pub fn new(config: PipelineConfig) -> Self {
        let view = ViewState {
            mode: config.mode,
            x_axis: config.x_axis,
            y_axis: config.y_axis,
            colorblind: false,
            color_by: ColorBy::MetaGroup,
            search: String::new(),
        };
        AppState {
            config,
            table: None,
            view,
            visible_indices: Vec::new(),
            category_colors: None,
            status_message: None,
        }
    }

    /// Run the pipeline against a file and ingest the result.
    pub fn load_path(&mut self, path: &Path) {
        match pipeline::run(path, &self.config) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a finished table: reset the search, rebuild the category
    /// colour map, make everything visible.
    pub fn set_table(&mut self, table: PlotTable) {
        let categories: BTreeSet<String> = table
            .rows
            .iter()
            .map(|row| row.source_group.clone())
            .collect();
        self.category_colors = Some(ColorMap::new(&categories));
        self.visible_indices = (0..table.len()).collect();
        self.view.search.clear();
        self.table = Some(table);
        self.status_message = None;
    }

    /// Recompute the visible subset after a search-box change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = search_indices(table, &self.view.search);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FoodDataset, FoodRecord, Nutrients};

    fn loaded_state() -> AppState {
        let config = PipelineConfig::default();
        let dataset = FoodDataset::new(vec![
            FoodRecord {
                group: "Beef Products".to_string(),
                name: "Steak".to_string(),
                nutrients: Nutrients::default(),
            },
            FoodRecord {
                group: "Fruits and Fruit Juices".to_string(),
                name: "Apples".to_string(),
                nutrients: Nutrients::default(),
            },
        ]);
        let table = pipeline::build_table(dataset, &config);
        let mut state = AppState::new(config);
        state.set_table(table);
        state
    }

    #[test]
    fn ingesting_a_table_makes_everything_visible() {
        let state = loaded_state();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.category_colors.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn search_narrows_and_clears_back_to_full() {
        let mut state = loaded_state();
        state.view.search = "apple".to_string();
        state.refilter();
        assert_eq!(state.visible_indices, vec![1]);

        state.view.search.clear();
        state.refilter();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn view_defaults_follow_the_config() {
        let state = AppState::new(PipelineConfig::macro_triangle());
        assert_eq!(state.view.mode, DerivationMode::Ternary);
        assert_eq!(state.view.x_axis, Nutrient::Calories);
        assert_eq!(state.view.y_axis, Nutrient::Protein);
    }
}
