//! Pipeline configuration.
//!
//! All category lists, group rules, and palettes are explicit immutable
//! structures passed into the pipeline; there are no module-level mutable
//! globals. The defaults encode the published USDA SR28 constants. A run
//! can be parameterized from a JSON file via [`PipelineConfig::from_json_file`].

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::data::model::Nutrient;

/// Sentinel meta group assigned under [`UnmappedPolicy::Sentinel`].
pub const UNCLASSIFIED_LABEL: &str = "Unclassified";
/// Sentinel color, used for both palettes.
pub const UNCLASSIFIED_COLOR: &str = "#9E9E9E";

/// What happens to a record that passed the category filter but matches
/// no group rule. Silently leaving the group blank is not an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Warn and omit the record from the output table.
    Drop,
    /// Warn and tag the record with the gray "Unclassified" group.
    #[default]
    Sentinel,
}

/// Which derived metrics drive the plot when the app starts. The view can
/// switch at render time; both metric sets are computed once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationMode {
    /// Nutrient columns straight onto the axes.
    #[default]
    Direct,
    /// Ternary macronutrient projection.
    Ternary,
}

/// One meta group: its label, the category substrings that fold into it,
/// and its two palette entries. Rules are evaluated in declared order and
/// the first match wins, so overlapping pattern lists are resolved by
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRule {
    pub label: String,
    /// Substring patterns tested against the record's source category.
    pub patterns: Vec<String>,
    /// Default palette color, `#RRGGBB`.
    pub color: String,
    /// Colorblind-safe palette color, `#RRGGBB`.
    pub cb_color: String,
}

impl GroupRule {
    pub fn new(label: &str, patterns: &[&str], color: &str, cb_color: &str) -> Self {
        GroupRule {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            color: color.to_string(),
            cb_color: cb_color.to_string(),
        }
    }
}

/// Header layout of the published XLSX workbook: `skip_rows` leading rows
/// are discarded, then row `header_row` of the remainder is taken as the
/// header and everything after it as data. The SR28 workbook carries two
/// title rows and a merged banner row before the real header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XlsxLayout {
    pub skip_rows: usize,
    pub header_row: usize,
}

impl Default for XlsxLayout {
    fn default() -> Self {
        XlsxLayout {
            skip_rows: 2,
            header_row: 1,
        }
    }
}

/// Full pipeline configuration. Built once, passed by reference through
/// every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source categories retained by the category filter (exact match).
    pub allow_list: Vec<String>,
    /// Ordered meta-group rules; first match wins.
    pub groups: Vec<GroupRule>,
    pub unmapped: UnmappedPolicy,
    /// Initial view mode.
    pub mode: DerivationMode,
    /// Initial direct-mode axes.
    pub x_axis: Nutrient,
    pub y_axis: Nutrient,
    pub xlsx: XlsxLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::direct_compare()
    }
}

impl PipelineConfig {
    /// The two-axis comparison preset: thirteen categories, every one of
    /// which folds into a meta group, Calories vs. Protein on the axes.
    pub fn direct_compare() -> Self {
        PipelineConfig {
            allow_list: to_strings(&[
                "Dairy and Egg Products",
                "Beef Products",
                "Breakfast Cereals",
                "Cereal Grains and Pasta",
                "Finfish and Shellfish Products",
                "Fruits and Fruit Juices",
                "Lamb, Veal, and Game Products",
                "Legumes and Legume Products",
                "Nut and Seed Products",
                "Pork Products",
                "Poultry Products",
                "Sausages and Luncheon Meats",
                "Vegetables and Vegetable Products",
            ]),
            groups: default_groups(),
            unmapped: UnmappedPolicy::Sentinel,
            mode: DerivationMode::Direct,
            x_axis: Nutrient::Calories,
            y_axis: Nutrient::Protein,
            xlsx: XlsxLayout::default(),
        }
    }

    /// The macro-triangle preset: a wider category net whose extra four
    /// categories (fats, baked goods, snacks, sweets) match no rule and
    /// are dropped after normalization.
    pub fn macro_triangle() -> Self {
        let mut config = PipelineConfig::direct_compare();
        config.allow_list.extend(to_strings(&[
            "Fats and Oils",
            "Baked Products",
            "Snacks",
            "Sweets",
        ]));
        config.unmapped = UnmappedPolicy::Drop;
        config.mode = DerivationMode::Ternary;
        config
    }

    /// Load a configuration from a JSON file. Absent fields fall back to
    /// the defaults, so a file can override just the allow-list or just
    /// the palettes.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

/// The six USDA meta groups in declared order, with the (default,
/// colorblind) palette pair.
fn default_groups() -> Vec<GroupRule> {
    vec![
        GroupRule::new(
            "Fruit & Vegetables",
            &[
                "Fruits and Fruit Juices",
                "Legumes and Legume Products",
                "Vegetables and Vegetable Products",
            ],
            "#4CAF50",
            "#673AB7",
        ),
        GroupRule::new(
            "Cereals & Grains",
            &["Breakfast Cereals", "Cereal Grains and Pasta"],
            "#FF9800",
            "#FF5722",
        ),
        GroupRule::new(
            "Animal Products",
            &["Dairy and Egg Products"],
            "#9C27B0",
            "#FFC107",
        ),
        GroupRule::new("Nuts & Seeds", &["Nut and Seed Products"], "#8D6E63", "#3F51B5"),
        GroupRule::new(
            "Meat",
            &[
                "Beef Products",
                "Lamb, Veal, and Game Products",
                "Pork Products",
                "Poultry Products",
                "Sausages and Luncheon Meats",
            ],
            "#f44336",
            "#f44336",
        ),
        GroupRule::new("Fish", &["Finfish and Shellfish Products"], "#2196F3", "#2196F3"),
    ]
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_hex;

    #[test]
    fn default_preset_has_six_groups_with_valid_palettes() {
        let config = PipelineConfig::default();
        assert_eq!(config.groups.len(), 6);
        for rule in &config.groups {
            assert!(parse_hex(&rule.color).is_some(), "bad color in {}", rule.label);
            assert!(
                parse_hex(&rule.cb_color).is_some(),
                "bad colorblind color in {}",
                rule.label
            );
        }
        assert!(parse_hex(UNCLASSIFIED_COLOR).is_some());
    }

    #[test]
    fn direct_preset_allow_list_is_fully_mapped() {
        let config = PipelineConfig::direct_compare();
        for category in &config.allow_list {
            let mapped = config
                .groups
                .iter()
                .any(|rule| rule.patterns.iter().any(|p| category.contains(p.as_str())));
            assert!(mapped, "category '{category}' maps to no group rule");
        }
    }

    #[test]
    fn macro_triangle_preset_widens_the_net_and_drops_unmapped() {
        let config = PipelineConfig::macro_triangle();
        assert_eq!(config.allow_list.len(), 17);
        assert!(config.allow_list.iter().any(|c| c == "Baked Products"));
        assert_eq!(config.unmapped, UnmappedPolicy::Drop);
        assert_eq!(config.mode, DerivationMode::Ternary);
    }

    #[test]
    fn partial_json_overrides_fall_back_to_defaults() {
        let parsed: PipelineConfig =
            serde_json::from_str(r#"{ "mode": "ternary", "allow_list": ["Beef Products"] }"#)
                .unwrap();
        assert_eq!(parsed.mode, DerivationMode::Ternary);
        assert_eq!(parsed.allow_list, vec!["Beef Products".to_string()]);
        assert_eq!(parsed.groups, PipelineConfig::default().groups);
        assert_eq!(parsed.x_axis, Nutrient::Calories);
    }

    #[test]
    fn config_survives_a_json_round_trip() {
        let config = PipelineConfig::macro_triangle();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
