use std::fmt;

use serde::{Deserialize, Serialize};

/// Column header of the food-group field in the source table.
pub const GROUP_COLUMN: &str = "Food Group";
/// Column header of the food-name field in the source table.
pub const NAME_COLUMN: &str = "Food Name";

// ---------------------------------------------------------------------------
// Nutrient – the fixed set of plottable measurements
// ---------------------------------------------------------------------------

/// One of the seven nutrient measurements carried per record. This enum is
/// also the axis-selection menu: direct mode plots any pair of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nutrient {
    Protein,
    Fat,
    Carbohydrates,
    Calories,
    Water,
    Sugar,
    Fiber,
}

impl Nutrient {
    /// Menu order, matching the source column order.
    pub const ALL: [Nutrient; 7] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrates,
        Nutrient::Calories,
        Nutrient::Water,
        Nutrient::Sugar,
        Nutrient::Fiber,
    ];

    /// Source column header for this nutrient.
    pub fn column(self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein (g)",
            Nutrient::Fat => "Fat (g)",
            Nutrient::Carbohydrates => "Carbohydrates (g)",
            Nutrient::Calories => "Calories",
            Nutrient::Water => "Water (g)",
            Nutrient::Sugar => "Sugar (g)",
            Nutrient::Fiber => "Fiber (g)",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Nutrient measurements per 100 g of one food. All values are
/// non-negative; the loader rejects negative cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Nutrients {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub calories: f64,
    pub water: f64,
    pub sugar: f64,
    pub fiber: f64,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbohydrates => self.carbs,
            Nutrient::Calories => self.calories,
            Nutrient::Water => self.water,
            Nutrient::Sugar => self.sugar,
            Nutrient::Fiber => self.fiber,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        match nutrient {
            Nutrient::Protein => self.protein = value,
            Nutrient::Fat => self.fat = value,
            Nutrient::Carbohydrates => self.carbs = value,
            Nutrient::Calories => self.calories = value,
            Nutrient::Water => self.water = value,
            Nutrient::Sugar => self.sugar = value,
            Nutrient::Fiber => self.fiber = value,
        }
    }
}

// ---------------------------------------------------------------------------
// FoodRecord – one row of the source dataset
// ---------------------------------------------------------------------------

/// A single food (one row of the source table). Immutable after load;
/// derived values live on [`PlotRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    /// Fine-grained source category, e.g. "Beef Products".
    pub group: String,
    pub name: String,
    pub nutrients: Nutrients,
}

/// The loaded dataset, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodDataset {
    pub records: Vec<FoodRecord>,
}

impl FoodDataset {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        FoodDataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derived metrics and the renderer snapshot
// ---------------------------------------------------------------------------

/// Ternary macronutrient projection of one record. The three proportions
/// sum to 1; `balance` is `p_fat - p_carb`, in [-1, 1]. The plotted point
/// is `(balance, p_protein)`: pure protein at (0, 1), pure carbohydrate at
/// (-1, 0), pure fat at (1, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TernaryPoint {
    pub p_protein: f64,
    pub p_carb: f64,
    pub p_fat: f64,
    pub balance: f64,
}

/// One fully annotated record as handed to the renderer: the source
/// fields plus meta-group label, both palette entries, and the ternary
/// projection (`None` when the macro sum is zero).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRow {
    pub name: String,
    /// Fine-grained source category the record came with.
    pub source_group: String,
    /// Assigned meta-group label.
    pub group: String,
    /// Default palette color, `#RRGGBB`.
    pub color: String,
    /// Colorblind-safe palette color, `#RRGGBB`.
    pub cb_color: String,
    pub nutrients: Nutrients,
    pub ternary: Option<TernaryPoint>,
}

/// One legend entry, in declared meta-group order.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub cb_color: String,
}

/// The finished pipeline output: an immutable snapshot the renderer reads
/// from. Widgets only ever derive visible index subsets; the table itself
/// is never touched after handoff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotTable {
    pub rows: Vec<PlotRow>,
    pub legend: Vec<LegendEntry>,
}

impl PlotTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records flagged at derivation time as having no macro mass. These
    /// are excluded from the ternary view.
    pub fn zero_sum_count(&self) -> usize {
        self.rows.iter().filter(|r| r.ternary.is_none()).count()
    }
}
