/// Data layer: the batch pipeline from source file to renderer snapshot.
///
/// ```text
///  .csv / .xlsx / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + project required columns → FoodDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category allow-list, exact match
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  groups   │  ordered substring rules → meta group + palette
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  ternary proportions, balance → PlotTable
///   └──────────┘
/// ```
///
/// One forward pass, single-threaded; the resulting [`model::PlotTable`]
/// is an immutable snapshot the UI layer never writes back into.
pub mod derive;
pub mod filter;
pub mod groups;
pub mod loader;
pub mod model;
pub mod pipeline;
