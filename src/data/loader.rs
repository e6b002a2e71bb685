use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{FoodDataset, FoodRecord, Nutrient, Nutrients, GROUP_COLUMN, NAME_COLUMN};
use crate::config::XlsxLayout;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Loader failure classes. Both abort the run before filtering begins;
/// nothing downstream ever sees a partial table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input file missing, unreadable, or malformed.
    #[error("cannot read source: {0}")]
    SourceRead(String),
    /// A required column is absent from the parsed header.
    #[error("required column '{column}' is missing")]
    Schema { column: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Required column headers, in table order.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![GROUP_COLUMN, NAME_COLUMN];
    columns.extend(Nutrient::ALL.iter().map(|n| n.column()));
    columns
}

/// Load a nutrition dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row
/// * `.xlsx` – first worksheet, honoring the configured header layout
/// * `.json` – records-oriented (`df.to_json(orient='records')`)
///
/// Only the nine required columns are projected; everything else in the
/// source is ignored.
pub fn load_file(path: &Path, xlsx: &XlsxLayout) -> Result<FoodDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xlsm" => load_xlsx(path, xlsx),
        "json" => load_json(path),
        other => Err(LoadError::SourceRead(format!(
            "unsupported file extension: .{other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Column resolution (shared by all formats)
// ---------------------------------------------------------------------------

struct ColumnIndices {
    group: usize,
    name: usize,
    nutrients: [usize; 7],
}

fn resolve_columns(headers: &[String]) -> Result<ColumnIndices, LoadError> {
    let position = |column: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LoadError::Schema {
                column: column.to_string(),
            })
    };

    let group = position(GROUP_COLUMN)?;
    let name = position(NAME_COLUMN)?;
    let mut nutrients = [0usize; 7];
    for (slot, nutrient) in nutrients.iter_mut().zip(Nutrient::ALL) {
        *slot = position(nutrient.column())?;
    }
    Ok(ColumnIndices {
        group,
        name,
        nutrients,
    })
}

/// Parse one numeric cell. Published sheets leave some nutrient cells
/// empty; those read as 0. Negative or non-numeric values abort the load.
fn parse_number(raw: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = raw.parse().map_err(|_| {
        LoadError::SourceRead(format!("row {row}, {column}: '{raw}' is not a number"))
    })?;
    if value < 0.0 {
        return Err(LoadError::SourceRead(format!(
            "row {row}, {column}: negative value {value}"
        )));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<FoodDataset, LoadError> {
    let file = File::open(path)
        .map_err(|e| LoadError::SourceRead(format!("opening {}: {e}", path.display())))?;
    load_csv_reader(file)
}

fn load_csv_reader<R: Read>(source: R) -> Result<FoodDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::SourceRead(format!("reading CSV header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LoadError::SourceRead(format!("CSV row {row_no}: {e}")))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let mut nutrients = Nutrients::default();
        for (nutrient, &idx) in Nutrient::ALL.iter().zip(&columns.nutrients) {
            nutrients.set(
                *nutrient,
                parse_number(field(idx), row_no, nutrient.column())?,
            );
        }

        records.push(FoodRecord {
            group: field(columns.group).to_string(),
            name: field(columns.name).to_string(),
            nutrients,
        });
    }
    Ok(FoodDataset::new(records))
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

fn load_xlsx(path: &Path, layout: &XlsxLayout) -> Result<FoodDataset, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| LoadError::SourceRead(format!("opening {}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::SourceRead("workbook has no worksheets".to_string()))?
        .map_err(|e| LoadError::SourceRead(format!("reading first worksheet: {e}")))?;

    // Discard the leading banner rows, then `nth` lands on the header and
    // leaves the iterator at the first data row.
    let mut rows = range.rows().skip(layout.skip_rows);
    let header = rows
        .nth(layout.header_row)
        .ok_or_else(|| LoadError::SourceRead("worksheet ends before the header row".to_string()))?;
    let headers: Vec<String> = header.iter().map(cell_text).collect();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (row_no, row) in rows.enumerate() {
        let mut nutrients = Nutrients::default();
        for (nutrient, &idx) in Nutrient::ALL.iter().zip(&columns.nutrients) {
            nutrients.set(
                *nutrient,
                cell_number(row.get(idx), row_no, nutrient.column())?,
            );
        }

        records.push(FoodRecord {
            group: row.get(columns.group).map(cell_text).unwrap_or_default(),
            name: row.get(columns.name).map(cell_text).unwrap_or_default(),
            nutrients,
        });
    }
    Ok(FoodDataset::new(records))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: Option<&Data>, row: usize, column: &str) -> Result<f64, LoadError> {
    let value = match cell {
        None | Some(Data::Empty) => 0.0,
        Some(Data::Int(i)) => *i as f64,
        Some(Data::Float(f)) => *f,
        Some(Data::String(s)) => parse_number(s, row, column)?,
        Some(other) => {
            return Err(LoadError::SourceRead(format!(
                "row {row}, {column}: unexpected cell value {other:?}"
            )))
        }
    };
    if value < 0.0 {
        return Err(LoadError::SourceRead(format!(
            "row {row}, {column}: negative value {value}"
        )));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the shape pandas emits:
///
/// ```json
/// [
///   {
///     "Food Group": "Beef Products",
///     "Food Name": "Beef, ground, 80% lean",
///     "Protein (g)": 26.0,
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<FoodDataset, LoadError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LoadError::SourceRead(format!("reading {}: {e}", path.display())))?;
    load_json_text(&text)
}

fn load_json_text(text: &str) -> Result<FoodDataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)
        .map_err(|e| LoadError::SourceRead(format!("parsing JSON: {e}")))?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::SourceRead("expected a top-level JSON array".to_string()))?;

    // Schema check against the first record; later records may carry
    // nulls but not renamed columns.
    if let Some(first) = rows.first() {
        let obj = first
            .as_object()
            .ok_or_else(|| LoadError::SourceRead("row 0 is not a JSON object".to_string()))?;
        for column in required_columns() {
            if !obj.contains_key(column) {
                return Err(LoadError::Schema {
                    column: column.to_string(),
                });
            }
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| {
            LoadError::SourceRead(format!("row {row_no} is not a JSON object"))
        })?;

        let mut nutrients = Nutrients::default();
        for nutrient in Nutrient::ALL {
            nutrients.set(
                nutrient,
                json_number(obj.get(nutrient.column()), row_no, nutrient.column())?,
            );
        }

        records.push(FoodRecord {
            group: json_text(obj.get(GROUP_COLUMN), row_no, GROUP_COLUMN)?,
            name: json_text(obj.get(NAME_COLUMN), row_no, NAME_COLUMN)?,
            nutrients,
        });
    }
    Ok(FoodDataset::new(records))
}

fn json_text(value: Option<&JsonValue>, row: usize, column: &str) -> Result<String, LoadError> {
    match value {
        None | Some(JsonValue::Null) => Ok(String::new()),
        Some(JsonValue::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(LoadError::SourceRead(format!(
            "row {row}, {column}: expected a string, got {other}"
        ))),
    }
}

fn json_number(value: Option<&JsonValue>, row: usize, column: &str) -> Result<f64, LoadError> {
    match value {
        None | Some(JsonValue::Null) => Ok(0.0),
        Some(JsonValue::Number(n)) => {
            let v = n.as_f64().unwrap_or(f64::NAN);
            if v.is_nan() || v < 0.0 {
                return Err(LoadError::SourceRead(format!(
                    "row {row}, {column}: invalid value {n}"
                )));
            }
            Ok(v)
        }
        Some(JsonValue::String(s)) => parse_number(s, row, column),
        Some(other) => Err(LoadError::SourceRead(format!(
            "row {row}, {column}: expected a number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Food Group,Food Name,Protein (g),Fat (g),Carbohydrates (g),Calories,Water (g),Sugar (g),Fiber (g)";

    fn csv_of(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn csv_rows_parse_into_records() {
        let text = csv_of(&[
            "Beef Products,\"Beef, ground, 80% lean\",26,15,0,250,58,0,0",
            "Fruits and Fruit Juices,Apples,0.3,0.2,13.8,52,85.6,10.4,2.4",
        ]);
        let dataset = load_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);

        let beef = &dataset.records[0];
        assert_eq!(beef.group, "Beef Products");
        assert_eq!(beef.name, "Beef, ground, 80% lean");
        assert_eq!(beef.nutrients.protein, 26.0);
        assert_eq!(beef.nutrients.calories, 250.0);

        let apple = &dataset.records[1];
        assert_eq!(apple.nutrients.get(Nutrient::Sugar), 10.4);
        assert_eq!(apple.nutrients.get(Nutrient::Fiber), 2.4);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = format!(
            "{HEADER},Cholesterol (mg)\nBeef Products,Steak,25,10,0,200,60,0,0,80"
        );
        let dataset = load_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.records[0].nutrients.fat, 10.0);
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let text = "Food Group,Food Name,Protein (g)\nBeef Products,Steak,25";
        let err = load_csv_reader(text.as_bytes()).unwrap_err();
        match err {
            LoadError::Schema { column } => assert_eq!(column, "Fat (g)"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_nutrient_cells_read_as_zero() {
        let text = csv_of(&["Beef Products,Broth,,,,,,,"]);
        let dataset = load_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.records[0].nutrients, Nutrients::default());
    }

    #[test]
    fn malformed_numbers_abort_with_the_row() {
        let text = csv_of(&["Beef Products,Steak,lots,10,0,200,60,0,0"]);
        let err = load_csv_reader(text.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 0"), "{message}");
        assert!(message.contains("Protein (g)"), "{message}");
    }

    #[test]
    fn negative_values_are_rejected() {
        let text = csv_of(&["Beef Products,Steak,-1,10,0,200,60,0,0"]);
        assert!(load_csv_reader(text.as_bytes()).is_err());
    }

    #[test]
    fn unsupported_extension_is_a_source_error() {
        let err = load_file(Path::new("foods.parquet"), &XlsxLayout::default()).unwrap_err();
        assert!(matches!(err, LoadError::SourceRead(_)));
    }

    #[test]
    fn json_records_parse_and_nulls_read_as_zero() {
        let text = r#"[
            {"Food Group": "Beef Products", "Food Name": "Steak",
             "Protein (g)": 25.0, "Fat (g)": 10.0, "Carbohydrates (g)": 0.0,
             "Calories": 200, "Water (g)": null, "Sugar (g)": 0.0, "Fiber (g)": 0.0}
        ]"#;
        let dataset = load_json_text(text).unwrap();
        assert_eq!(dataset.records[0].nutrients.calories, 200.0);
        assert_eq!(dataset.records[0].nutrients.water, 0.0);
    }

    #[test]
    fn json_with_renamed_column_is_a_schema_error() {
        let text = r#"[
            {"Group": "Beef Products", "Food Name": "Steak",
             "Protein (g)": 25.0, "Fat (g)": 10.0, "Carbohydrates (g)": 0.0,
             "Calories": 200, "Water (g)": 60.0, "Sugar (g)": 0.0, "Fiber (g)": 0.0}
        ]"#;
        let err = load_json_text(text).unwrap_err();
        match err {
            LoadError::Schema { column } => assert_eq!(column, GROUP_COLUMN),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
