use super::model::{FoodDataset, PlotTable};

// ---------------------------------------------------------------------------
// Category filter (pipeline stage)
// ---------------------------------------------------------------------------

/// Keep only records whose source category exactly equals an allow-listed
/// string. Case-sensitive, whole-string match; dropped records are not an
/// error condition.
pub fn retain_allowed(dataset: FoodDataset, allow_list: &[String]) -> FoodDataset {
    let before = dataset.len();
    let records: Vec<_> = dataset
        .records
        .into_iter()
        .filter(|record| allow_list.iter().any(|category| *category == record.group))
        .collect();
    log::debug!("category filter kept {}/{} records", records.len(), before);
    FoodDataset::new(records)
}

// ---------------------------------------------------------------------------
// Search filter (view-side, pure)
// ---------------------------------------------------------------------------

/// Indices of table rows matching the search query against food name or
/// source category, case-insensitively. An empty or whitespace query
/// keeps every row visible. Pure: only the returned index subset changes,
/// never the table.
pub fn search_indices(table: &PlotTable, query: &str) -> Vec<usize> {
    let needle = query.trim().to_uppercase();
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            needle.is_empty()
                || row.name.to_uppercase().contains(&needle)
                || row.source_group.to_uppercase().contains(&needle)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FoodRecord, Nutrients, PlotRow};

    fn record(group: &str, name: &str) -> FoodRecord {
        FoodRecord {
            group: group.to_string(),
            name: name.to_string(),
            nutrients: Nutrients::default(),
        }
    }

    fn row(group: &str, name: &str) -> PlotRow {
        PlotRow {
            name: name.to_string(),
            source_group: group.to_string(),
            group: String::new(),
            color: String::new(),
            cb_color: String::new(),
            nutrients: Nutrients::default(),
            ternary: None,
        }
    }

    #[test]
    fn allow_list_matches_whole_strings_only() {
        let dataset = FoodDataset::new(vec![
            record("Beef Products", "Steak"),
            record("Beef", "Not a real category"),
            record("Baked Products", "Bagel"),
        ]);
        let allowed = vec!["Beef Products".to_string()];
        let kept = retain_allowed(dataset, &allowed);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.records[0].name, "Steak");
    }

    #[test]
    fn every_retained_record_is_allow_listed() {
        let allowed = vec!["Beef Products".to_string(), "Snacks".to_string()];
        let dataset = FoodDataset::new(vec![
            record("Beef Products", "Steak"),
            record("Sweets", "Toffee"),
            record("Snacks", "Pretzels"),
        ]);
        let kept = retain_allowed(dataset, &allowed);
        assert!(kept.records.iter().all(|r| allowed.contains(&r.group)));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_category() {
        let table = PlotTable {
            rows: vec![
                row("Beef Products", "Steak, sirloin"),
                row("Fruits and Fruit Juices", "Apples"),
                row("Finfish and Shellfish Products", "Salmon, Atlantic"),
            ],
            legend: Vec::new(),
        };
        assert_eq!(search_indices(&table, "sTeAk"), vec![0]);
        // "fruit" hits the category of row 1, not any food name.
        assert_eq!(search_indices(&table, "fruit"), vec![1]);
        assert_eq!(search_indices(&table, "zucchini"), Vec::<usize>::new());
    }

    #[test]
    fn empty_query_keeps_everything_visible() {
        let table = PlotTable {
            rows: vec![row("Beef Products", "Steak"), row("Snacks", "Pretzels")],
            legend: Vec::new(),
        };
        assert_eq!(search_indices(&table, ""), vec![0, 1]);
        assert_eq!(search_indices(&table, "   "), vec![0, 1]);
    }
}
