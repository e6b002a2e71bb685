use super::model::{FoodDataset, FoodRecord};
use crate::config::{GroupRule, UnmappedPolicy, UNCLASSIFIED_COLOR, UNCLASSIFIED_LABEL};

/// A record with its assigned meta group and palette entries, between the
/// normalizer and the metric deriver.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRecord {
    pub record: FoodRecord,
    pub label: String,
    pub color: String,
    pub cb_color: String,
}

/// Fold fine-grained source categories into meta groups.
///
/// Rules are tested in declared order; the first rule with any pattern
/// contained in the record's category wins and no further rules run for
/// that record. The substring test is deliberately looser than the
/// category filter's exact match, since published category names vary in
/// capitalization and pluralization.
pub fn assign_groups(
    dataset: FoodDataset,
    rules: &[GroupRule],
    policy: UnmappedPolicy,
) -> Vec<GroupedRecord> {
    let mut grouped = Vec::with_capacity(dataset.len());
    for record in dataset.records {
        let hit = rules.iter().find(|rule| {
            rule.patterns
                .iter()
                .any(|pattern| record.group.contains(pattern.as_str()))
        });
        match hit {
            Some(rule) => grouped.push(GroupedRecord {
                label: rule.label.clone(),
                color: rule.color.clone(),
                cb_color: rule.cb_color.clone(),
                record,
            }),
            None => {
                log::warn!(
                    "'{}' ({}) matches no meta group, policy = {policy:?}",
                    record.name,
                    record.group
                );
                if policy == UnmappedPolicy::Sentinel {
                    grouped.push(GroupedRecord {
                        label: UNCLASSIFIED_LABEL.to_string(),
                        color: UNCLASSIFIED_COLOR.to_string(),
                        cb_color: UNCLASSIFIED_COLOR.to_string(),
                        record,
                    });
                }
            }
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::data::model::Nutrients;

    fn dataset_of(categories: &[&str]) -> FoodDataset {
        FoodDataset::new(
            categories
                .iter()
                .enumerate()
                .map(|(i, group)| FoodRecord {
                    group: group.to_string(),
                    name: format!("food {i}"),
                    nutrients: Nutrients::default(),
                })
                .collect(),
        )
    }

    #[test]
    fn beef_products_fold_into_meat_with_its_palette() {
        let config = PipelineConfig::default();
        let grouped = assign_groups(
            dataset_of(&["Beef Products"]),
            &config.groups,
            UnmappedPolicy::Sentinel,
        );
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].label, "Meat");
        assert_eq!(grouped[0].color, "#f44336");
        assert_eq!(grouped[0].cb_color, "#f44336");
    }

    #[test]
    fn every_record_gets_exactly_one_group() {
        let config = PipelineConfig::direct_compare();
        let categories: Vec<&str> = config.allow_list.iter().map(String::as_str).collect();
        let grouped = assign_groups(
            dataset_of(&categories),
            &config.groups,
            UnmappedPolicy::Drop,
        );
        assert_eq!(grouped.len(), categories.len());
        for g in &grouped {
            assert!(config.groups.iter().any(|rule| rule.label == g.label));
        }
    }

    #[test]
    fn first_declared_rule_wins_on_overlap() {
        let rules = vec![
            GroupRule::new("First", &["Products"], "#111111", "#111111"),
            GroupRule::new("Second", &["Beef Products"], "#222222", "#222222"),
        ];
        let grouped = assign_groups(
            dataset_of(&["Beef Products"]),
            &rules,
            UnmappedPolicy::Drop,
        );
        assert_eq!(grouped[0].label, "First");
    }

    #[test]
    fn unmapped_records_are_dropped_under_drop_policy() {
        let config = PipelineConfig::default();
        let grouped = assign_groups(
            dataset_of(&["Baked Products", "Beef Products"]),
            &config.groups,
            UnmappedPolicy::Drop,
        );
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].record.group, "Beef Products");
    }

    #[test]
    fn unmapped_records_are_tagged_under_sentinel_policy() {
        let config = PipelineConfig::default();
        let grouped = assign_groups(
            dataset_of(&["Baked Products"]),
            &config.groups,
            UnmappedPolicy::Sentinel,
        );
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].label, UNCLASSIFIED_LABEL);
        assert_eq!(grouped[0].color, UNCLASSIFIED_COLOR);
    }
}
