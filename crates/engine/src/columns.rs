//! Visible-column composition for tables with optional metric columns

use contracts::shared::metrics::MetricDescriptor;
use contracts::shared::table::ColumnDescriptor;
use std::collections::{HashMap, HashSet};

/// Ordered visible columns: base columns first, then the selected optional
/// columns, both in their original relative order. With filtering disabled
/// all columns are returned unchanged.
pub fn compose_columns(
    all_columns: &[ColumnDescriptor],
    optional_metrics: &[MetricDescriptor],
    selected: &HashMap<String, bool>,
    filtering_enabled: bool,
) -> Vec<ColumnDescriptor> {
    if !filtering_enabled {
        return all_columns.to_vec();
    }

    let optional: HashSet<&str> = optional_metrics.iter().map(|m| m.id.as_str()).collect();
    let is_selected = |id: &str| selected.get(id).copied().unwrap_or(false);

    let base = all_columns.iter().filter(|c| !optional.contains(c.id.as_str()));
    let chosen = all_columns
        .iter()
        .filter(|c| optional.contains(c.id.as_str()) && is_selected(c.id.as_str()));

    base.chain(chosen).cloned().collect()
}

/// Starting selection: a metric column is shown only when flagged visible
pub fn initial_selection(optional_metrics: &[MetricDescriptor]) -> HashMap<String, bool> {
    optional_metrics
        .iter()
        .map(|m| (m.id.clone(), m.is_initially_selected()))
        .collect()
}

/// Flips one metric's checkbox
pub fn toggle_metric(selected: &HashMap<String, bool>, metric_id: &str) -> HashMap<String, bool> {
    let mut next = selected.clone();
    let entry = next.entry(metric_id.to_string()).or_insert(false);
    *entry = !*entry;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(columns: &[ColumnDescriptor]) -> Vec<&str> {
        columns.iter().map(|c| c.id.as_str()).collect()
    }

    fn columns(list: &[&str]) -> Vec<ColumnDescriptor> {
        list.iter().map(|id| ColumnDescriptor::new(id, &id.to_uppercase())).collect()
    }

    fn metrics(list: &[&str]) -> Vec<MetricDescriptor> {
        list.iter().map(|id| MetricDescriptor::new(id, id, None)).collect()
    }

    #[test]
    fn test_base_then_selected_optional() {
        let all = columns(&["a", "b", "c", "d"]);
        let optional = metrics(&["c", "d"]);
        let selected = HashMap::from([("c".to_string(), true), ("d".to_string(), false)]);

        let visible = compose_columns(&all, &optional, &selected, true);
        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_optional_columns_move_behind_base_in_original_order() {
        let all = columns(&["ctr", "channel", "cpc", "visits", "spend"]);
        let optional = metrics(&["spend", "ctr", "cpc"]);
        let selected = HashMap::from([
            ("spend".to_string(), true),
            ("ctr".to_string(), true),
            ("cpc".to_string(), true),
        ]);

        let visible = compose_columns(&all, &optional, &selected, true);
        assert_eq!(ids(&visible), vec!["channel", "visits", "ctr", "cpc", "spend"]);
    }

    #[test]
    fn test_filtering_disabled_returns_all() {
        let all = columns(&["a", "c", "b"]);
        let visible = compose_columns(&all, &metrics(&["c"]), &HashMap::new(), false);
        assert_eq!(visible, all);
    }

    #[test]
    fn test_toggle_on_then_off_restores_columns() {
        let all = columns(&["a", "b", "c", "d"]);
        let optional = metrics(&["b", "d"]);
        let selected = initial_selection(&optional);
        let before = compose_columns(&all, &optional, &selected, true);
        assert_eq!(ids(&before), vec!["a", "c"]);

        let on = toggle_metric(&selected, "b");
        assert_eq!(ids(&compose_columns(&all, &optional, &on, true)), vec!["a", "c", "b"]);

        let off = toggle_metric(&on, "b");
        assert_eq!(compose_columns(&all, &optional, &off, true), before);
    }

    #[test]
    fn test_toggle_order_does_not_matter() {
        let all = columns(&["a", "x", "y", "z"]);
        let optional = metrics(&["x", "y", "z"]);
        let start = initial_selection(&optional);

        let first = toggle_metric(&toggle_metric(&start, "z"), "x");
        let second = toggle_metric(&toggle_metric(&start, "x"), "z");
        assert_eq!(
            compose_columns(&all, &optional, &first, true),
            compose_columns(&all, &optional, &second, true)
        );
    }

    #[test]
    fn test_no_duplicates_and_base_never_dropped() {
        let all = columns(&["a", "b", "c"]);
        let optional = metrics(&["b", "b"]);
        let selected = HashMap::from([("b".to_string(), true), ("a".to_string(), false)]);

        let visible = compose_columns(&all, &optional, &selected, true);
        assert_eq!(ids(&visible), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_initial_selection_uses_explicit_flag() {
        let optional = vec![
            MetricDescriptor::new("cpc", "CPC", Some(true)),
            MetricDescriptor::new("ctr", "CTR", None),
            MetricDescriptor::new("cpa", "CPA", Some(false)),
        ];
        let selected = initial_selection(&optional);
        assert_eq!(selected.get("cpc"), Some(&true));
        assert_eq!(selected.get("ctr"), Some(&false));
        assert_eq!(selected.get("cpa"), Some(&false));
    }
}
