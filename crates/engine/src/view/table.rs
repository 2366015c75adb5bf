use contracts::shared::export::{ExportFile, ExportFormat};
use contracts::shared::metrics::MetricDescriptor;
use contracts::shared::table::{ColumnDescriptor, Row, Table};
use contracts::shared::view_state::{SortState, TableViewState};
use serde::{Deserialize, Serialize};

use crate::columns::{compose_columns, initial_selection, toggle_metric};
use crate::export::{build_export, DelimitedOptions, ExportModel};
use crate::sort::sort_rows_by_state;

/// Qualifier used in table export filenames
const TABLE_QUALIFIER: &str = "export";

/// Table widget: rows and columns plus the metrics that can be shown or hidden
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableWidget {
    pub title: String,
    pub table: Table,
    #[serde(default)]
    pub optional_metrics: Vec<MetricDescriptor>,
    #[serde(default)]
    pub filtering_enabled: bool,
}

/// User interaction on a table widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Header click
    RequestSort(String),
    ToggleMetric(String),
    SetPage(usize),
    /// `None` (or zero) shows every row on one page
    SetRowsPerPage(Option<usize>),
    Reset,
}

impl TableWidget {
    pub fn initial_state(&self, rows_per_page: Option<usize>) -> TableViewState {
        TableViewState {
            sort: SortState::reset(),
            selected_metrics: initial_selection(&self.optional_metrics),
            page: 0,
            rows_per_page: rows_per_page.filter(|n| *n > 0),
        }
    }

    pub fn apply(&self, state: &TableViewState, action: TableAction) -> TableViewState {
        match action {
            TableAction::RequestSort(column_id) => {
                let sortable = self
                    .table
                    .columns
                    .iter()
                    .any(|c| c.id == column_id && c.sortable);
                if !sortable {
                    tracing::debug!(column = %column_id, "sort request ignored");
                    return state.clone();
                }
                TableViewState {
                    sort: state.sort.request(&column_id),
                    ..state.clone()
                }
            }
            TableAction::ToggleMetric(metric_id) => {
                if !self.optional_metrics.iter().any(|m| m.id == metric_id) {
                    tracing::debug!(metric = %metric_id, "toggle of unknown metric ignored");
                    return state.clone();
                }
                TableViewState {
                    selected_metrics: toggle_metric(&state.selected_metrics, &metric_id),
                    ..state.clone()
                }
            }
            TableAction::SetPage(page) => TableViewState {
                page,
                ..state.clone()
            },
            TableAction::SetRowsPerPage(rows_per_page) => TableViewState {
                rows_per_page: rows_per_page.filter(|n| *n > 0),
                page: 0,
                ..state.clone()
            },
            TableAction::Reset => self.initial_state(state.rows_per_page),
        }
    }

    pub fn visible_columns(&self, state: &TableViewState) -> Vec<ColumnDescriptor> {
        compose_columns(
            &self.table.columns,
            &self.optional_metrics,
            &state.selected_metrics,
            self.filtering_enabled,
        )
    }

    /// All rows in the state's sort order
    pub fn sorted_rows(&self, state: &TableViewState) -> Vec<Row> {
        sort_rows_by_state(&self.table.rows, &state.sort)
    }

    /// Number of pages; an empty table still has one (empty) page
    pub fn page_count(&self, state: &TableViewState) -> usize {
        match state.rows_per_page {
            Some(n) if n > 0 => self.table.rows.len().div_ceil(n).max(1),
            _ => 1,
        }
    }

    /// Rows of the current page. A page index past the end shows the last page.
    pub fn page_rows(&self, state: &TableViewState) -> Vec<Row> {
        let rows = self.sorted_rows(state);
        let Some(per_page) = state.rows_per_page.filter(|n| *n > 0) else {
            return rows;
        };

        let page = state.page.min(self.page_count(state) - 1);
        rows.into_iter().skip(page * per_page).take(per_page).collect()
    }

    /// Exports every row (not only the current page) in the visible columns
    pub fn export(&self, state: &TableViewState, format: ExportFormat, options: &DelimitedOptions) -> ExportFile {
        let columns = self.visible_columns(state);
        let rows = self.sorted_rows(state);
        build_export(
            &self.title,
            TABLE_QUALIFIER,
            ExportModel::Table {
                columns: &columns,
                rows: &rows,
            },
            format,
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::table::CellValue;
    use contracts::shared::view_state::SortDirection;

    fn channel(name: &str, visits: f64, change: f64, cpc: f64) -> Row {
        Row::from_iter([
            ("channel", CellValue::from(name)),
            ("visits", CellValue::from(visits)),
            ("visitsChange", CellValue::from(change)),
            ("cpc", CellValue::from(cpc)),
        ])
    }

    fn widget() -> TableWidget {
        TableWidget {
            title: "Canales".to_string(),
            table: Table {
                columns: vec![
                    ColumnDescriptor::new("cpc", "CPC").numeric().sortable(),
                    ColumnDescriptor::new("channel", "Canal").sortable(),
                    ColumnDescriptor::new("visits", "Visitas").numeric().sortable().combined("visitsChange"),
                    ColumnDescriptor::new("trend", "Tendencia").trend(),
                ],
                rows: vec![
                    channel("Google", 300.0, 5.0, 1.2),
                    channel("Email", 100.0, -2.0, 0.4),
                    channel("Facebook", 200.0, 0.0, 0.9),
                ],
            },
            optional_metrics: vec![MetricDescriptor::new("cpc", "CPC", None)],
            filtering_enabled: true,
        }
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r.get("channel").unwrap().to_string()).collect()
    }

    #[test]
    fn test_optional_columns_hidden_until_toggled() {
        let w = widget();
        let state = w.initial_state(None);
        let ids: Vec<String> = w.visible_columns(&state).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["channel", "visits", "trend"]);

        let state = w.apply(&state, TableAction::ToggleMetric("cpc".to_string()));
        let ids: Vec<String> = w.visible_columns(&state).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["channel", "visits", "trend", "cpc"]);
    }

    #[test]
    fn test_header_clicks_cycle_direction() {
        let w = widget();
        let state = w.apply(&w.initial_state(None), TableAction::RequestSort("visits".to_string()));
        assert_eq!(names(&w.sorted_rows(&state)), vec!["Email", "Facebook", "Google"]);

        let state = w.apply(&state, TableAction::RequestSort("visits".to_string()));
        assert_eq!(state.sort.direction, SortDirection::Descending);
        assert_eq!(names(&w.sorted_rows(&state)), vec!["Google", "Facebook", "Email"]);

        let state = w.apply(&state, TableAction::RequestSort("channel".to_string()));
        assert_eq!(state.sort.direction, SortDirection::Ascending);
        assert_eq!(names(&w.sorted_rows(&state)), vec!["Email", "Facebook", "Google"]);
    }

    #[test]
    fn test_sort_requests_on_unsortable_or_unknown_columns_are_ignored() {
        let w = widget();
        let state = w.initial_state(None);
        assert_eq!(w.apply(&state, TableAction::RequestSort("trend".to_string())), state);
        assert_eq!(w.apply(&state, TableAction::RequestSort("nope".to_string())), state);
        assert_eq!(w.apply(&state, TableAction::ToggleMetric("nope".to_string())), state);
    }

    #[test]
    fn test_pagination() {
        let w = widget();
        let state = w.initial_state(Some(2));
        assert_eq!(w.page_count(&state), 2);
        assert_eq!(names(&w.page_rows(&state)), vec!["Google", "Email"]);

        let state = w.apply(&state, TableAction::SetPage(1));
        assert_eq!(names(&w.page_rows(&state)), vec!["Facebook"]);

        let state = w.apply(&state, TableAction::SetPage(9));
        assert_eq!(names(&w.page_rows(&state)), vec!["Facebook"]);

        let state = w.apply(&state, TableAction::SetRowsPerPage(None));
        assert_eq!(state.page, 0);
        assert_eq!(w.page_count(&state), 1);
        assert_eq!(w.page_rows(&state).len(), 3);
    }

    #[test]
    fn test_empty_table_has_one_empty_page() {
        let w = TableWidget::default();
        let state = w.initial_state(Some(10));
        assert_eq!(w.page_count(&state), 1);
        assert!(w.page_rows(&state).is_empty());
    }

    #[test]
    fn test_reset_keeps_page_size() {
        let w = widget();
        let state = w.initial_state(Some(2));
        let state = w.apply(&state, TableAction::ToggleMetric("cpc".to_string()));
        let state = w.apply(&state, TableAction::RequestSort("visits".to_string()));
        let state = w.apply(&state, TableAction::SetPage(1));

        let reset = w.apply(&state, TableAction::Reset);
        assert_eq!(reset, w.initial_state(Some(2)));
    }

    #[test]
    fn test_export_contains_visible_columns_and_all_sorted_rows() {
        let w = widget();
        let state = w.initial_state(Some(1));
        let state = w.apply(&state, TableAction::RequestSort("visits".to_string()));
        let state = w.apply(&state, TableAction::RequestSort("visits".to_string()));

        let file = w.export(&state, ExportFormat::DelimitedText, &DelimitedOptions::default());
        assert_eq!(file.filename, "Canales_export.csv");
        assert_eq!(
            file.content,
            "Canal,Visitas,Tendencia\n\
             Google,\"300 (+5%)\",\n\
             Facebook,\"200 (0%)\",\n\
             Email,\"100 (-2%)\","
        );
    }
}
