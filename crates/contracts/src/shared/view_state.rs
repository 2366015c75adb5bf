//! Explicit, serializable view state.
//!
//! The engine never holds state between calls: the view layer keeps these
//! values, passes them into each pipeline call and stores what comes back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

/// Table sort state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default)]
    pub active_column_id: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order
    pub fn request(&self, column_id: &str) -> SortState {
        if self.active_column_id.as_deref() == Some(column_id) {
            SortState {
                active_column_id: self.active_column_id.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            SortState {
                active_column_id: Some(column_id.to_string()),
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn reset() -> SortState {
        SortState::default()
    }
}

/// Chart x-axis granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One point per period (month)
    #[default]
    Period,
    /// Each period disaggregated into sub-periods (weeks)
    Subperiod,
}

impl Granularity {
    pub fn toggled(self) -> Self {
        match self {
            Granularity::Period => Granularity::Subperiod,
            Granularity::Subperiod => Granularity::Period,
        }
    }
}

/// State of one chart widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartViewState {
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub selected_metric_id: Option<String>,
    /// `None` keeps the dataset's own period order
    #[serde(default)]
    pub period_order: Option<SortDirection>,
}

/// State of one table widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableViewState {
    #[serde(default)]
    pub sort: SortState,
    /// Optional metric id -> column shown
    #[serde(default)]
    pub selected_metrics: HashMap<String, bool>,
    /// Zero-based page index
    #[serde(default)]
    pub page: usize,
    /// `None` disables pagination
    #[serde(default)]
    pub rows_per_page: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_same_column_flips() {
        let state = SortState::default().request("visits");
        assert_eq!(state.active_column_id.as_deref(), Some("visits"));
        assert_eq!(state.direction, SortDirection::Ascending);

        let state = state.request("visits");
        assert_eq!(state.direction, SortDirection::Descending);

        let state = state.request("visits");
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_request_new_column_resets_to_ascending() {
        let state = SortState {
            active_column_id: Some("visits".to_string()),
            direction: SortDirection::Descending,
        };
        let state = state.request("spend");
        assert_eq!(state.active_column_id.as_deref(), Some("spend"));
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_reset() {
        assert_eq!(
            SortState::reset(),
            SortState {
                active_column_id: None,
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let state = ChartViewState {
            granularity: Granularity::Subperiod,
            selected_metric_id: Some("cpc".to_string()),
            period_order: Some(SortDirection::Descending),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"subperiod\""));
        assert!(json.contains("\"descending\""));
        let back: ChartViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
