//! Sort engine: chronological period sort for charts, stable column sort for tables

mod period;
mod rows;

pub use period::{parse_period_label, sort_by_period, sort_by_period_strict};
pub use rows::{compare_cells, sort_rows, sort_rows_by_state};
