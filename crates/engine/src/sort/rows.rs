use contracts::shared::table::{CellValue, Row};
use contracts::shared::view_state::{SortDirection, SortState};
use std::cmp::Ordering;

/// Natural order of two cells of the same column.
///
/// Numbers compare numerically and text lexicographically. Across kinds,
/// numbers come before text, and blanks (null, missing, NaN) come last, so
/// the order stays total even for mixed columns.
pub fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
    Blank,
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Blank => 2,
        }
    }
}

fn sort_key(cell: Option<&CellValue>) -> SortKey<'_> {
    match cell {
        Some(CellValue::Text(s)) => SortKey::Text(s),
        Some(value) => value
            .as_number()
            .filter(|n| !n.is_nan())
            .map_or(SortKey::Blank, SortKey::Number),
        None => SortKey::Blank,
    }
}

/// `Less` when `b` sorts before `a`, i.e. `a` belongs earlier in descending order
fn descending_comparator(a: &Row, b: &Row, column_id: &str) -> Ordering {
    compare_cells(b.get(column_id), a.get(column_id))
}

/// Stable sort of table rows by one column
pub fn sort_rows(rows: &[Row], column_id: &str, direction: SortDirection) -> Vec<Row> {
    let mut indexed: Vec<(usize, &Row)> = rows.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        let ord = match direction {
            SortDirection::Descending => descending_comparator(a, b, column_id),
            SortDirection::Ascending => descending_comparator(a, b, column_id).reverse(),
        };
        ord.then(ia.cmp(ib))
    });
    indexed.into_iter().map(|(_, row)| row.clone()).collect()
}

/// Applies a sort state; rows stay as given while no column is active
pub fn sort_rows_by_state(rows: &[Row], state: &SortState) -> Vec<Row> {
    match state.active_column_id.as_deref() {
        Some(column_id) => sort_rows(rows, column_id, state.direction),
        None => rows.to_vec(),
    }
}
