use chrono::NaiveDate;
use contracts::shared::chart::{Chart, Series};
use contracts::shared::view_state::SortDirection;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{PipelineError, Result};

/// Full month names (Spanish and English) -> month number
static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("enero", 1),
        ("january", 1),
        ("febrero", 2),
        ("february", 2),
        ("marzo", 3),
        ("march", 3),
        ("abril", 4),
        ("april", 4),
        ("mayo", 5),
        ("may", 5),
        ("junio", 6),
        ("june", 6),
        ("julio", 7),
        ("july", 7),
        ("agosto", 8),
        ("august", 8),
        ("septiembre", 9),
        ("setiembre", 9),
        ("september", 9),
        ("octubre", 10),
        ("october", 10),
        ("noviembre", 11),
        ("november", 11),
        ("diciembre", 12),
        ("december", 12),
    ])
});

/// Shortest accepted month token ("ene", "Feb", "sept")
const MIN_MONTH_TOKEN: usize = 3;

/// Month number for a token that abbreviates (or spells out) a month name
fn month_number(token: &str) -> Option<u32> {
    if token.chars().count() < MIN_MONTH_TOKEN {
        return None;
    }
    MONTHS
        .iter()
        .find(|(name, _)| name.starts_with(token))
        .map(|(_, &month)| month)
}

/// Parses "<month> <year>" (e.g., "ene 2023", "Feb. 2024", "marzo 2023")
/// into the first day of that month
pub fn parse_period_label(label: &str) -> Result<NaiveDate> {
    let malformed = || PipelineError::MalformedLabel(label.to_string());

    let mut parts = label.split_whitespace();
    let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let month = month.trim_end_matches('.').to_lowercase();
    let month = month_number(&month).ok_or_else(malformed)?;
    let year: i32 = year.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(malformed)
}

/// Reorders periods chronologically, carrying every series' values along.
///
/// Periods whose label has no date (empty sub-period labels, free text) keep
/// their position; dated periods are sorted among the remaining slots. Ties
/// keep their original relative order.
pub fn sort_by_period(chart: &Chart, direction: SortDirection) -> Result<Chart> {
    chart.validate()?;

    let keys: Vec<Option<NaiveDate>> = chart
        .periods
        .iter()
        .map(|label| parse_period_label(label).ok())
        .collect();

    let dated_slots: Vec<usize> = keys
        .iter()
        .enumerate()
        .filter_map(|(i, key)| key.map(|_| i))
        .collect();

    let undated = chart.periods.len() - dated_slots.len();
    if undated > 0 {
        tracing::debug!(undated, "period labels without a date keep their position");
    }

    let mut order = dated_slots.clone();
    order.sort_by(|&a, &b| {
        let ord = keys[a].cmp(&keys[b]);
        let ord = if direction.is_ascending() { ord } else { ord.reverse() };
        ord.then(a.cmp(&b))
    });

    let mut permutation: Vec<usize> = (0..chart.periods.len()).collect();
    for (slot, source) in dated_slots.into_iter().zip(order) {
        permutation[slot] = source;
    }

    Ok(apply_permutation(chart, &permutation))
}

/// Same as [`sort_by_period`] but rejects any non-empty label that is not a date
pub fn sort_by_period_strict(chart: &Chart, direction: SortDirection) -> Result<Chart> {
    for label in chart.periods.iter().filter(|l| !l.trim().is_empty()) {
        parse_period_label(label)?;
    }
    sort_by_period(chart, direction)
}

/// `permutation[i]` is the original index that lands at position `i`
fn apply_permutation(chart: &Chart, permutation: &[usize]) -> Chart {
    Chart {
        periods: permutation.iter().map(|&i| chart.periods[i].clone()).collect(),
        series: chart
            .series
            .iter()
            .map(|s| Series {
                label: s.label.clone(),
                values: permutation.iter().map(|&i| s.values[i]).collect(),
                style: s.style.clone(),
            })
            .collect(),
    }
}
