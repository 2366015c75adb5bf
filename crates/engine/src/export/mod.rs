//! Export serializer: chart/table models to delimited text or spreadsheet markup.
//!
//! The serializer never reorders anything. Callers pass the model after
//! metric resolution, sorting and column composition, and get back exactly
//! those rows and columns.

mod delimited;
mod filename;
mod markup;

pub use delimited::{to_delimited_text, to_delimited_text_with, DelimitedOptions};
pub use filename::export_filename;
pub use markup::to_spreadsheet_markup;

use contracts::shared::chart::Chart;
use contracts::shared::export::{ExportFile, ExportFormat};
use contracts::shared::table::{CellValue, ColumnDescriptor, ColumnFormat, Row};

use crate::format::{format_change, format_number};

/// Header label of the period column in chart exports
pub const PERIOD_HEADER: &str = "Period";

/// What gets exported
#[derive(Debug, Clone, Copy)]
pub enum ExportModel<'a> {
    /// Periods x series
    Chart(&'a Chart),
    /// Visible columns x rows
    Table {
        columns: &'a [ColumnDescriptor],
        rows: &'a [Row],
    },
}

/// Serialized cell text plus whether it must be quoted regardless of content
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cell {
    pub text: String,
    pub force_quote: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            force_quote: false,
        }
    }

    fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            force_quote: true,
        }
    }
}

/// Header row and body rows as cell text, shared by both output formats
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Grid {
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportModel<'_> {
    pub(crate) fn to_grid(&self) -> Grid {
        match self {
            ExportModel::Chart(chart) => chart_grid(chart),
            ExportModel::Table { columns, rows } => table_grid(columns, rows),
        }
    }
}

fn chart_grid(chart: &Chart) -> Grid {
    let header = std::iter::once(Cell::plain(PERIOD_HEADER))
        .chain(chart.series.iter().map(|s| Cell::plain(s.label.clone())))
        .collect();

    let rows = chart
        .periods
        .iter()
        .enumerate()
        .map(|(i, period)| {
            std::iter::once(Cell::plain(period.clone()))
                .chain(chart.series.iter().map(|s| {
                    // missing points export as 0
                    Cell::plain(format_number(s.values.get(i).copied().unwrap_or(0.0)))
                }))
                .collect()
        })
        .collect();

    Grid { header, rows }
}

fn table_grid(columns: &[ColumnDescriptor], rows: &[Row]) -> Grid {
    let header = columns.iter().map(|c| Cell::plain(c.label.clone())).collect();
    let rows = rows
        .iter()
        .map(|row| columns.iter().map(|c| table_cell(c, row)).collect())
        .collect();
    Grid { header, rows }
}

fn table_cell(column: &ColumnDescriptor, row: &Row) -> Cell {
    let value = cell_text(row.get(&column.id));
    match &column.format {
        ColumnFormat::Plain | ColumnFormat::Trend => Cell::plain(value),
        ColumnFormat::Combined { change_field } => match change_text(row.get(change_field)) {
            Some(change) => Cell::quoted(format!("{} ({})", value, change)),
            None => Cell::quoted(value),
        },
    }
}

fn cell_text(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Number(n)) => format_number(*n),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// "+5%" / "-3%" / "0%"; `None` when the row has no change value
fn change_text(cell: Option<&CellValue>) -> Option<String> {
    match cell {
        Some(CellValue::Number(n)) => Some(format_change(*n)),
        Some(CellValue::Text(s)) if !s.trim().is_empty() => {
            let positive = s.trim().parse::<f64>().map(|n| n > 0.0).unwrap_or(false);
            Some(format!("{}{}%", if positive { "+" } else { "" }, s.trim()))
        }
        _ => None,
    }
}

/// Serializes `model` and wraps it in a downloadable file named after the
/// widget title and qualifier (selected metric, "data", "export")
pub fn build_export(
    title: &str,
    qualifier: &str,
    model: ExportModel<'_>,
    format: ExportFormat,
    options: &DelimitedOptions,
) -> ExportFile {
    let content = match format {
        ExportFormat::DelimitedText => to_delimited_text_with(model, options),
        ExportFormat::SpreadsheetMarkup => to_spreadsheet_markup(model),
    };

    tracing::debug!(title, qualifier, ?format, bytes = content.len(), "export built");

    ExportFile {
        filename: export_filename(title, qualifier, format),
        mime_type: format.mime_type().to_string(),
        content,
    }
}
