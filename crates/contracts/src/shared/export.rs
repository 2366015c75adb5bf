use serde::{Deserialize, Serialize};

/// Target format of a chart/table export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma-separated text
    DelimitedText,
    /// HTML table that spreadsheet applications open directly
    SpreadsheetMarkup,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::DelimitedText => "csv",
            ExportFormat::SpreadsheetMarkup => "xls",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::DelimitedText => "text/csv;charset=utf-8;",
            ExportFormat::SpreadsheetMarkup => "application/vnd.ms-excel",
        }
    }
}

/// Finished export, ready to be handed to a download sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}
