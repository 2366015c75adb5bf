use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Value in a table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text value (e.g., "Google Ads", "$12,450")
    Text(String),
    /// Numeric value
    Number(f64),
    /// Null value
    Null,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One table row: values by column id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub HashMap<String, CellValue>);

impl Row {
    pub fn get(&self, column_id: &str) -> Option<&CellValue> {
        self.0.get(column_id)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

/// How a column's cells are rendered and serialized
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnFormat {
    /// The raw cell value
    #[default]
    Plain,
    /// Cell value followed by the signed percentage change read from `change_field`
    Combined { change_field: String },
    /// The cell value is itself a percentage change shown with a trend arrow
    Trend,
}

/// Column header information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column identifier, unique within a table
    pub id: String,
    /// Display name
    pub label: String,
    #[serde(default)]
    pub numeric: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub format: ColumnFormat,
    /// Width in pixels
    #[serde(default)]
    pub width: Option<f64>,
}

impl ColumnDescriptor {
    /// Plain, non-numeric, unsortable column; the same defaults as a
    /// deserialized descriptor that leaves those fields out
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            numeric: false,
            sortable: false,
            format: ColumnFormat::Plain,
            width: None,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn combined(mut self, change_field: &str) -> Self {
        self.format = ColumnFormat::Combined {
            change_field: change_field.to_string(),
        };
        self
    }

    pub fn trend(mut self) -> Self {
        self.format = ColumnFormat::Trend;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Table model: columns in display order and rows in display order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub rows: Vec<Row>,
}
