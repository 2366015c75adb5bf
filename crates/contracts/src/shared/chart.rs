use serde::{Deserialize, Serialize};

/// One named sequence of values plotted against the chart's period axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label (e.g., "Paid Search")
    pub label: String,
    /// One value per period, index-aligned with `Chart::periods`
    pub values: Vec<f64>,
    /// Rendering metadata (colours, line tension, ...), passed through untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub style: serde_json::Value,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            style: serde_json::Value::Null,
        }
    }
}

/// Line chart model: a period axis and the series plotted against it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chart {
    /// Period labels in display order (e.g., "ene 2023")
    pub periods: Vec<String>,
    #[serde(default)]
    pub series: Vec<Series>,
}

/// A series whose length differs from the period axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLengthMismatch {
    pub series: String,
    pub expected: usize,
    pub actual: usize,
}

impl Chart {
    pub fn new(periods: Vec<String>, series: Vec<Series>) -> Self {
        Self { periods, series }
    }

    /// Checks that every series has exactly one value per period
    pub fn validate(&self) -> Result<(), SeriesLengthMismatch> {
        let expected = self.periods.len();
        match self.series.iter().find(|s| s.values.len() != expected) {
            Some(s) => Err(SeriesLengthMismatch {
                series: s.label.clone(),
                expected,
                actual: s.values.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Value-axis configuration. Bounds also drive clamping during disaggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleConfig {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    /// Distance between axis ticks
    #[serde(default)]
    pub step_size: Option<f64>,
    /// Unit appended to tick labels (" mil", "%", " M")
    #[serde(default)]
    pub tick_suffix: Option<String>,
}

/// Per-metric scale settings layered over the chart's base scale.
/// Absent fields fall through to the base.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleOverride {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step_size: Option<f64>,
    #[serde(default)]
    pub tick_suffix: Option<String>,
}

impl ScaleConfig {
    /// Field-by-field merge: the override wins, the base fills the gaps
    pub fn merged(&self, over: &ScaleOverride) -> ScaleConfig {
        ScaleConfig {
            min: over.min.unwrap_or(self.min),
            max: over.max.or(self.max),
            step_size: over.step_size.or(self.step_size),
            tick_suffix: over
                .tick_suffix
                .clone()
                .or_else(|| self.tick_suffix.clone()),
        }
    }
}
