//! Metric selection: picks the alternate dataset for the selected metric and
//! layers its scale over the chart's base scale.

use contracts::shared::chart::{Chart, ScaleConfig, ScaleOverride};
use contracts::shared::metrics::MetricDescriptor;
use std::collections::HashMap;

use crate::format::format_number;

/// Returns the dataset and scale for `metric_id`.
///
/// An absent id, or one with no dataset, falls back to the base chart and
/// scale. That is a normal outcome, not an error.
pub fn resolve(
    metric_id: Option<&str>,
    datasets_by_id: &HashMap<String, Chart>,
    scales_by_id: &HashMap<String, ScaleOverride>,
    base_chart: &Chart,
    base_scale: &ScaleConfig,
) -> (Chart, ScaleConfig) {
    let Some(id) = metric_id else {
        return (base_chart.clone(), base_scale.clone());
    };
    let Some(chart) = datasets_by_id.get(id) else {
        tracing::debug!(metric = id, "no dataset for metric, using base chart");
        return (base_chart.clone(), base_scale.clone());
    };

    let scale = match scales_by_id.get(id) {
        Some(over) => base_scale.merged(over),
        None => base_scale.clone(),
    };
    (chart.clone(), scale)
}

/// Initial metric selection: first metric visible by default, else the first
/// metric, else none
pub fn default_metric(metrics: &[MetricDescriptor]) -> Option<String> {
    metrics
        .iter()
        .find(|m| m.is_visible_by_default())
        .or_else(|| metrics.first())
        .map(|m| m.id.clone())
}

/// Upper bound on generated axis ticks
pub const MAX_TICKS: usize = 1000;

/// Axis tick positions from `min` to `max` (inclusive) every `step_size`.
/// Empty unless both `max` and a positive `step_size` are set, and when the
/// axis would need more than [`MAX_TICKS`] ticks.
pub fn tick_values(scale: &ScaleConfig) -> Vec<f64> {
    let (Some(max), Some(step)) = (scale.max, scale.step_size) else {
        return vec![];
    };
    if !(step > 0.0) || !(max >= scale.min) {
        return vec![];
    }

    let intervals = ((max - scale.min) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_TICKS as f64 {
        tracing::debug!(min = scale.min, max, step, "axis needs too many ticks, none generated");
        return vec![];
    }

    let count = intervals as usize;
    (0..=count).map(|i| scale.min + step * i as f64).collect()
}

/// Tick labels with the scale's unit suffix; zero is shown bare
pub fn tick_labels(scale: &ScaleConfig) -> Vec<String> {
    let suffix = scale.tick_suffix.as_deref().unwrap_or("");
    tick_values(scale)
        .into_iter()
        .map(|v| {
            if v == 0.0 {
                "0".to_string()
            } else {
                format!("{}{}", format_number(v), suffix)
            }
        })
        .collect()
}
