//! Deterministic period → sub-period disaggregation (months into weeks).
//!
//! Each coarse value is spread into `k` samples around itself. The spread
//! comes from a fixed trigonometric seed function, so the same chart always
//! expands to the same samples.

use contracts::shared::chart::{Chart, ScaleConfig, Series};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Tunables of the disaggregation. Defaults reproduce the dashboard's weekly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisaggregationParams {
    pub subperiods_per_period: usize,
    /// Variation band as a share of the period value
    pub base_variation: f64,
    /// Narrower band used when the value sits close to the scale ceiling
    pub damped_variation: f64,
    /// `value / max` above which the damped band applies
    pub ceiling_proximity: f64,
    /// Per-offset multipliers, cycled when there are more sub-periods than weights
    pub weights: Vec<f64>,
    /// Seed distance between consecutive series
    pub series_seed_stride: usize,
}

impl Default for DisaggregationParams {
    fn default() -> Self {
        Self {
            subperiods_per_period: 4,
            base_variation: 0.2,
            damped_variation: 0.1,
            ceiling_proximity: 0.7,
            weights: vec![1.0, 0.8, 1.2, 0.9],
            series_seed_stride: 100,
        }
    }
}

/// Upper bound on sub-periods per period (daily resolution of a leap year)
pub const MAX_SUBPERIODS_PER_PERIOD: usize = 366;

/// Pseudo-random value in `[0, 1)`: fractional part of `sin(seed) * 10000`
pub fn seeded_random(seed: u64) -> f64 {
    let x = (seed as f64).sin() * 10000.0;
    x - x.floor()
}

/// Expands every period of `chart` into `subperiods_per_period` samples
/// using the default parameters.
pub fn expand(chart: &Chart, subperiods_per_period: usize, scale: &ScaleConfig) -> Result<Chart> {
    let params = DisaggregationParams {
        subperiods_per_period,
        ..DisaggregationParams::default()
    };
    expand_with(chart, scale, &params)
}

pub fn expand_with(chart: &Chart, scale: &ScaleConfig, params: &DisaggregationParams) -> Result<Chart> {
    let k = params.subperiods_per_period;
    if k == 0 {
        return Err(PipelineError::InvalidArgument(
            "subperiods_per_period must be positive".to_string(),
        ));
    }
    if k > MAX_SUBPERIODS_PER_PERIOD {
        return Err(PipelineError::InvalidArgument(format!(
            "subperiods_per_period must be at most {}, got {}",
            MAX_SUBPERIODS_PER_PERIOD, k
        )));
    }
    if params.weights.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "disaggregation weights must not be empty".to_string(),
        ));
    }
    chart.validate()?;

    let total = chart.periods.len().checked_mul(k).ok_or_else(seed_overflow)?;
    let mut periods = Vec::with_capacity(total);
    for label in &chart.periods {
        periods.push(month_label(label).to_string());
        periods.extend(std::iter::repeat(String::new()).take(k - 1));
    }

    let series = chart
        .series
        .iter()
        .enumerate()
        .map(|(series_index, s)| {
            Ok(Series {
                label: s.label.clone(),
                values: expand_values(&s.values, series_index, scale, params)?,
                style: s.style.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        periods = chart.periods.len(),
        subperiods = k,
        series = chart.series.len(),
        "expanded chart"
    );

    Ok(Chart { periods, series })
}

fn expand_values(
    values: &[f64],
    series_index: usize,
    scale: &ScaleConfig,
    params: &DisaggregationParams,
) -> Result<Vec<f64>> {
    let k = params.subperiods_per_period;
    let series_offset = series_index
        .checked_mul(params.series_seed_stride)
        .ok_or_else(seed_overflow)?;
    let mut out = Vec::with_capacity(values.len().saturating_mul(k));

    for (period_index, &value) in values.iter().enumerate() {
        let mut variation = value * params.base_variation;
        if let Some(max) = scale.max.filter(|m| *m != 0.0) {
            if value / max > params.ceiling_proximity {
                variation = value * params.damped_variation;
            }
        }

        for offset in 0..k {
            let seed = period_index
                .checked_mul(k)
                .and_then(|base| base.checked_add(offset))
                .and_then(|local| local.checked_add(series_offset))
                .ok_or_else(seed_overflow)? as u64;
            let weight = params.weights[offset % params.weights.len()];
            let sample = value + (seeded_random(seed) - 0.5) * variation * weight;
            out.push(clamp_to_scale(sample, scale));
        }
    }

    Ok(out)
}

fn seed_overflow() -> PipelineError {
    PipelineError::InvalidArgument("sub-period seed overflows usize".to_string())
}

fn clamp_to_scale(sample: f64, scale: &ScaleConfig) -> f64 {
    let floored = sample.max(scale.min);
    match scale.max {
        Some(max) => floored.min(max),
        None => floored,
    }
}

/// "ene 2023" -> "ene"; labels without a trailing year are kept as is
fn month_label(label: &str) -> &str {
    match label.trim_end().rsplit_once(char::is_whitespace) {
        Some((head, year)) if !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()) => head.trim_end(),
        _ => label,
    }
}
