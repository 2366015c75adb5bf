use contracts::shared::chart::{Chart, ScaleConfig, ScaleOverride};
use contracts::shared::export::{ExportFile, ExportFormat};
use contracts::shared::metrics::MetricDescriptor;
use contracts::shared::view_state::{ChartViewState, Granularity, SortDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::disaggregation::{expand_with, DisaggregationParams};
use crate::error::Result;
use crate::export::{build_export, DelimitedOptions, ExportModel};
use crate::resolver::{default_metric, resolve};
use crate::sort::sort_by_period;

/// Qualifier used in export filenames when no metric is selected
const NO_METRIC_QUALIFIER: &str = "data";

/// Chart widget: base dataset plus per-metric alternates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartWidget {
    pub title: String,
    pub chart: Chart,
    #[serde(default)]
    pub scale: ScaleConfig,
    #[serde(default)]
    pub metrics: Vec<MetricDescriptor>,
    /// Metric id -> chart shown when that metric is selected
    #[serde(default)]
    pub datasets: HashMap<String, Chart>,
    /// Metric id -> scale settings layered over `scale`
    #[serde(default)]
    pub scales: HashMap<String, ScaleOverride>,
}

/// User interaction on a chart widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartAction {
    SelectMetric(String),
    ToggleGranularity,
    SortPeriods(SortDirection),
    Reset,
}

impl ChartWidget {
    /// Period granularity, dataset order, default metric selected
    pub fn initial_state(&self) -> ChartViewState {
        ChartViewState {
            granularity: Granularity::Period,
            selected_metric_id: default_metric(&self.metrics),
            period_order: None,
        }
    }

    pub fn apply(&self, state: &ChartViewState, action: ChartAction) -> ChartViewState {
        match action {
            ChartAction::SelectMetric(id) => ChartViewState {
                selected_metric_id: Some(id),
                ..state.clone()
            },
            ChartAction::ToggleGranularity => ChartViewState {
                granularity: state.granularity.toggled(),
                ..state.clone()
            },
            ChartAction::SortPeriods(direction) => ChartViewState {
                period_order: Some(direction),
                ..state.clone()
            },
            ChartAction::Reset => self.initial_state(),
        }
    }

    /// Resolves the selected metric, orders periods, then disaggregates when
    /// the sub-period view is active
    pub fn render(&self, state: &ChartViewState, params: &DisaggregationParams) -> Result<(Chart, ScaleConfig)> {
        let (chart, scale) = resolve(
            state.selected_metric_id.as_deref(),
            &self.datasets,
            &self.scales,
            &self.chart,
            &self.scale,
        );
        chart.validate()?;

        let chart = match state.period_order {
            Some(direction) => sort_by_period(&chart, direction)?,
            None => chart,
        };

        let chart = match state.granularity {
            Granularity::Period => chart,
            Granularity::Subperiod => expand_with(&chart, &scale, params)?,
        };

        tracing::debug!(
            title = %self.title,
            metric = ?state.selected_metric_id,
            periods = chart.periods.len(),
            series = chart.series.len(),
            "chart rendered"
        );
        Ok((chart, scale))
    }

    /// Exports exactly what [`ChartWidget::render`] shows
    pub fn export(
        &self,
        state: &ChartViewState,
        format: ExportFormat,
        params: &DisaggregationParams,
        options: &DelimitedOptions,
    ) -> Result<ExportFile> {
        let (chart, _) = self.render(state, params)?;
        if chart.is_empty() {
            tracing::debug!(title = %self.title, "chart has no periods, exporting header only");
        }
        let qualifier = state.selected_metric_id.as_deref().unwrap_or(NO_METRIC_QUALIFIER);
        Ok(build_export(
            &self.title,
            qualifier,
            ExportModel::Chart(&chart),
            format,
            options,
        ))
    }
}
