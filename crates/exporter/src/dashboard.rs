//! Dashboard file loading and the export run over all of its widgets

use anyhow::Context;
use contracts::shared::chart::Chart;
use contracts::shared::export::ExportFile;
use contracts::shared::view_state::{ChartViewState, Granularity, SortDirection, TableViewState};
use engine::resolver::tick_labels;
use engine::sort::sort_by_period_strict;
use engine::view::{ChartAction, ChartWidget, TableAction, TableWidget};
use engine::PipelineError;
use serde::Deserialize;
use std::path::Path;

use crate::shared::config::{resolve_path, Config, TableConfig, ViewConfig, DEFAULT_DASHBOARD};
use crate::shared::download::ExportSink;

/// Sample dashboard built into the binary
pub const SAMPLE_DASHBOARD: &str = include_str!("../data/sample_dashboard.json");

/// Dashboard JSON: chart and table widgets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardFile {
    #[serde(default)]
    pub charts: Vec<ChartWidget>,
    #[serde(default)]
    pub tables: Vec<TableWidget>,
}

pub fn parse_dashboard(json: &str) -> anyhow::Result<DashboardFile> {
    let dashboard: DashboardFile = serde_json::from_str(json).context("Invalid dashboard JSON")?;
    Ok(dashboard)
}

pub fn load_dashboard(path: &Path) -> anyhow::Result<DashboardFile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read dashboard {}", path.display()))?;
    let dashboard = parse_dashboard(&json)?;
    tracing::info!(
        "Dashboard loaded: {} ({} charts, {} tables)",
        path.display(),
        dashboard.charts.len(),
        dashboard.tables.len()
    );
    Ok(dashboard)
}

/// Loads `path`, or the built-in sample when `sample_if_missing` is set and
/// the file does not exist
pub fn load_dashboard_or_sample(path: &Path, sample_if_missing: bool) -> anyhow::Result<DashboardFile> {
    if sample_if_missing && !path.exists() {
        tracing::info!("Dashboard {} not found, using built-in sample", path.display());
        return parse_dashboard(SAMPLE_DASHBOARD);
    }
    load_dashboard(path)
}

/// Loads the configured dashboard. Only the default path falls back to the
/// built-in sample; any other missing file is an error.
pub fn load_configured_dashboard(configured: &str) -> anyhow::Result<DashboardFile> {
    load_dashboard_or_sample(&resolve_path(configured), configured == DEFAULT_DASHBOARD)
}

/// Period labels the date parser rejects, one message per chart or metric
/// dataset. Such periods keep their slot when the chart is sorted.
pub fn undated_period_warnings(dashboard: &DashboardFile) -> Vec<String> {
    let mut warnings = Vec::new();
    for widget in &dashboard.charts {
        let mut datasets: Vec<(&str, &Chart)> = widget
            .datasets
            .iter()
            .map(|(id, c)| (id.as_str(), c))
            .collect();
        datasets.sort_by_key(|(id, _)| *id);

        for (dataset, chart) in std::iter::once(("base", &widget.chart)).chain(datasets) {
            if let Err(PipelineError::MalformedLabel(label)) = sort_by_period_strict(chart, SortDirection::Ascending) {
                warnings.push(format!(
                    "Chart '{}' ({}): period '{}' has no date and keeps its position",
                    widget.title, dataset, label
                ));
            }
        }
    }
    warnings
}

/// Outcome of one export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub delivered: usize,
    pub failed: usize,
}

/// Chart state from the configured view: initial state, then metric,
/// period order and granularity as configured
pub fn chart_state(widget: &ChartWidget, view: &ViewConfig) -> ChartViewState {
    let mut state = widget.initial_state();

    if let Some(metric) = &view.metric {
        if widget.metrics.iter().any(|m| &m.id == metric) {
            state = widget.apply(&state, ChartAction::SelectMetric(metric.clone()));
        }
    }
    if let Some(direction) = view.period_order {
        state = widget.apply(&state, ChartAction::SortPeriods(direction));
    }
    if view.granularity == Granularity::Subperiod {
        state = widget.apply(&state, ChartAction::ToggleGranularity);
    }
    state
}

/// Table state from the configured sort and page size, replayed as header clicks
pub fn table_state(widget: &TableWidget, table: &TableConfig) -> TableViewState {
    let mut state = widget.initial_state(table.rows_per_page);

    if let Some(column) = &table.sort_column {
        state = widget.apply(&state, TableAction::RequestSort(column.clone()));
        let wants_descending = table.sort_direction == Some(SortDirection::Descending);
        if wants_descending && state.sort.active_column_id.as_deref() == Some(column.as_str()) {
            state = widget.apply(&state, TableAction::RequestSort(column.clone()));
        }
    }
    state
}

/// Exports every widget in every configured format.
///
/// A widget that fails to render or a file that fails to deliver is logged
/// and skipped; the run always goes on.
pub fn run(dashboard: &DashboardFile, config: &Config, sink: &dyn ExportSink) -> RunSummary {
    let options = config.export.delimited_options();
    let mut summary = RunSummary::default();

    if config.view.period_order.is_some() {
        for warning in undated_period_warnings(dashboard) {
            tracing::warn!("{}", warning);
        }
    }

    for widget in &dashboard.charts {
        let state = chart_state(widget, &config.view);
        match widget.render(&state, &config.disaggregation) {
            Ok((chart, scale)) => tracing::info!(
                "Chart '{}': {} periods, axis [{}]",
                widget.title,
                chart.periods.len(),
                tick_labels(&scale).join(", ")
            ),
            Err(e) => {
                tracing::warn!("Chart '{}' skipped: {}", widget.title, e);
                summary.failed += config.export.formats.len();
                continue;
            }
        }
        for &format in &config.export.formats {
            match widget.export(&state, format, &config.disaggregation, &options) {
                Ok(file) => deliver(sink, &file, &mut summary),
                Err(e) => {
                    tracing::warn!("Chart '{}' skipped: {}", widget.title, e);
                    summary.failed += 1;
                }
            }
        }
    }

    for widget in &dashboard.tables {
        let state = table_state(widget, &config.table);
        tracing::info!(
            "Table '{}': {} rows, {} pages, {} on the first",
            widget.title,
            widget.table.rows.len(),
            widget.page_count(&state),
            widget.page_rows(&state).len()
        );
        for &format in &config.export.formats {
            let file = widget.export(&state, format, &options);
            deliver(sink, &file, &mut summary);
        }
    }

    summary
}

fn deliver(sink: &dyn ExportSink, file: &ExportFile, summary: &mut RunSummary) {
    match sink.deliver(file) {
        Ok(_) => summary.delivered += 1,
        Err(e) => {
            tracing::warn!("Export '{}' not delivered: {:#}", file.filename, e);
            summary.failed += 1;
        }
    }
}
