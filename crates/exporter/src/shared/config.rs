use anyhow::Context;
use contracts::shared::export::ExportFormat;
use contracts::shared::view_state::{Granularity, SortDirection};
use engine::disaggregation::DisaggregationParams;
use engine::export::DelimitedOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub disaggregation: DisaggregationParams,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Dashboard JSON file
    pub dashboard: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    pub delimiter: char,
    pub include_bom: bool,
    pub formats: Vec<ExportFormat>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "target/exports".to_string(),
            delimiter: ',',
            include_bom: false,
            formats: vec![ExportFormat::DelimitedText],
        }
    }
}

impl ExportConfig {
    pub fn delimited_options(&self) -> DelimitedOptions {
        DelimitedOptions {
            delimiter: self.delimiter,
            include_bom: self.include_bom,
        }
    }
}

/// Initial chart view applied to every chart widget
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ViewConfig {
    pub granularity: Granularity,
    pub period_order: Option<SortDirection>,
    /// Metric to select where the widget offers it
    pub metric: Option<String>,
}

/// Initial table view applied to every table widget
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TableConfig {
    pub sort_column: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub rows_per_page: Option<usize>,
}

/// Dashboard path of the embedded default config. When it does not exist,
/// the sample dashboard built into the binary is used.
pub const DEFAULT_DASHBOARD: &str = "data/sample_dashboard.json";

/// Default configuration embedded in the binary
pub(crate) const DEFAULT_CONFIG: &str = r#"
[input]
dashboard = "data/sample_dashboard.json"

[export]
output_dir = "target/exports"
delimiter = ","
include_bom = false
formats = ["delimited_text", "spreadsheet_markup"]

[view]
granularity = "period"
period_order = "ascending"

[table]
sort_column = "visits"
sort_direction = "descending"
rows_per_page = 10
"#;

/// Load configuration
///
/// Search order:
/// 1. Explicit path (first command line argument)
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    // Try to find config.toml next to the executable
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return read_config(&config_path);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Resolves a configured path.
///
/// Absolute paths are used as is. Relative paths resolve against the
/// executable directory when the target exists there, otherwise against the
/// current directory.
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    // If absolute path, use as is
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Some(exe_dir) = exe_dir() {
        let resolved = exe_dir.join(path);
        if resolved.exists() {
            return resolved;
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(configured)
}

/// Output directory: same rules as [`resolve_path`], but the directory does
/// not need to exist yet, so relative paths always sit next to the executable
pub fn resolve_output_dir(configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match exe_dir() {
        Some(dir) => dir.join(path),
        None => PathBuf::from(configured),
    }
}
