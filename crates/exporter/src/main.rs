pub mod dashboard;
pub mod shared;
pub mod system;

use std::path::PathBuf;

use shared::config::{load_config, resolve_output_dir};
use shared::download::DirectorySink;

fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    // Необязательный путь к config.toml первым аргументом
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let dashboard = dashboard::load_configured_dashboard(&config.input.dashboard)?;

    let sink = DirectorySink::new(resolve_output_dir(&config.export.output_dir))?;
    tracing::info!("Export directory: {}", sink.dir().display());

    let summary = dashboard::run(&dashboard, &config, &sink);
    if summary.failed > 0 {
        tracing::warn!(
            "Export finished with errors: {} delivered, {} failed",
            summary.delivered,
            summary.failed
        );
    } else {
        tracing::info!("Export finished: {} files", summary.delivered);
    }

    Ok(())
}
