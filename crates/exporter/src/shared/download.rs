//! Download boundary: where finished export files are handed over

use anyhow::Context;
use contracts::shared::export::ExportFile;
use std::path::{Path, PathBuf};

/// Receiver of finished export files
pub trait ExportSink {
    fn deliver(&self, file: &ExportFile) -> anyhow::Result<PathBuf>;
}

/// Writes every export as `<dir>/<filename>`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create export directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, file: &ExportFile) -> anyhow::Result<PathBuf> {
        let path = self.dir.join(safe_file_name(&file.filename));
        std::fs::write(&path, file.content.as_bytes())
            .with_context(|| format!("Cannot write export {}", path.display()))?;
        tracing::info!("Export saved: {} ({})", path.display(), file.mime_type);
        Ok(path)
    }
}

/// Titles come from dashboard data; keep the file inside the sink directory
fn safe_file_name(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> ExportFile {
        ExportFile {
            filename: name.to_string(),
            mime_type: "text/csv;charset=utf-8;".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path().join("exports")).unwrap();

        let path = sink.deliver(&file("Canales_export.csv", "Canal\nGoogle")).unwrap();
        assert_eq!(path, tmp.path().join("exports").join("Canales_export.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Canal\nGoogle");
    }

    #[test]
    fn test_path_separators_in_title_stay_inside_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path()).unwrap();

        let path = sink.deliver(&file("../Ventas/2023_data.csv", "x")).unwrap();
        assert_eq!(path.parent(), Some(sink.dir()));
        assert_eq!(path.file_name().unwrap(), ".._Ventas_2023_data.csv");
    }
}
