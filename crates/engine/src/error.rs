use contracts::shared::chart::SeriesLengthMismatch;
use thiserror::Error;

/// Ошибки конвейера преобразования данных
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed period label: {0:?}")]
    MalformedLabel(String),

    #[error("Series '{series}' has {actual} values, expected {expected}")]
    MisalignedSeries {
        series: String,
        expected: usize,
        actual: usize,
    },
}

impl From<SeriesLengthMismatch> for PipelineError {
    fn from(m: SeriesLengthMismatch) -> Self {
        PipelineError::MisalignedSeries {
            series: m.series,
            expected: m.expected,
            actual: m.actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
