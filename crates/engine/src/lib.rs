//! Dashboard data pipeline: metric resolution, chronological and column
//! sorting, period disaggregation, column composition and export.
//!
//! Every operation is a pure function of its inputs. View state is passed in
//! and returned, never kept.

pub mod columns;
pub mod disaggregation;
pub mod error;
pub mod export;
pub mod format;
pub mod resolver;
pub mod sort;
pub mod view;

pub use error::{PipelineError, Result};
