//! Widget-level composition of the pipeline.
//!
//! A widget owns its data (base chart or table plus the alternate datasets
//! and optional metrics). View state lives outside: actions turn one state
//! into the next, and rendering/export read the state without keeping it.

mod chart;
mod table;

pub use chart::{ChartAction, ChartWidget};
pub use table::{TableAction, TableWidget};
