//! Shared data model for the dashboard pipeline.
//!
//! Everything here is plain serde data: charts, tables, metric descriptors,
//! explicit view state and export files. Behaviour lives in the `engine` crate.

pub mod shared;
