pub mod chart;
pub mod export;
pub mod metrics;
pub mod table;
pub mod view_state;
