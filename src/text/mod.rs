pub mod metrics;
pub mod wrap;
