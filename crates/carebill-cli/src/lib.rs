//! CLI library components for the billing engine.

pub mod logging;
pub mod pipeline;
pub mod types;
