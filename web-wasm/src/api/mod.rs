//! 外部API

pub mod analytics;
pub mod stats;
