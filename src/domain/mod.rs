//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - normalized observations and yearly records (`DataPoint`, `YearlySeries`)
//! - asset identifiers and generation profiles (`AssetClass`, `AssetProfile`)
//! - caller selections (`YearSelection`, `IntervalRange`)
//! - session configuration (`SessionConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
