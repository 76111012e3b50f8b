//! Reporting: interval filtering, cross-year statistics and text summaries.

pub mod format;
pub mod interval;
pub mod stats;

pub use format::*;
pub use interval::*;
pub use stats::*;
