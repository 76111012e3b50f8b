//! `yearly-series` library crate.
//!
//! Normalizes index/commodity price data into per-year series with derived
//! statistics, for charting and cross-year comparison:
//!
//! - raw `date,value` text is split (`io::parse`) and grouped by year (`io::ingest`)
//! - when no usable external data exists, series are simulated (`data::sample`)
//! - `data::repository` picks the source and always returns something usable
//! - `report` restricts series to a month interval and summarizes them
//!
//! Presentation is left to the caller; `app::Session` is the entry point.

pub mod app;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
