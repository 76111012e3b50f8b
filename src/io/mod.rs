//! Input/output helpers.
//!
//! - raw delimited-text splitting (`parse`)
//! - row normalization into yearly series (`ingest`)
//! - CSV/JSON exports (`export`)

pub mod export;
pub mod ingest;
pub mod parse;

pub use export::*;
pub use ingest::*;
pub use parse::*;
