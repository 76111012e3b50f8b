//! Data sourcing: synthetic generation, external sources and the repository
//! that chooses between them.

pub mod regimes;
pub mod registry;
pub mod repository;
pub mod sample;
pub mod source;

pub use registry::AssetRegistry;
pub use repository::{Resolution, SeriesOrigin, SeriesRepository};
pub use sample::{generate, generate_with_rng};
pub use source::{FileSource, HttpSource, SeriesSource};
