// src/models/mod.rs

//! Domain models for the documentation parser.

mod config;
mod status;
mod table;

// Re-export all public types
pub use config::{
    CacheConfig, Config, HttpConfig, OutputConfig, PageConfig, PathsConfig, TagConfig,
    UrlConfig,
};
pub use status::{Discrepancy, ExpectedStatusMap, StatusTally};
pub use table::ResultTable;
