//! Pipeline entry points.
//!
//! - `run_mode`: run one extractor and return its table
//! - `control_output`: hand the table to the selected output sink

pub mod output;
pub mod run;

pub use output::{OutputFormat, control_output};
pub use run::{Mode, run_mode};
