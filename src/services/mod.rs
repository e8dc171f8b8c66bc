//! Extractors, one per mode.
//!
//! - `whats_new`: release notes articles
//! - `latest_versions`: documented versions and their status
//! - `download`: the PDF (A4) documentation archive
//! - `pep`: PEP status audit (`PepAuditor`)

mod download;
mod pep;
mod versions;
mod whats_new;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

pub use download::{download, select_archive_link};
pub use pep::{PepAuditor, PepRecord, PepReport, detail_status, index_records, pep, status_code};
pub use versions::{latest_versions, parse_version};
pub use whats_new::whats_new;

/// Progress bar over `len` pages, or a hidden one when disabled.
pub(crate) fn progress_bar(len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}]") {
        bar.set_style(style);
    }
    bar
}

/// Run `step` over `items`, advancing `progress` once per item.
///
/// The bar is cleared before returning, also when a step fails.
pub(crate) fn track<T>(
    progress: &ProgressBar,
    items: impl IntoIterator<Item = T>,
    mut step: impl FnMut(T) -> Result<()>,
) -> Result<()> {
    let outcome = items.into_iter().try_for_each(|item| {
        progress.inc(1);
        step(item)
    });
    progress.finish_and_clear();
    outcome
}
