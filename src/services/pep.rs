// src/services/pep.rs

//! PEP status audit.
//!
//! The numerical PEP index abbreviates every status to a single letter. Each
//! PEP's own page states the full status. The auditor reads both, counts the
//! full statuses and reports every PEP whose page disagrees with the index
//! according to the expectation table.

use url::Url;

use crate::error::Result;
use crate::models::{Config, Discrepancy, ExpectedStatusMap, PageConfig, ResultTable, StatusTally};
use crate::services::{progress_bar, track};
use crate::utils::html::{AttrFilter, Document, attr, labelled_value, locate, locate_all, text};
use crate::utils::http::{Session, fetch_page};
use crate::utils::resolve_url;

pub const HEADER: [&str; 2] = ["Status", "Count"];

/// One row of the numerical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepRecord {
    /// Status abbreviation, empty for drafts
    pub code: String,
    /// Absolute URL of the PEP page
    pub link: String,
}

/// Outcome of one audit run.
#[derive(Debug, Default)]
pub struct PepReport {
    pub tally: StatusTally,
    pub discrepancies: Vec<Discrepancy>,
    /// Rows in the index, audited or not
    pub total: usize,
}

impl PepReport {
    /// Number of PEP pages that were fetched and checked.
    pub fn audited(&self) -> usize {
        self.tally.total()
    }

    /// `(status, count)` rows in first-seen order, then `(Total, index rows)`.
    ///
    /// The total is the size of the index, so it exceeds the sum of the
    /// counts whenever a PEP page could not be fetched.
    pub fn to_table(&self) -> Result<ResultTable> {
        let mut table = ResultTable::new(HEADER);
        for (status, count) in self.tally.iter() {
            table.push([status.to_string(), count.to_string()])?;
        }
        table.push(["Total".to_string(), self.total.to_string()])?;
        Ok(table)
    }
}

/// Status abbreviation from the first index cell: its text minus the
/// leading type letter.
pub fn status_code(cell_text: &str) -> String {
    cell_text.trim().chars().skip(1).collect()
}

/// Full status as printed in the header fields of a PEP page.
pub fn detail_status(page: &Document, label: &str) -> Result<String> {
    labelled_value(page.root(), label)
}

/// Every row of the numerical index section.
pub fn index_records(index: &Document, pages: &PageConfig) -> Result<Vec<PepRecord>> {
    let tags = &pages.tags;
    let section = locate(
        index.root(),
        &tags.section,
        Some(AttrFilter::id(&pages.pep_index_section_id)),
    )?;
    let body = locate(section, &tags.table_body, None)?;
    let base = Url::parse(index.url())?;

    locate_all(body, &tags.row, None)
        .into_iter()
        .map(|row| -> Result<PepRecord> {
            let code = status_code(&text(locate(row, &tags.cell, None)?));
            let link = resolve_url(&base, attr(locate(row, &tags.link, None)?, "href")?);
            Ok(PepRecord { code, link })
        })
        .collect()
}

/// Cross-checks index abbreviations against PEP pages.
pub struct PepAuditor<'a> {
    session: &'a dyn Session,
    expected: &'a ExpectedStatusMap,
    pages: &'a PageConfig,
    show_progress: bool,
}

impl<'a> PepAuditor<'a> {
    pub fn new(
        session: &'a dyn Session,
        expected: &'a ExpectedStatusMap,
        pages: &'a PageConfig,
    ) -> Self {
        Self {
            session,
            expected,
            pages,
            show_progress: false,
        }
    }

    pub fn from_config(session: &'a dyn Session, config: &'a Config) -> Self {
        Self::new(session, &config.expected_status, &config.pages)
            .with_progress(config.output.show_progress)
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Audit every PEP listed on the index at `index_url`.
    ///
    /// Returns `None` if the index cannot be fetched. Unreachable PEP pages
    /// are left out of the tally. A status code missing from the expectation
    /// table aborts the audit.
    pub fn audit(&self, index_url: &str) -> Result<Option<PepReport>> {
        let Some(index) = fetch_page(self.session, index_url) else {
            return Ok(None);
        };
        let records = index_records(&index, self.pages)?;
        log::info!("PEP index lists {} entries", records.len());

        let mut report = PepReport {
            total: records.len(),
            ..PepReport::default()
        };
        let progress = progress_bar(records.len(), self.show_progress);
        track(&progress, &records, |record| self.check(record, &mut report))?;

        log::info!(
            "Audited {} of {} PEPs, {} mismatched",
            report.audited(),
            report.total,
            report.discrepancies.len()
        );
        Ok(Some(report))
    }

    fn check(&self, record: &PepRecord, report: &mut PepReport) -> Result<()> {
        let Some(page) = fetch_page(self.session, &record.link) else {
            return Ok(());
        };
        let status = detail_status(&page, &self.pages.status_label)?;
        report.tally.increment(&status);

        let expected = self.expected.expected(&record.code)?;
        if !expected.contains(&status) {
            let discrepancy = Discrepancy {
                link: record.link.clone(),
                observed: status,
                expected: expected.to_vec(),
            };
            log::warn!("{}", discrepancy);
            report.discrepancies.push(discrepancy);
        }
        Ok(())
    }
}

/// The `pep` mode: status histogram of the PEP index.
pub fn pep(session: &dyn Session, config: &Config) -> Result<Option<ResultTable>> {
    match PepAuditor::from_config(session, config).audit(&config.urls.pep_url)? {
        Some(report) => Ok(Some(report.to_table()?)),
        None => Ok(None),
    }
}
