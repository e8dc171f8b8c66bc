// src/pipeline/run.rs

//! Mode selection and dispatch.

use std::fmt;

use crate::error::Result;
use crate::models::{Config, ResultTable};
use crate::services;
use crate::utils::http::Session;

/// Top-level operation chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Mode {
    /// Release notes for every Python version
    WhatsNew,
    /// Documented versions and their status
    LatestVersions,
    /// Download the PDF (A4) documentation archive
    Download,
    /// Audit PEP statuses against the PEP index
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run one mode. `None` means there is nothing to hand to the output sink.
pub fn run_mode(mode: Mode, session: &dyn Session, config: &Config) -> Result<Option<ResultTable>> {
    log::debug!("Running mode {}", mode);
    match mode {
        Mode::WhatsNew => services::whats_new(session, config),
        Mode::LatestVersions => services::latest_versions(session, config),
        Mode::Download => services::download(session, config),
        Mode::Pep => services::pep(session, config),
    }
}
