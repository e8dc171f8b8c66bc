// src/services/versions.rs

//! Documentation versions and their support status, read from the sidebar.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{Config, ResultTable};
use crate::utils::html::{AttrFilter, attr, locate, locate_all, text};
use crate::utils::http::{Session, fetch_page};

pub const HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];

/// Split a link text such as `Python 3.11 (stable)` into version and status.
///
/// `pattern` must provide `version` and `status` groups. Text that does not
/// match (e.g. `in development`) is kept whole as the version with an empty
/// status.
pub fn parse_version(pattern: &Regex, link_text: &str) -> (String, String) {
    let groups = pattern
        .captures(link_text)
        .and_then(|caps| Some((caps.name("version")?, caps.name("status")?)));

    match groups {
        Some((version, status)) => (version.as_str().to_string(), status.as_str().to_string()),
        None => (link_text.to_string(), String::new()),
    }
}

/// Collect `(link, version, status)` for every documented Python version.
///
/// Fails when no sidebar list carries the versions marker: the page layout
/// has changed and nothing read from it can be trusted.
pub fn latest_versions(session: &dyn Session, config: &Config) -> Result<Option<ResultTable>> {
    let Some(page) = fetch_page(session, &config.urls.main_doc_url) else {
        return Ok(None);
    };

    let pages = &config.pages;
    let tags = &pages.tags;
    let sidebar = locate(
        page.root(),
        &tags.container,
        Some(AttrFilter::class(&pages.sidebar_class)),
    )?;
    let version_list = locate_all(sidebar, &tags.list, None)
        .into_iter()
        .find(|ul| text(*ul).contains(&pages.versions_marker))
        .ok_or_else(|| {
            AppError::page_structure(format!(
                "no sidebar list mentions '{}'",
                pages.versions_marker
            ))
        })?;

    let pattern = pages.version_regex()?;
    let mut table = ResultTable::new(HEADER);
    for anchor in locate_all(version_list, &tags.link, None) {
        let link = attr(anchor, "href")?;
        let (version, status) = parse_version(&pattern, &text(anchor));
        table.push([link.to_string(), version, status])?;
    }

    log::info!("Found {} documentation versions", table.len());
    Ok(Some(table))
}
