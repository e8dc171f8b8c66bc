// src/services/download.rs

//! Documentation archive download (PDF, A4 paper).

use regex::Regex;
use scraper::ElementRef;

use crate::error::{AppError, Result};
use crate::models::{Config, PageConfig, ResultTable};
use crate::storage::LocalStorage;
use crate::utils::html::{AttrFilter, locate, locate_all, text};
use crate::utils::http::{Session, fetch_bytes, fetch_page};
use crate::utils::{file_name, resolve};

/// Href of the last link in `table` whose target matches `pattern` and whose
/// text contains the configured download link text.
pub fn select_archive_link<'a>(
    table: ElementRef<'a>,
    pages: &PageConfig,
    pattern: &Regex,
) -> Option<&'a str> {
    locate_all(table, &pages.tags.link, None)
        .into_iter()
        .filter(|anchor| text(*anchor).contains(&pages.download_link_text))
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| pattern.is_match(href))
        .last()
}

/// Save the archive into the downloads directory.
///
/// Produces no table; the saved path is logged.
pub fn download(session: &dyn Session, config: &Config) -> Result<Option<ResultTable>> {
    let downloads_url = config.urls.download_url()?;
    let Some(page) = fetch_page(session, &downloads_url) else {
        return Ok(None);
    };

    let pages = &config.pages;
    let table = locate(
        page.root(),
        &pages.tags.table,
        Some(AttrFilter::class(&pages.download_table_class)),
    )?;
    let href = select_archive_link(table, pages, &pages.archive_regex()?).ok_or_else(|| {
        AppError::tag_not_found(
            &pages.tags.link,
            Some(format!("href~\"{}\"", pages.archive_pattern)),
        )
    })?;

    let archive_url = resolve(&downloads_url, href)?;
    let name = file_name(&archive_url).ok_or_else(|| {
        AppError::page_structure(format!("archive link {archive_url} has no file name"))
    })?;

    let Some(bytes) = fetch_bytes(session, &archive_url) else {
        return Ok(None);
    };
    let path = LocalStorage::new(&config.paths.downloads_dir).write_bytes(&name, &bytes)?;
    log::info!("Archive downloaded and saved: {}", path.display());

    Ok(None)
}
