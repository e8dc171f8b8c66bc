// src/services/whats_new.rs

//! Release notes: one row per "What's New in Python X.Y" article.

use url::Url;

use crate::error::Result;
use crate::models::{Config, PageConfig, ResultTable};
use crate::services::{progress_bar, track};
use crate::utils::html::{AttrFilter, Document, attr, locate, locate_all, text};
use crate::utils::http::{Session, fetch_page};
use crate::utils::resolve_url;

pub const HEADER: [&str; 3] = ["Article link", "Title", "Editor, author"];

/// Collect `(link, title, editors)` for every release notes article.
///
/// Returns `None` when the index itself cannot be fetched. Articles that
/// fail to load are skipped.
pub fn whats_new(session: &dyn Session, config: &Config) -> Result<Option<ResultTable>> {
    let index_url = config.urls.whats_new_url()?;
    let Some(index) = fetch_page(session, &index_url) else {
        return Ok(None);
    };

    let pages = &config.pages;
    let tags = &pages.tags;
    let section = locate(
        index.root(),
        &tags.section,
        Some(AttrFilter::id(&pages.whats_new_section_id)),
    )?;
    let wrapper = locate(
        section,
        &tags.container,
        Some(AttrFilter::class(&pages.toctree_class)),
    )?;
    let items = locate_all(
        wrapper,
        &tags.list_item,
        Some(AttrFilter::class(&pages.toctree_item_class)),
    );

    let base = Url::parse(&index_url)?;
    let mut table = ResultTable::new(HEADER);
    let progress = progress_bar(items.len(), config.output.show_progress);

    track(&progress, items, |item| {
        let anchor = locate(item, &tags.link, None)?;
        let link = resolve_url(&base, attr(anchor, "href")?);

        let Some(article) = fetch_page(session, &link) else {
            return Ok(());
        };
        let (title, editors) = article_summary(&article, pages)?;
        table.push([link, title, editors])
    })?;

    log::info!("Collected {} release notes", table.len());
    Ok(Some(table))
}

/// Heading without its permalink marker, and the editor/author block.
fn article_summary(article: &Document, pages: &PageConfig) -> Result<(String, String)> {
    let heading = locate(article.root(), &pages.tags.heading, None)?;
    let editors = locate(article.root(), &pages.tags.field_list, None)?;
    Ok((
        text(heading).replace(&pages.heading_marker, ""),
        text(editors).replace('\n', " "),
    ))
}
