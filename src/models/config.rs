//! Application configuration structures.
//!
//! Every assumption about the shape of the documentation pages lives here,
//! so a site redesign means editing `config.toml`, not the extractors.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ExpectedStatusMap;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// On-disk response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Site entry points
    #[serde(default)]
    pub urls: UrlConfig,

    /// Page structure constants
    #[serde(default)]
    pub pages: PageConfig,

    /// Output directories
    #[serde(default)]
    pub paths: PathsConfig,

    /// Console output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Summary status code to acceptable detail statuses
    #[serde(default = "defaults::expected_status")]
    pub expected_status: ExpectedStatusMap,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.cache.enabled && self.cache.dir.as_os_str().is_empty() {
            return Err(AppError::validation("cache.dir is empty"));
        }
        if self.cache.expire_after_secs == Some(0) {
            return Err(AppError::validation("cache.expire_after_secs must be > 0"));
        }

        self.urls.whats_new_url()?;
        self.urls.download_url()?;
        Url::parse(&self.urls.pep_url)?;

        let version_pattern = self.pages.version_regex()?;
        for group in ["version", "status"] {
            if !version_pattern.capture_names().flatten().any(|n| n == group) {
                return Err(AppError::validation(format!(
                    "pages.version_pattern must define a '{group}' group"
                )));
            }
        }
        self.pages.archive_regex()?;
        if let Some((role, _)) = self
            .pages
            .tags
            .entries()
            .into_iter()
            .find(|(_, tag)| tag.trim().is_empty())
        {
            return Err(AppError::validation(format!("pages.tags.{role} is empty")));
        }

        if self.expected_status.is_empty() {
            return Err(AppError::validation("expected_status table is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            cache: CacheConfig::default(),
            urls: UrlConfig::default(),
            pages: PageConfig::default(),
            paths: PathsConfig::default(),
            output: OutputConfig::default(),
            expected_status: defaults::expected_status(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve repeated requests from disk
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Cache directory
    #[serde(default = "defaults::cache_dir")]
    pub dir: PathBuf,

    /// Entries older than this are refetched; never expire when unset
    #[serde(default)]
    pub expire_after_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            dir: defaults::cache_dir(),
            expire_after_secs: None,
        }
    }
}

/// Site entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Documentation root
    #[serde(default = "defaults::main_doc_url")]
    pub main_doc_url: String,

    /// PEP index
    #[serde(default = "defaults::pep_url")]
    pub pep_url: String,

    /// "What's new" index, relative to the documentation root
    #[serde(default = "defaults::whats_new_path")]
    pub whats_new_path: String,

    /// Downloads page, relative to the documentation root
    #[serde(default = "defaults::download_path")]
    pub download_path: String,
}

impl UrlConfig {
    pub fn whats_new_url(&self) -> Result<String> {
        Ok(Url::parse(&self.main_doc_url)?
            .join(&self.whats_new_path)?
            .to_string())
    }

    pub fn download_url(&self) -> Result<String> {
        Ok(Url::parse(&self.main_doc_url)?
            .join(&self.download_path)?
            .to_string())
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            main_doc_url: defaults::main_doc_url(),
            pep_url: defaults::pep_url(),
            whats_new_path: defaults::whats_new_path(),
            download_path: defaults::download_path(),
        }
    }
}

/// Tag, class, id and text constants describing the scraped pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "defaults::whats_new_section_id")]
    pub whats_new_section_id: String,
    #[serde(default = "defaults::toctree_class")]
    pub toctree_class: String,
    #[serde(default = "defaults::toctree_item_class")]
    pub toctree_item_class: String,
    /// Decoration stripped from release note titles
    #[serde(default = "defaults::heading_marker")]
    pub heading_marker: String,

    #[serde(default = "defaults::sidebar_class")]
    pub sidebar_class: String,
    /// Text identifying the version list inside the sidebar
    #[serde(default = "defaults::versions_marker")]
    pub versions_marker: String,
    /// Must define `version` and `status` named groups
    #[serde(default = "defaults::version_pattern")]
    pub version_pattern: String,

    #[serde(default = "defaults::download_table_class")]
    pub download_table_class: String,
    /// Matched against the href of archive links
    #[serde(default = "defaults::archive_pattern")]
    pub archive_pattern: String,
    #[serde(default = "defaults::download_link_text")]
    pub download_link_text: String,

    #[serde(default = "defaults::pep_index_section_id")]
    pub pep_index_section_id: String,
    /// Definition term preceding the status on a PEP page
    #[serde(default = "defaults::status_label")]
    pub status_label: String,

    /// Element names the extractors walk through
    #[serde(default)]
    pub tags: TagConfig,
}

impl PageConfig {
    pub fn version_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.version_pattern)?)
    }

    pub fn archive_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.archive_pattern)?)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            whats_new_section_id: defaults::whats_new_section_id(),
            toctree_class: defaults::toctree_class(),
            toctree_item_class: defaults::toctree_item_class(),
            heading_marker: defaults::heading_marker(),
            sidebar_class: defaults::sidebar_class(),
            versions_marker: defaults::versions_marker(),
            version_pattern: defaults::version_pattern(),
            download_table_class: defaults::download_table_class(),
            archive_pattern: defaults::archive_pattern(),
            download_link_text: defaults::download_link_text(),
            pep_index_section_id: defaults::pep_index_section_id(),
            status_label: defaults::status_label(),
            tags: TagConfig::default(),
        }
    }
}

/// Element names of the scraped pages, keyed by the role they play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    /// Section holding an index (release notes, numerical PEP index)
    #[serde(default = "defaults::section_tag")]
    pub section: String,
    /// Table of contents wrapper and sidebar
    #[serde(default = "defaults::container_tag")]
    pub container: String,
    #[serde(default = "defaults::list_tag")]
    pub list: String,
    #[serde(default = "defaults::list_item_tag")]
    pub list_item: String,
    #[serde(default = "defaults::link_tag")]
    pub link: String,
    /// Release notes title
    #[serde(default = "defaults::heading_tag")]
    pub heading: String,
    /// Release notes editor/author block
    #[serde(default = "defaults::field_list_tag")]
    pub field_list: String,
    #[serde(default = "defaults::table_tag")]
    pub table: String,
    #[serde(default = "defaults::table_body_tag")]
    pub table_body: String,
    #[serde(default = "defaults::row_tag")]
    pub row: String,
    #[serde(default = "defaults::cell_tag")]
    pub cell: String,
}

impl TagConfig {
    fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("section", self.section.as_str()),
            ("container", self.container.as_str()),
            ("list", self.list.as_str()),
            ("list_item", self.list_item.as_str()),
            ("link", self.link.as_str()),
            ("heading", self.heading.as_str()),
            ("field_list", self.field_list.as_str()),
            ("table", self.table.as_str()),
            ("table_body", self.table_body.as_str()),
            ("row", self.row.as_str()),
            ("cell", self.cell.as_str()),
        ]
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            section: defaults::section_tag(),
            container: defaults::container_tag(),
            list: defaults::list_tag(),
            list_item: defaults::list_item_tag(),
            link: defaults::link_tag(),
            heading: defaults::heading_tag(),
            field_list: defaults::field_list_tag(),
            table: defaults::table_tag(),
            table_body: defaults::table_body_tag(),
            row: defaults::row_tag(),
            cell: defaults::cell_tag(),
        }
    }
}

/// Output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where downloaded archives are stored
    #[serde(default = "defaults::downloads_dir")]
    pub downloads_dir: PathBuf,

    /// Where CSV results are stored
    #[serde(default = "defaults::results_dir")]
    pub results_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            downloads_dir: defaults::downloads_dir(),
            results_dir: defaults::results_dir(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Draw progress bars for multi-page modes
    #[serde(default = "defaults::enabled")]
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: defaults::enabled(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::ExpectedStatusMap;

    pub fn enabled() -> bool {
        true
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; docs-parser/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn cache_dir() -> PathBuf {
        PathBuf::from(".http_cache")
    }

    // Site defaults
    pub fn main_doc_url() -> String {
        "https://docs.python.org/3/".into()
    }
    pub fn pep_url() -> String {
        "https://peps.python.org/".into()
    }
    pub fn whats_new_path() -> String {
        "whatsnew/".into()
    }
    pub fn download_path() -> String {
        "download.html".into()
    }

    // Page structure defaults
    pub fn whats_new_section_id() -> String {
        "what-s-new-in-python".into()
    }
    pub fn toctree_class() -> String {
        "toctree-wrapper".into()
    }
    pub fn toctree_item_class() -> String {
        "toctree-l1".into()
    }
    pub fn heading_marker() -> String {
        "\u{b6}".into()
    }
    pub fn sidebar_class() -> String {
        "sphinxsidebarwrapper".into()
    }
    pub fn versions_marker() -> String {
        "All versions".into()
    }
    pub fn version_pattern() -> String {
        r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)".into()
    }
    pub fn download_table_class() -> String {
        "docutils".into()
    }
    pub fn archive_pattern() -> String {
        r".+pdf-a4\.zip$".into()
    }
    pub fn download_link_text() -> String {
        "Download".into()
    }
    pub fn pep_index_section_id() -> String {
        "numerical-index".into()
    }
    pub fn status_label() -> String {
        "Status".into()
    }

    // Element names
    pub fn section_tag() -> String {
        "section".into()
    }
    pub fn container_tag() -> String {
        "div".into()
    }
    pub fn list_tag() -> String {
        "ul".into()
    }
    pub fn list_item_tag() -> String {
        "li".into()
    }
    pub fn link_tag() -> String {
        "a".into()
    }
    pub fn heading_tag() -> String {
        "h1".into()
    }
    pub fn field_list_tag() -> String {
        "dl".into()
    }
    pub fn table_tag() -> String {
        "table".into()
    }
    pub fn table_body_tag() -> String {
        "tbody".into()
    }
    pub fn row_tag() -> String {
        "tr".into()
    }
    pub fn cell_tag() -> String {
        "td".into()
    }

    // Output defaults
    pub fn downloads_dir() -> PathBuf {
        PathBuf::from("downloads")
    }
    pub fn results_dir() -> PathBuf {
        PathBuf::from("results")
    }

    // Expectation table defaults
    pub fn expected_status() -> ExpectedStatusMap {
        ExpectedStatusMap::from_pairs([
            ("A", &["Active", "Accepted"][..]),
            ("D", &["Deferred"][..]),
            ("F", &["Final"][..]),
            ("P", &["Provisional"][..]),
            ("R", &["Rejected"][..]),
            ("S", &["Superseded"][..]),
            ("W", &["Withdrawn"][..]),
            ("", &["Draft", "Active"][..]),
        ])
    }
}
