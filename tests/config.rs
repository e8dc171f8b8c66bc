use std::path::Path;

use docs_parser::models::Config;

fn shipped_config() -> Config {
    Config::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml")).unwrap()
}

#[test]
fn shipped_config_is_valid() {
    assert!(shipped_config().validate().is_ok());
}

#[test]
fn shipped_config_matches_defaults() {
    let shipped = shipped_config();
    let defaults = Config::default();

    assert_eq!(shipped.expected_status, defaults.expected_status);
    assert_eq!(shipped.urls.main_doc_url, defaults.urls.main_doc_url);
    assert_eq!(shipped.urls.pep_url, defaults.urls.pep_url);
    assert_eq!(shipped.pages.version_pattern, defaults.pages.version_pattern);
    assert_eq!(shipped.pages.archive_pattern, defaults.pages.archive_pattern);
    assert_eq!(shipped.pages.heading_marker, defaults.pages.heading_marker);
    assert_eq!(shipped.pages.tags.section, defaults.pages.tags.section);
    assert_eq!(shipped.pages.tags.container, defaults.pages.tags.container);
    assert_eq!(shipped.pages.tags.table_body, defaults.pages.tags.table_body);
    assert_eq!(shipped.pages.tags.cell, defaults.pages.tags.cell);
    assert_eq!(shipped.cache.dir, defaults.cache.dir);
    assert_eq!(shipped.cache.expire_after_secs, None);
}

#[test]
fn drafts_map_from_empty_code() {
    let config = shipped_config();
    let drafts = config.expected_status.expected("").unwrap();
    assert!(drafts.iter().any(|s| s == "Draft"));
}
