// src/utils/html.rs

//! Parsed documents and tag lookup.
//!
//! Extractors never walk the tree ad hoc: they go through [`locate`], which
//! fails with [`AppError::TagNotFound`] at the first missing piece instead of
//! letting an absent node surface later as a confusing attribute error.

use std::fmt;

use scraper::{ElementRef, Html, node::Element};

use crate::error::{AppError, Result};

/// An immutable parsed page together with the URL it came from.
pub struct Document {
    url: String,
    html: Html,
}

impl Document {
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `<html>` element; every lookup starts here.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").field("url", &self.url).finish()
    }
}

/// Exact-match attribute condition, e.g. `id="numerical-index"`.
///
/// `class` compares against each whitespace-separated class of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrFilter<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> AttrFilter<'a> {
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }

    pub fn id(value: &'a str) -> Self {
        Self::new("id", value)
    }

    pub fn class(value: &'a str) -> Self {
        Self::new("class", value)
    }

    fn matches(&self, element: &Element) -> bool {
        if self.name == "class" {
            return element.classes().any(|c| c == self.value);
        }
        element.attr(self.name) == Some(self.value)
    }
}

impl fmt::Display for AttrFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.value)
    }
}

fn is_match(element: &ElementRef<'_>, tag: &str, filter: Option<AttrFilter<'_>>) -> bool {
    let value = element.value();
    value.name().eq_ignore_ascii_case(tag) && filter.is_none_or(|f| f.matches(value))
}

/// Descendant elements of `node` in document order, excluding `node` itself.
fn descendant_elements<'a>(node: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    node.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First descendant of `node` named `tag` that satisfies `filter`.
pub fn locate<'a>(
    node: ElementRef<'a>,
    tag: &str,
    filter: Option<AttrFilter<'_>>,
) -> Result<ElementRef<'a>> {
    descendant_elements(node)
        .find(|el| is_match(el, tag, filter))
        .ok_or_else(|| AppError::tag_not_found(tag, filter))
}

/// Every descendant of `node` named `tag` that satisfies `filter`.
pub fn locate_all<'a>(
    node: ElementRef<'a>,
    tag: &str,
    filter: Option<AttrFilter<'_>>,
) -> Vec<ElementRef<'a>> {
    descendant_elements(node)
        .filter(|el| is_match(el, tag, filter))
        .collect()
}

/// Value of a required attribute.
pub fn attr<'a>(node: ElementRef<'a>, name: &str) -> Result<&'a str> {
    node.value()
        .attr(name)
        .ok_or_else(|| AppError::missing_attribute(node.value().name(), name))
}

/// Concatenated text of the node and its descendants.
pub fn text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// Value of a `<dt>label</dt><dd>value</dd>` style field.
///
/// Finds the first text node that is exactly `label`, then reads the element
/// that immediately follows the label's element. Text that merely contains
/// the label, padding included, is not a match. PEP pages lay out their
/// header fields this way; if that layout changes, this is the function to
/// update.
pub fn labelled_value(node: ElementRef<'_>, label: &str) -> Result<String> {
    let term = node
        .descendants()
        .find(|n| n.value().as_text().is_some_and(|t| &**t == label))
        .and_then(|n| n.parent())
        .and_then(ElementRef::wrap)
        .ok_or_else(|| AppError::page_structure(format!("no field labelled '{label}'")))?;

    let value = term
        .next_siblings()
        .find_map(ElementRef::wrap)
        .ok_or_else(|| AppError::page_structure(format!("field '{label}' has no value")))?;

    Ok(text(value).trim().to_string())
}
