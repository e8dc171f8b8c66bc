#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use docs_parser::error::{AppError, Result};
use docs_parser::models::Config;
use docs_parser::utils::http::{Response, Session};

pub const DOC_ROOT: &str = "https://docs.python.org/3/";
pub const WHATS_NEW: &str = "https://docs.python.org/3/whatsnew/";
pub const DOWNLOADS: &str = "https://docs.python.org/3/download.html";
pub const PEP_INDEX: &str = "https://peps.python.org/";

/// In-memory session. Unknown URLs behave like a refused connection.
#[derive(Default)]
pub struct FakeSession {
    pages: HashMap<String, (u16, Vec<u8>)>,
    requests: RefCell<Vec<String>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: impl Into<String>) -> Self {
        self.bytes(url, html.into().into_bytes())
    }

    pub fn bytes(mut self, url: &str, body: Vec<u8>) -> Self {
        self.pages.insert(url.to_string(), (200, body));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), (status, Vec::new()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Session for FakeSession {
    fn get(&self, url: &str) -> Result<Response> {
        self.requests.borrow_mut().push(url.to_string());
        let (status, body) = self.pages.get(url).cloned().ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("no route to {url}"),
            ))
        })?;
        Ok(Response {
            url: url.to_string(),
            status,
            body,
            from_cache: false,
        })
    }
}

/// Default configuration without progress bars.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.output.show_progress = false;
    config.cache.enabled = false;
    config
}

/// Numerical index with one row per `(status cell, href)`.
pub fn pep_index(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(cell, href)| {
            format!(
                r#"<tr class="row-odd"><td><abbr title="status">{cell}</abbr></td>
                   <td><a class="pep reference internal" href="{href}">{href}</a></td>
                   <td>Some title</td></tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
             <section id="index-by-category"><table><tbody>
               <tr><td>XX</td><td><a href="pep-9999/">decoy</a></td></tr>
             </tbody></table></section>
             <section id="numerical-index"><h2>Numerical Index</h2>
               <table class="pep-zero-table docutils align-default">
                 <thead><tr><th>Type</th><th>PEP</th><th>Title</th></tr></thead>
                 <tbody>{body}</tbody>
               </table>
             </section>
           </body></html>"#
    )
}

/// A PEP page whose header fields declare `status`.
pub fn pep_page(status: &str) -> String {
    format!(
        r#"<html><body><article>
             <h1 class="page-title">PEP 1 – Purpose</h1>
             <dl class="rfc2822 field-list simple">
               <dt class="field-odd">Author<span class="colon">:</span></dt>
               <dd class="field-odd">Someone</dd>
               <dt class="field-even">Status<span class="colon">:</span></dt>
               <dd class="field-even"><abbr title="Proposal">{status}</abbr></dd>
               <dt class="field-odd">Type<span class="colon">:</span></dt>
               <dd class="field-odd">Process</dd>
             </dl>
           </article></body></html>"#
    )
}
