//! PEP status bookkeeping: the expectation table and the per-run tally.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Summary-page status code to the detail-page statuses consistent with it.
///
/// The PEP index abbreviates a status to one letter (`A`, `F`, ...); drafts
/// carry no letter at all and map from the empty code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedStatusMap(BTreeMap<String, Vec<String>>);

impl ExpectedStatusMap {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(code, statuses)| {
                    (
                        code.to_string(),
                        statuses.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    /// Acceptable statuses for `code`.
    ///
    /// A code missing from the table means the table no longer describes the
    /// site, so this fails instead of guessing.
    pub fn expected(&self, code: &str) -> Result<&[String]> {
        self.0
            .get(code)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::UnknownStatusCode(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Occurrence count per detail-page status, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, status: &str) {
        match self.index.get(status) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(status.to_string(), self.counts.len());
                self.counts.push((status.to_string(), 1));
            }
        }
    }

    pub fn get(&self, status: &str) -> usize {
        self.index
            .get(status)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    /// Sum of all counts, i.e. the number of audited detail pages.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(status, count)| (status.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Detail-page status that disagrees with the index abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub link: String,
    pub observed: String,
    pub expected: Vec<String>,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatched statuses:\n{}\nStatus on PEP page: {}\nExpected statuses: {:?}",
            self.link, self.observed, self.expected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_known_and_unknown_codes() {
        let table = ExpectedStatusMap::from_pairs([
            ("F", &["Final"][..]),
            ("", &["Draft", "Active"][..]),
        ]);

        assert_eq!(table.expected("F").unwrap(), ["Final".to_string()]);
        assert_eq!(table.expected("").unwrap().len(), 2);
        assert!(matches!(
            table.expected("Z"),
            Err(AppError::UnknownStatusCode(code)) if code == "Z"
        ));
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let mut tally = StatusTally::new();
        for status in ["Final", "Draft", "Final", "Active", "Draft", "Final"] {
            tally.increment(status);
        }

        let entries: Vec<_> = tally.iter().collect();
        assert_eq!(entries, [("Final", 3), ("Draft", 2), ("Active", 1)]);
        assert_eq!(tally.total(), 6);
        assert_eq!(tally.get("Rejected"), 0);
    }

    #[test]
    fn test_expectation_table_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            expected_status: ExpectedStatusMap,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [expected_status]
            A = ["Active", "Accepted"]
            "" = ["Draft", "Active"]
            "#,
        )
        .unwrap();

        assert_eq!(wrapper.expected_status.len(), 2);
        assert_eq!(
            wrapper.expected_status.expected("").unwrap(),
            ["Draft".to_string(), "Active".to_string()]
        );
    }

    #[test]
    fn test_discrepancy_display_names_everything() {
        let d = Discrepancy {
            link: "https://peps.python.org/pep-0001/".into(),
            observed: "Active".into(),
            expected: vec!["Draft".into(), "Final".into()],
        };
        let text = d.to_string();
        assert!(text.contains("pep-0001"));
        assert!(text.contains("Active"));
        assert!(text.contains("\"Draft\", \"Final\""));
    }
}
