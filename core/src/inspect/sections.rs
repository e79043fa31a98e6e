//! # Section Vocabulary
//!
//! The field names that mark a field of a request structure as a section.

use super::record::OPERATION_SECTION;

/// Section names recognized when no other vocabulary is configured.
pub const DEFAULT_SECTIONS: [&str; 5] = ["Path", "Query", "Header", "Body", "Response"];

/// An ordered, case-sensitive set of recognized section names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSet {
    names: Vec<String>,
}

impl SectionSet {
    /// Builds a vocabulary from the given names. Duplicates are dropped.
    ///
    /// [`OPERATION_SECTION`] is reserved for operation-level records and is
    /// never recognized as a section name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if name != OPERATION_SECTION && !out.contains(&name) {
                out.push(name);
            }
        }
        SectionSet { names: out }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The configured names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for SectionSet {
    fn default() -> Self {
        SectionSet::new(DEFAULT_SECTIONS)
    }
}
