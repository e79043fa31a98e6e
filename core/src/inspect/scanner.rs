//! # Declaration Scanner
//!
//! Walks the top-level declarations of a file and turns every annotated
//! element of every request structure into a [`ReportRecord`].

use super::record::{location, ReportRecord};
use super::sections::SectionSet;
use super::structure::{inspect_structure, Site};
use crate::annotation::{CommentParser, YamlCommentParser};
use crate::error::{AppError, AppResult};
use crate::tree::{Decl, SourceTree, TypeShape};
use tracing::{trace, warn};

/// Entry point of the traversal, holding the comment parser and the section vocabulary.
///
/// # Examples
/// ```
/// use cdd_inspect_core::parser::parse_source;
/// use cdd_inspect_core::Scanner;
///
/// let tree = parse_source(r#"
///     /// summary: fetch a pet
///     struct GetPetRequest {
///         Path: Params,
///     }
///     struct Params {
///         /// desc: pet id
///         Id: String,
///     }
/// "#).unwrap();
///
/// let mut seen = Vec::new();
/// Scanner::new()
///     .scan(&tree, |record| {
///         seen.push(record.location());
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(seen, vec!["GetPetRequest", "GetPetRequest.Path.Id"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scanner<P = YamlCommentParser> {
    parser: P,
    sections: SectionSet,
}

/// Outcome of [`Scanner::collect`]: every record that parsed, every annotation that did not.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Records in traversal order.
    pub records: Vec<ReportRecord>,
    /// Annotation errors in traversal order, each tagged with its location.
    pub errors: Vec<AppError>,
}

impl ScanReport {
    /// True when no annotation failed to parse.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Scanner<YamlCommentParser> {
    /// A scanner using the YAML comment parser and the default sections.
    pub fn new() -> Self {
        Scanner::default()
    }
}

impl<P: CommentParser> Scanner<P> {
    /// A scanner using a custom comment parser and the default sections.
    pub fn with_parser(parser: P) -> Self {
        Scanner {
            parser,
            sections: SectionSet::default(),
        }
    }

    /// Replaces the section vocabulary.
    pub fn with_sections(mut self, sections: SectionSet) -> Self {
        self.sections = sections;
        self
    }

    /// The configured section vocabulary.
    pub fn sections(&self) -> &SectionSet {
        &self.sections
    }

    /// Lazily yields the records of `tree` in traversal order.
    ///
    /// Comment text is parsed when an item is pulled; a malformed annotation
    /// yields an `Err` item and the iterator can still be advanced past it.
    pub fn records<'a>(&'a self, tree: &'a SourceTree) -> Records<'a, P> {
        Records {
            sites: collect_sites(tree, &self.sections).into_iter(),
            parser: &self.parser,
        }
    }

    /// Fail-fast traversal: delivers each record to `callback` and stops at
    /// the first annotation or callback error.
    pub fn scan<F>(&self, tree: &SourceTree, mut callback: F) -> AppResult<()>
    where
        F: FnMut(ReportRecord) -> AppResult<()>,
    {
        for record in self.records(tree) {
            callback(record?)?;
        }
        Ok(())
    }

    /// Collects every record and every annotation error in one pass.
    pub fn collect(&self, tree: &SourceTree) -> ScanReport {
        let mut report = ScanReport::default();
        for item in self.records(tree) {
            match item {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!(error = %e, "skipping malformed annotation");
                    report.errors.push(e);
                }
            }
        }
        report
    }
}

/// Finite record sequence produced by [`Scanner::records`].
#[derive(Debug)]
pub struct Records<'a, P> {
    sites: std::vec::IntoIter<Site<'a>>,
    parser: &'a P,
}

impl<P: CommentParser> Iterator for Records<'_, P> {
    type Item = AppResult<ReportRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let site = self.sites.next()?;
        let item = match self.parser.parse(site.comment) {
            Ok(data) => {
                let record = ReportRecord::new(site.operation, site.section, site.field, data);
                trace!(location = %record.location(), keys = record.data.len(), "record");
                Ok(record)
            }
            Err(e) => Err(e.located(location(site.operation, site.section, site.field))),
        };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sites.size_hint()
    }
}

/// Declaration loop: type groups in source order, their specs in order,
/// structure specs handed to the inspector.
fn collect_sites<'t>(tree: &'t SourceTree, sections: &SectionSet) -> Vec<Site<'t>> {
    let mut sites = Vec::new();

    for decl in &tree.decls {
        let Decl::Types(group) = decl else {
            continue;
        };
        for spec in &group.specs {
            if let TypeShape::Structure(structure) = spec.ty.classify() {
                inspect_structure(group, spec, structure, sections, &mut sites);
            }
        }
    }

    sites
}

/// Fail-fast traversal with the default scanner.
pub fn scan<F>(tree: &SourceTree, callback: F) -> AppResult<()>
where
    F: FnMut(ReportRecord) -> AppResult<()>,
{
    Scanner::new().scan(tree, callback)
}
