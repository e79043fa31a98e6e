//! # Report Records

use crate::annotation::Annotation;
use serde::Serialize;

/// Section name carried by operation-level records.
pub const OPERATION_SECTION: &str = "Operation";

/// One discovered annotation with its hierarchical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    /// Name of the request structure (e.g. `GetPetRequest`).
    pub operation: String,
    /// `Operation` for the structure itself, otherwise the section field name.
    pub section: String,
    /// Sub-field name; empty for operation and section records.
    pub field: String,
    /// Parsed annotation data.
    pub data: Annotation,
}

/// Which element a record was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLevel {
    /// The request structure declaration.
    Operation,
    /// A recognized section field.
    Section,
    /// A field inside a section.
    Field,
}

impl ReportRecord {
    /// Builds a record from borrowed names.
    pub fn new(operation: &str, section: &str, field: &str, data: Annotation) -> Self {
        ReportRecord {
            operation: operation.to_string(),
            section: section.to_string(),
            field: field.to_string(),
            data,
        }
    }

    /// The element this record describes.
    pub fn level(&self) -> RecordLevel {
        if !self.field.is_empty() {
            RecordLevel::Field
        } else if self.section == OPERATION_SECTION {
            RecordLevel::Operation
        } else {
            RecordLevel::Section
        }
    }

    /// Dotted name, e.g. `GetPetRequest.Path.Id`.
    pub fn location(&self) -> String {
        location(&self.operation, &self.section, &self.field)
    }
}

/// Joins the non-empty parts of a record name; operation records use the bare operation.
pub(crate) fn location(operation: &str, section: &str, field: &str) -> String {
    let mut out = operation.to_string();
    if section != OPERATION_SECTION {
        out.push('.');
        out.push_str(section);
        if !field.is_empty() {
            out.push('.');
            out.push_str(field);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_and_locations() {
        let op = ReportRecord::new("GetPetRequest", OPERATION_SECTION, "", Annotation::new());
        assert_eq!(op.level(), RecordLevel::Operation);
        assert_eq!(op.location(), "GetPetRequest");

        let section = ReportRecord::new("GetPetRequest", "Path", "", Annotation::new());
        assert_eq!(section.level(), RecordLevel::Section);
        assert_eq!(section.location(), "GetPetRequest.Path");

        let field = ReportRecord::new("GetPetRequest", "Path", "Id", Annotation::new());
        assert_eq!(field.level(), RecordLevel::Field);
        assert_eq!(field.location(), "GetPetRequest.Path.Id");
    }
}
