//! # Structure Inspector
//!
//! Finds the annotated elements of one request structure: the declaration
//! itself, its recognized section fields, and the fields of each section.

use super::record::OPERATION_SECTION;
use super::sections::SectionSet;
use crate::tree::{StructType, TypeGroup, TypeSpec};
use tracing::debug;

/// An annotated element awaiting comment parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Site<'t> {
    pub(crate) operation: &'t str,
    pub(crate) section: &'t str,
    pub(crate) field: &'t str,
    pub(crate) comment: &'t str,
}

/// Appends the annotated elements of `structure` to `sites`, in visitation order.
///
/// Recursion stops at section fields: their own types are never inspected.
pub(crate) fn inspect_structure<'t>(
    group: &'t TypeGroup,
    spec: &'t TypeSpec,
    structure: &'t StructType,
    sections: &SectionSet,
    sites: &mut Vec<Site<'t>>,
) {
    let operation = spec.name.as_str();
    debug!(operation, fields = structure.fields.len(), "inspecting structure");

    if let Some(comment) = group.leading_comment() {
        sites.push(Site {
            operation,
            section: OPERATION_SECTION,
            field: "",
            comment,
        });
    }

    for section_field in &structure.fields {
        let Some(section) = section_field.name() else {
            continue;
        };
        if !sections.contains(section) {
            continue;
        }

        if let Some(comment) = section_field.leading_comment() {
            sites.push(Site {
                operation,
                section,
                field: "",
                comment,
            });
        }

        // `Response *Pet` style sections stay opaque: only inline structures are walked.
        let Some(section_struct) = section_field.ty.classify().structure() else {
            continue;
        };

        for sub_field in &section_struct.fields {
            let (Some(field), Some(comment)) = (sub_field.name(), sub_field.leading_comment())
            else {
                continue;
            };
            sites.push(Site {
                operation,
                section,
                field,
                comment,
            });
        }
    }
}
