//! # Inspection
//!
//! Locates request structures and pairs each annotated element with its
//! parsed annotation, in source order.

pub mod record;
pub mod scanner;
pub mod sections;
mod structure;

pub use record::{RecordLevel, ReportRecord, OPERATION_SECTION};
pub use scanner::{scan, Records, ScanReport, Scanner};
pub use sections::{SectionSet, DEFAULT_SECTIONS};
