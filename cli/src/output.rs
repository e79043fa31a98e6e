#![deny(missing_docs)]

//! # Output Rendering
//!
//! Serializes discovered records for downstream tools.

use crate::error::CliResult;
use cdd_inspect_core::ReportRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Supported output encodings.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// YAML sequence.
    Yaml,
    /// One tab-separated line per record: file, location, compact JSON data.
    Lines,
}

/// A record tagged with the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Source file path as given on the command line (or found while walking).
    pub file: String,
    /// The record itself.
    #[serde(flatten)]
    pub record: ReportRecord,
}

impl FileRecord {
    /// Tags `record` with `file`.
    pub fn new(file: &Path, record: ReportRecord) -> Self {
        FileRecord {
            file: file.display().to_string(),
            record,
        }
    }
}

/// Writes `records` to `out` in the requested format.
pub fn render(records: &[FileRecord], format: OutputFormat, out: &mut impl Write) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, records)?,
        OutputFormat::Lines => {
            for r in records {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    r.file,
                    r.record.location(),
                    serde_json::to_string(&r.record.data)?
                )?;
            }
        }
    }
    Ok(())
}
