#![deny(missing_docs)]

//! # Scan Command
//!
//! Reads Rust sources, extracts annotation records and renders them.
//!
//! 1. **Discover**: files are taken as given; directories are walked for `*.rs` files.
//! 2. **Parse**: each file is lowered into the inspection tree.
//! 3. **Inspect**: records are collected per file, in source order.
//! 4. **Render**: all records are written once, in the requested format.

use crate::error::{CliError, CliResult};
use crate::output::{render, FileRecord, OutputFormat};
use cdd_inspect_core::{
    parse_source_with, AppError, LoweringOptions, Scanner, SectionSet, DEFAULT_SECTIONS,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// Arguments for the scan command.
#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Files or directories to scan.
    #[clap(required = true)]
    pub paths: Vec<PathBuf>,

    /// Field names recognized as sections of a request structure.
    #[clap(
        long,
        env = "CDD_INSPECT_SECTIONS",
        value_delimiter = ',',
        default_values_t = DEFAULT_SECTIONS.map(String::from)
    )]
    pub sections: Vec<String>,

    /// Output encoding.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Report every malformed annotation instead of stopping at the first one.
    #[clap(long)]
    pub keep_going: bool,

    /// Do not inline same-file structs into section fields.
    #[clap(long)]
    pub no_inline: bool,
}

/// Executes the scan and writes the rendered records to `out`.
///
/// In fail-fast mode the first error is returned and nothing is written.
/// With `--keep-going` the records that did parse are written before the
/// error count is returned.
pub fn execute(args: &ScanArgs, out: &mut impl Write) -> CliResult<Vec<FileRecord>> {
    let files = discover(&args.paths)?;
    info!(files = files.len(), "scanning");

    let scanner = Scanner::new().with_sections(SectionSet::new(args.sections.iter().cloned()));
    let options = LoweringOptions {
        inline_local_structs: !args.no_inline,
    };

    let mut records = Vec::new();
    let mut failures = 0usize;

    for file in &files {
        debug!(file = %file.display(), "inspecting file");
        let code = fs::read_to_string(file)?;

        let tree = match parse_source_with(&code, &options) {
            Ok(tree) => tree,
            Err(e) if args.keep_going => {
                error!("{}", e.located(file.display().to_string()));
                failures += 1;
                continue;
            }
            Err(e) => return Err(e.located(file.display().to_string()).into()),
        };

        if args.keep_going {
            let report = scanner.collect(&tree);
            for e in report.errors {
                error!("{}", e.located(file.display().to_string()));
                failures += 1;
            }
            records.extend(report.records.into_iter().map(|r| FileRecord::new(file, r)));
        } else {
            scanner
                .scan(&tree, |r| {
                    records.push(FileRecord::new(file, r));
                    Ok(())
                })
                .map_err(|e: AppError| e.located(file.display().to_string()))?;
        }
    }

    render(&records, args.format, out)?;

    if failures > 0 {
        return Err(CliError::General(format!(
            "{} malformed annotation(s) or file(s)",
            failures
        )));
    }

    Ok(records)
}

/// Expands directories into their `*.rs` files, sorted by path for determinism.
fn discover(paths: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_rust_file(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(CliError::General(format!("path not found: {:?}", path)));
        }
    }

    Ok(files)
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const REQUESTS: &str = r#"
/// summary: fetch a pet
pub struct GetPetRequest {
    pub Path: GetPetPath,
}

pub struct GetPetPath {
    /// desc: pet id
    pub Id: String,
}
"#;

    fn args(paths: Vec<PathBuf>) -> ScanArgs {
        ScanArgs {
            paths,
            sections: DEFAULT_SECTIONS.map(String::from).to_vec(),
            format: OutputFormat::Lines,
            keep_going: false,
            no_inline: false,
        }
    }

    #[test]
    fn test_execute_walks_directory_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::write(dir.path().join("api/b.rs"), REQUESTS).unwrap();
        fs::write(
            dir.path().join("api/a.rs"),
            "/// summary: ping\nstruct PingRequest {}",
        )
        .unwrap();
        fs::write(dir.path().join("api/notes.txt"), "/// summary: nope").unwrap();

        let mut out = Vec::new();
        let records = execute(&args(vec![dir.path().to_path_buf()]), &mut out).unwrap();

        let locations: Vec<String> = records.iter().map(|r| r.record.location()).collect();
        assert_eq!(
            locations,
            vec!["PingRequest", "GetPetRequest", "GetPetRequest.Path.Id"]
        );
        assert!(records[0].file.ends_with("a.rs"));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_execute_fail_fast_writes_nothing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.rs");
        fs::write(&file, "/// not an annotation\nstruct Bad {}").unwrap();

        let mut out = Vec::new();
        let err = execute(&args(vec![file]), &mut out).unwrap_err();
        assert!(err.to_string().contains("bad.rs: Bad: Annotation Error"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_execute_keep_going_renders_good_records() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.rs"), "/// not an annotation\nstruct Bad {}").unwrap();
        fs::write(dir.path().join("broken.rs"), "struct Broken {").unwrap();
        fs::write(dir.path().join("good.rs"), REQUESTS).unwrap();

        let mut scan_args = args(vec![dir.path().to_path_buf()]);
        scan_args.keep_going = true;

        let mut out = Vec::new();
        let err = execute(&scan_args, &mut out).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation failed: 2 malformed annotation(s) or file(s)"
        );
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_execute_missing_path() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let err = execute(&args(vec![dir.path().join("missing.rs")]), &mut out).unwrap_err();
        assert!(err.to_string().contains("path not found"));
    }
}
