//! Batch driver: locate files, rewrite each one, write back, tally.
//!
//! Two modes:
//! - Write (default): changed files are overwritten in place
//! - Dry run: outcomes are computed but nothing touches disk
//!
//! Per-file read/write failures are logged and recorded as errors; they
//! never abort the run. Only a bad root or bad configuration does.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::locator::{FileFilter, FileLocator};
use crate::rewrite::{self, RuleSet};
use crate::utils::io;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Changed,
    Unchanged,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the scanned root.
    pub file: String,
    pub status: FileStatus,
    pub replacements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub root: String,
    pub extensions: Vec<String>,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_errored: usize,
    pub total_replacements: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn new(root: &Path, filter: &FileFilter, options: BatchOptions) -> Self {
        Self {
            root: root.display().to_string(),
            extensions: filter.suffixes().to_vec(),
            dry_run: options.dry_run,
            files_scanned: 0,
            files_changed: 0,
            files_errored: 0,
            total_replacements: 0,
            files: Vec::new(),
        }
    }

    fn record(&mut self, report: FileReport) {
        self.files_scanned += 1;
        match report.status {
            FileStatus::Changed => {
                self.files_changed += 1;
                self.total_replacements += report.replacements;
            }
            FileStatus::Unchanged => {}
            FileStatus::Error => self.files_errored += 1,
        }
        self.files.push(report);
    }
}

/// Rewrite every matching file under `root`.
///
/// Fails only when the root cannot be walked.
pub fn run(
    root: &Path,
    filter: FileFilter,
    rules: &RuleSet,
    options: BatchOptions,
) -> Result<BatchReport> {
    let locator = FileLocator::new(root, filter.clone())?;
    let root = locator.root().to_path_buf();
    let mut report = BatchReport::new(&root, &filter, options);

    for path in locator {
        let relative = path
            .strip_prefix(&root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");

        log_status!("restyle", "Processing {}", relative);
        let outcome = process_file(&path, rules, options);

        let file_report = match outcome {
            Ok(0) => {
                log_status!("restyle", "{}: no changes needed", relative);
                FileReport {
                    file: relative,
                    status: FileStatus::Unchanged,
                    replacements: 0,
                    error: None,
                }
            }
            Ok(replacements) => {
                log_status!(
                    "restyle",
                    "{}: {}",
                    relative,
                    describe_changes(replacements, options.dry_run)
                );
                FileReport {
                    file: relative,
                    status: FileStatus::Changed,
                    replacements,
                    error: None,
                }
            }
            Err(err) => {
                let message = err.detail_message();
                log_status!("restyle", "{}: error: {}", relative, message);
                FileReport {
                    file: relative,
                    status: FileStatus::Error,
                    replacements: 0,
                    error: Some(message),
                }
            }
        };

        report.record(file_report);
    }

    log_status!(
        "restyle",
        "Fixed {}/{} files",
        report.files_changed,
        report.files_scanned
    );

    Ok(report)
}

/// Progress wording for a changed file; dry runs only would have written.
pub fn describe_changes(replacements: usize, dry_run: bool) -> String {
    let verb = if dry_run { "would make" } else { "made" };
    format!("{} {} changes", verb, replacements)
}

/// Rewrite one file. Returns the replacement count, `0` when unchanged.
pub fn process_file(path: &Path, rules: &RuleSet, options: BatchOptions) -> Result<usize> {
    let display = path.display();
    let content = io::read_file(path, &format!("read {}", display))?;

    let result = rewrite::rewrite(&content, rules);
    let replacements = result.replacements;
    let Some(updated) = result.into_changed() else {
        return Ok(0);
    };

    if !options.dry_run {
        io::write_file(path, &updated, &format!("write {}", display))?;
    }

    Ok(replacements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    const HEADING: &str = r#"<h1 className="text-3xl font-bold text-gray-900">Jobs</h1>"#;

    fn tsx() -> FileFilter {
        FileFilter::new(&["tsx".to_string()], &[]).unwrap()
    }

    #[test]
    fn changes_matching_files_and_counts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app/jobs")).unwrap();
        fs::write(dir.path().join("app/jobs/page.tsx"), HEADING).unwrap();
        fs::write(dir.path().join("app/plain.tsx"), "export {}\n").unwrap();
        fs::write(dir.path().join("app/notes.md"), HEADING).unwrap();

        let rules = RuleSet::builtin().unwrap();
        let report = run(dir.path(), tsx(), &rules, BatchOptions::default()).unwrap();

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_changed, 1);
        assert_eq!(report.total_replacements, 1);
        assert_eq!(report.extensions, vec![".tsx"]);

        let changed = report
            .files
            .iter()
            .find(|f| f.status == FileStatus::Changed)
            .unwrap();
        assert_eq!(changed.file, "app/jobs/page.tsx");

        let content = fs::read_to_string(dir.path().join("app/jobs/page.tsx")).unwrap();
        assert!(content.contains("dark:text-white"));
        assert_eq!(fs::read_to_string(dir.path().join("app/notes.md")).unwrap(), HEADING);
    }

    #[test]
    fn dry_run_leaves_disk_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("page.tsx"), HEADING).unwrap();

        let rules = RuleSet::builtin().unwrap();
        let report = run(dir.path(), tsx(), &rules, BatchOptions { dry_run: true }).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.files_changed, 1);
        assert_eq!(fs::read_to_string(dir.path().join("page.tsx")).unwrap(), HEADING);
    }

    #[test]
    fn unreadable_file_is_isolated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.tsx"), HEADING).unwrap();
        fs::write(dir.path().join("b.tsx"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("c.tsx"), HEADING).unwrap();

        let rules = RuleSet::builtin().unwrap();
        let report = run(dir.path(), tsx(), &rules, BatchOptions::default()).unwrap();

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_changed, 2);
        assert_eq!(report.files_errored, 1);

        let errored = &report.files[1];
        assert_eq!(errored.file, "b.tsx");
        assert_eq!(errored.status, FileStatus::Error);
        assert!(errored.error.is_some());
    }

    #[test]
    fn missing_root_aborts_before_processing() {
        let dir = TempDir::new().unwrap();
        let rules = RuleSet::builtin().unwrap();
        let err = run(&dir.path().join("missing"), tsx(), &rules, BatchOptions::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RootNotFound);
    }

    #[test]
    fn process_file_reports_zero_for_no_match() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.tsx");
        fs::write(&path, "const x = 1;\n").unwrap();

        let rules = RuleSet::builtin().unwrap();
        assert_eq!(process_file(&path, &rules, BatchOptions::default()).unwrap(), 0);
    }

    #[test]
    fn change_wording_follows_dry_run() {
        assert_eq!(describe_changes(3, false), "made 3 changes");
        assert_eq!(describe_changes(3, true), "would make 3 changes");
    }
}
