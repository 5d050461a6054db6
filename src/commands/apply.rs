use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fmt::Write;

use restyle::batch::{self, BatchOptions, BatchReport, FileStatus};
use restyle::config::ConfigOverrides;
use restyle::locator::FileFilter;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub root: String,

    /// File extension to rewrite, repeatable (default: tsx)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Glob of root-relative paths to skip, repeatable
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Rules/config file (default: <ROOT>/restyle.json, else built-in rules)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

pub fn is_text(args: &ApplyArgs) -> bool {
    args.format == OutputFormat::Text
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ApplyOutput {
    #[serde(rename = "apply")]
    Apply {
        #[serde(skip_serializing_if = "Option::is_none")]
        config: Option<String>,
        rules: usize,
        report: BatchReport,
    },
}

pub fn run(args: ApplyArgs, _global: &GlobalArgs) -> CmdResult<ApplyOutput> {
    let (config, rules, report) = execute(&args)?;

    // Per-file errors live in the report; the exit code stays 0.
    Ok((
        ApplyOutput::Apply {
            config,
            rules,
            report,
        },
        0,
    ))
}

pub fn run_text(args: ApplyArgs, _global: &GlobalArgs) -> restyle::Result<(String, i32)> {
    let (_, _, report) = execute(&args)?;
    Ok((render_text(&report), 0))
}

fn execute(args: &ApplyArgs) -> restyle::Result<(Option<String>, usize, BatchReport)> {
    let overrides = ConfigOverrides {
        extensions: args.extensions.clone(),
        exclude: args.exclude.clone(),
    };
    let (root, loaded) =
        crate::commands::load_config(&args.root, args.config.as_deref(), &overrides)?;

    let rules = loaded.config.compile_rules()?;
    let filter = FileFilter::new(&loaded.config.extensions, &loaded.config.exclude)?;
    let options = BatchOptions {
        dry_run: args.dry_run,
    };

    let report = batch::run(&root, filter, &rules, options)?;
    let source = loaded.source.map(|p| p.display().to_string());

    Ok((source, rules.len(), report))
}

/// Human-readable report: one status block per file and a summary line.
pub fn render_text(report: &BatchReport) -> String {
    let mut out = String::new();
    let verb = if report.dry_run { "Would make" } else { "Made" };

    let _ = writeln!(out, "Found {} files", report.files_scanned);
    out.push('\n');

    for file in &report.files {
        let _ = writeln!(out, "Processing: {}", file.file);
        match file.status {
            FileStatus::Changed => {
                let _ = writeln!(out, "  ✓ {} {} changes", verb, file.replacements);
            }
            FileStatus::Unchanged => {
                let _ = writeln!(out, "  - No changes needed");
            }
            FileStatus::Error => {
                let _ = writeln!(
                    out,
                    "  ✗ Error: {}",
                    file.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Fixed {}/{} files",
        report.files_changed, report.files_scanned
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle::batch::FileReport;

    fn report(dry_run: bool) -> BatchReport {
        BatchReport {
            root: "/srv/web/app".to_string(),
            extensions: vec![".tsx".to_string()],
            dry_run,
            files_scanned: 3,
            files_changed: 1,
            files_errored: 1,
            total_replacements: 4,
            files: vec![
                FileReport {
                    file: "jobs/page.tsx".to_string(),
                    status: FileStatus::Changed,
                    replacements: 4,
                    error: None,
                },
                FileReport {
                    file: "layout.tsx".to_string(),
                    status: FileStatus::Unchanged,
                    replacements: 0,
                    error: None,
                },
                FileReport {
                    file: "broken.tsx".to_string(),
                    status: FileStatus::Error,
                    replacements: 0,
                    error: Some("stream did not contain valid UTF-8".to_string()),
                },
            ],
        }
    }

    #[test]
    fn text_report_has_status_per_file_and_summary() {
        let text = render_text(&report(false));

        assert!(text.starts_with("Found 3 files\n"));
        assert!(text.contains("Processing: jobs/page.tsx\n  ✓ Made 4 changes\n"));
        assert!(text.contains("Processing: layout.tsx\n  - No changes needed\n"));
        assert!(text.contains("  ✗ Error: stream did not contain valid UTF-8\n"));
        assert!(text.ends_with("Fixed 1/3 files\n"));
    }

    #[test]
    fn dry_run_text_says_would() {
        let text = render_text(&report(true));
        assert!(text.contains("  ✓ Would make 4 changes\n"));
    }
}
