//! Reporting: console summary and JSON export of outcomes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::AnalysisOutcome;
use crate::utils::Colors;
use crate::utils::config::REPORT_DATE_FORMAT;

/// Aggregate counts over a set of outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[AnalysisOutcome]) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        Summary {
            total: outcomes.len(),
            ok: outcomes.len() - failed,
            failed,
        }
    }
}

/// One line per outcome (plus an indented error line when failed), then the totals line.
pub fn render_summary(outcomes: &[AnalysisOutcome]) -> String {
    let mut out = String::new();
    for o in outcomes {
        let tag = if o.is_failed() {
            Colors::failed(o.status.as_str())
        } else {
            Colors::ok(o.status.as_str())
        };
        let _ = writeln!(out, "[{}] [{}] {} - {}", tag, o.log_id, o.file_path, o.message);
        if !o.error_details.is_empty() {
            let _ = writeln!(out, "    error: {}", o.error_details);
        }
    }
    let s = Summary::from_outcomes(outcomes);
    let _ = writeln!(
        out,
        "Total: {} | OK: {} | FAILED: {}",
        s.total, s.ok, s.failed
    );
    out
}

/// Write outcomes to `path` as a pretty JSON array, creating parent directories as needed.
pub fn export_json(outcomes: &[AnalysisOutcome], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory '{}'", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("create report file '{}'", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, outcomes).context("encode report JSON")?;
    writeln!(w)?;
    w.flush()
        .with_context(|| format!("write report file '{}'", path.display()))?;
    Ok(())
}

/// `dir/name.ext` → `dir/YYMMDD_name.ext` for `date`.
pub fn timestamped_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stamp = date.format(REPORT_DATE_FORMAT).to_string();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stamp}_{stem}.{}", ext.to_string_lossy()),
        None => format!("{stamp}_{stem}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifiedError;
    use crate::{LogDescriptor, Status};

    fn sample() -> Vec<AnalysisOutcome> {
        let a = LogDescriptor::new("a", "/logs/a.log", "nginx");
        let b = LogDescriptor::new("b", "/logs/b.log", "nginx");
        vec![
            AnalysisOutcome::ok(&a),
            AnalysisOutcome::failed(
                &b,
                &ClassifiedError::parsing_failure("b", "/logs/b.log", "bad"),
            ),
        ]
    }

    #[test]
    fn summary_counts() {
        assert_eq!(
            Summary::from_outcomes(&sample()),
            Summary {
                total: 2,
                ok: 1,
                failed: 1
            }
        );
        assert_eq!(Summary::from_outcomes(&[]), Summary::default());
    }

    #[test]
    fn rendered_summary_lists_items_then_totals() {
        colored::control::set_override(false);
        let text = render_summary(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[OK] [a] /logs/a.log - Analysis completed successfully.");
        assert_eq!(lines[1], "[FAILED] [b] /logs/b.log - Parsing error.");
        assert_eq!(lines[2], "    error: parsing error for b (/logs/b.log): bad");
        assert_eq!(lines.last().copied(), Some("Total: 2 | OK: 1 | FAILED: 1"));
    }

    #[test]
    fn export_writes_records_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        export_json(&sample(), &path).unwrap();
        let back: Vec<AnalysisOutcome> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample());
        assert_eq!(back[1].status, Status::Failed);
    }

    #[test]
    fn timestamp_prefixes_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 24).unwrap();
        assert_eq!(
            timestamped_path(Path::new("/tmp/out/analyse.json"), date),
            PathBuf::from("/tmp/out/240524_analyse.json")
        );
        assert_eq!(
            timestamped_path(Path::new("report"), date),
            PathBuf::from("240524_report")
        );
    }
}
