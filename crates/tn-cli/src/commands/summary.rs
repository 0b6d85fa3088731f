//! Summary command for showing accumulated time.
//!
//! Sums the nearest annotation by default, every annotation up to the
//! cursor with `--all`, or the annotations on a range of lines with
//! `--from`/`--to`.

use std::io::Write;

use anyhow::{Result, bail};
use serde::Serialize;
use tn_core::{BufferSurface, Config, Summary, SummaryMode, TextSurface, show_summary};

use crate::SummaryArgs;
use crate::commands::util::open_surface;

/// Summary in JSON output.
#[derive(Debug, Serialize)]
pub struct SummaryJson {
    pub duration: String,
    pub total_seconds: u64,
    pub incomplete: bool,
    pub annotations: usize,
    pub warnings: Vec<String>,
}

impl SummaryJson {
    fn new(summary: &Summary, config: &Config) -> Self {
        Self {
            duration: summary.render(config.precision),
            total_seconds: summary.total_seconds,
            incomplete: summary.incomplete,
            annotations: summary.annotations,
            warnings: summary.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Select whole lines `from..=to` (1-based).
fn select_lines(surface: BufferSurface, from: usize, to: usize) -> Result<BufferSurface> {
    if to < from {
        bail!("--to ({to}) must not be before --from ({from})");
    }
    let start = surface.offset_of(from, 1);
    let end = surface.line_end(surface.offset_of(to, 1));
    Ok(surface.with_selection(start..end))
}

pub fn run<W: Write>(writer: &mut W, args: &SummaryArgs, config: &Config) -> Result<()> {
    let mut surface = open_surface(&args.target, config, false)?;
    let mode = match (args.from, args.to) {
        (Some(from), Some(to)) => {
            surface = select_lines(surface, from, to)?;
            SummaryMode::Selection
        }
        _ if args.all => SummaryMode::All,
        _ => SummaryMode::Single,
    };
    tracing::debug!(?mode, "summarizing");

    let summary = show_summary(&mut surface, config, mode);

    if args.json {
        let json = summary.as_ref().map(|s| SummaryJson::new(s, config));
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    for message in surface.notifications() {
        writeln!(writer, "{message}")?;
    }
    if let Some(summary) = summary {
        for warning in &summary.warnings {
            writeln!(writer, "warning: {warning}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::Target;

    const LOG: &str = "\
Mon
time: 8:00-12:00 13:00-17:30
Tue
time: 9:00-
";

    fn args(file: std::path::PathBuf) -> SummaryArgs {
        SummaryArgs {
            target: Target {
                file,
                line: None,
                column: None,
                now: Some("11:30".to_string()),
            },
            all: false,
            from: None,
            to: None,
            json: false,
        }
    }

    fn write_log() -> (tempfile::TempDir, std::path::PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("log.txt");
        std::fs::write(&path, LOG).unwrap();
        (temp, path)
    }

    fn output_of(args: &SummaryArgs) -> String {
        let mut output = Vec::new();
        run(&mut output, args, &Config::default()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn summary_of_nearest_annotation() {
        let (_temp, path) = write_log();
        assert_snapshot!(output_of(&args(path)), @"2:30..");
    }

    #[test]
    fn summary_of_all_annotations() {
        let (_temp, path) = write_log();
        let args = SummaryArgs {
            all: true,
            ..args(path)
        };
        assert_snapshot!(output_of(&args), @"11:00..");
    }

    #[test]
    fn summary_of_selected_lines() {
        let (_temp, path) = write_log();
        let args = SummaryArgs {
            from: Some(1),
            to: Some(2),
            ..args(path)
        };
        assert_snapshot!(output_of(&args), @"8:30");
    }

    #[test]
    fn summary_reports_missing_annotations() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("empty.txt");
        std::fs::write(&path, "nothing tracked yet\n").unwrap();
        assert_snapshot!(output_of(&args(path)), @"no time annotation found");
    }

    #[test]
    fn summary_json() {
        let (_temp, path) = write_log();
        let args = SummaryArgs {
            all: true,
            json: true,
            ..args(path)
        };
        assert_snapshot!(output_of(&args), @r#"
        {
          "duration": "11:00..",
          "total_seconds": 39600,
          "incomplete": true,
          "annotations": 2,
          "warnings": []
        }
        "#);
    }

    #[test]
    fn summary_rejects_reversed_lines() {
        let (_temp, path) = write_log();
        let args = SummaryArgs {
            from: Some(3),
            to: Some(1),
            ..args(path)
        };
        let mut output = Vec::new();
        let err = run(&mut output, &args, &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "--to (1) must not be before --from (3)");
    }
}
