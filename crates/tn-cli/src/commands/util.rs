//! Shared utilities for CLI commands.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveTime};
use tn_core::clock::parse_clock;
use tn_core::{BufferSurface, Config};

use crate::Target;

/// Parse a `--now` override, or read the local wall clock.
///
/// Accepts the same `H`, `H:MM` and `H:MM:SS` forms annotations use.
pub fn parse_now(now: Option<&str>) -> Result<NaiveTime> {
    let Some(text) = now else {
        return Ok(Local::now().time());
    };
    let seconds = parse_clock(text).with_context(|| format!("invalid --now value: {text}"))?;
    let Some(time) = u32::try_from(seconds)
        .ok()
        .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0))
    else {
        bail!("invalid --now value: {text} is not a time of day");
    };
    Ok(time)
}

/// Load `target.file` into a surface with the cursor placed per `target`.
///
/// A missing file is an empty text when `allow_missing` is set.
pub fn open_surface(
    target: &Target,
    config: &Config,
    allow_missing: bool,
) -> Result<BufferSurface> {
    let text = match std::fs::read_to_string(&target.file) {
        Ok(text) => text,
        Err(err) if allow_missing && err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = ?target.file, "starting new file");
            String::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", target.file.display()));
        }
    };

    let now = parse_now(target.now.as_deref())?;
    let surface = BufferSurface::new(text, now).with_tab_width(config.tab_width);
    let cursor = match target.line {
        Some(line) => surface.offset_of(line, target.column.unwrap_or(usize::MAX)),
        None => surface.text().len(),
    };
    tracing::debug!(cursor, %now, "opened surface");
    Ok(surface.with_cursor(cursor))
}

/// Report notifications and store the edited text.
///
/// With `to_stdout` the text goes to `writer` and notifications to stderr;
/// otherwise the file is rewritten and notifications go to `writer`.
pub fn finish_edit<W: Write>(
    writer: &mut W,
    surface: &BufferSurface,
    path: &Path,
    to_stdout: bool,
) -> Result<()> {
    if to_stdout {
        for message in surface.notifications() {
            eprintln!("{message}");
        }
        write!(writer, "{}", surface.text())?;
        return Ok(());
    }

    std::fs::write(path, surface.text())
        .with_context(|| format!("failed to write {}", path.display()))?;
    for message in surface.notifications() {
        writeln!(writer, "{message}")?;
    }
    Ok(())
}
