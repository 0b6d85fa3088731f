//! Totals over one or more annotations.

use std::ops::Range;

use crate::accumulate::{Accumulation, accumulate};
use crate::clock::{Precision, format_clock};
use crate::config::Config;
use crate::error::{NotFound, Warning};
use crate::locate::{Annotation, Search, find_preceding_marker};
use crate::surface::TextSurface;

/// Which annotations a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryMode {
    /// The nearest annotation before the cursor.
    #[default]
    Single,
    /// Every annotation from the cursor back to the start of the text.
    All,
    /// Every annotation inside the active selection.
    Selection,
}

/// Accumulated time over the annotations a summary covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_seconds: u64,
    /// Some range was still open.
    pub incomplete: bool,
    /// Number of annotations summed.
    pub annotations: usize,
    pub warnings: Vec<Warning>,
}

impl Summary {
    /// Duration text, with `..` while time is still running.
    pub fn render(&self, precision: Precision) -> String {
        let mut text = format_clock(self.total_seconds, precision);
        if self.incomplete {
            text.push_str("..");
        }
        text
    }
}

/// Sums annotations walking backwards from `from`, keeping inside `bounds`.
///
/// The first lookup uses `first_search`. Later ones start exactly at the
/// previous marker, so no marker is visited twice. Only the first (most
/// recent) annotation may end in an open range without a warning.
fn walk_back<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    from: usize,
    first_search: Search,
    bounds: Range<usize>,
) -> Option<Summary> {
    let now = surface.now();
    let mut total = Accumulation::default();
    let mut annotations = 0;
    let mut from = from;
    let mut search = first_search;

    while let Some(marker) = find_preceding_marker(surface, config, from, search, bounds.start) {
        let annotation = Annotation::at_until(surface, config, marker, bounds.end);
        let allow_incomplete = annotations == 0;
        total.merge(accumulate(annotation.tokens(), allow_incomplete, now, config));
        annotations += 1;
        from = marker;
        search = Search::FromPosition;
    }

    tracing::debug!(annotations, total_seconds = total.total_seconds, "walked annotations");
    (annotations > 0).then_some(Summary {
        total_seconds: total.total_seconds,
        incomplete: total.incomplete,
        annotations,
        warnings: total.warnings,
    })
}

/// Accumulates the annotations `mode` selects.
pub fn summarize<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    mode: SummaryMode,
) -> Result<Summary, NotFound> {
    let cursor = surface.cursor();
    match mode {
        SummaryMode::Single => {
            let annotation = Annotation::find(surface, config, cursor, Search::FromLineEnd, 0)
                .ok_or(NotFound::Annotation)?;
            let total = accumulate(annotation.tokens(), true, surface.now(), config);
            Ok(Summary {
                total_seconds: total.total_seconds,
                incomplete: total.incomplete,
                annotations: 1,
                warnings: total.warnings,
            })
        }
        SummaryMode::All => {
            walk_back(surface, config, cursor, Search::FromLineEnd, 0..surface.len())
                .ok_or(NotFound::Annotation)
        }
        SummaryMode::Selection => {
            let selection = surface
                .selection()
                .filter(|range| !range.is_empty())
                .ok_or(NotFound::Selection)?;
            walk_back(surface, config, selection.end, Search::FromPosition, selection)
                .ok_or(NotFound::Annotation)
        }
    }
}

/// Summarizes and shows the result (or why there is none) to the user.
pub fn show_summary<S: TextSurface + ?Sized>(
    surface: &mut S,
    config: &Config,
    mode: SummaryMode,
) -> Option<Summary> {
    match summarize(surface, config, mode) {
        Ok(summary) => {
            surface.notify(&summary.render(config.precision));
            Some(summary)
        }
        Err(not_found) => {
            surface.notify(&not_found.to_string());
            None
        }
    }
}
