//! Clocking on and off.
//!
//! Each toggle appends to the nearest annotation before the cursor:
//!
//! - no annotation: a marker is inserted at the cursor first, moving any
//!   text after the cursor to the next line;
//! - last range open (`9:00-`): the current time closes it;
//! - otherwise: ` <now>-` opens a new range.
//!
//! When wrapping is enabled the line is split afterwards if it got too long.

use crate::accumulate::RangeToken;
use crate::clock::{Precision, clock_seconds, current_clock_text, format_clock};
use crate::config::Config;
use crate::error::NotFound;
use crate::locate::{Annotation, Search, extract_prefix, find_preceding_marker};
use crate::surface::TextSurface;
use crate::wrap::split_if_needed;

/// Where an annotation stands before a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationState {
    NoAnnotation,
    /// The last range has a start but no end.
    AnnotationOpen,
    /// The last range is complete, or there are no ranges yet.
    AnnotationClosed,
}

impl AnnotationState {
    pub fn of(annotation: Option<&Annotation>, config: &Config) -> Self {
        match annotation {
            None => Self::NoAnnotation,
            Some(a) if a.line.text.ends_with(config.separator.as_str()) => Self::AnnotationOpen,
            Some(_) => Self::AnnotationClosed,
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new range was opened. Carries the time since the previous range
    /// ended, if there was one.
    ClockedOn { since_last: Option<u64> },
    /// The open range was closed. Carries its length.
    ClockedOff { span: u64 },
}

impl ToggleOutcome {
    pub fn message(&self, precision: Precision) -> String {
        match self {
            Self::ClockedOn { since_last: None } => "clocked on: started".to_string(),
            Self::ClockedOn {
                since_last: Some(gap),
            } => format!("clocked on: {} since last", format_clock(*gap, precision)),
            Self::ClockedOff { span } => format!("clocked off: {}", format_clock(*span, precision)),
        }
    }
}

/// Opens or closes a range in the annotation nearest the cursor.
pub fn toggle<S: TextSurface + ?Sized>(surface: &mut S, config: &Config) -> ToggleOutcome {
    let now = surface.now();
    let now_text = current_clock_text(now, config.clock, config.precision);
    let now_seconds = clock_seconds(now, config.clock, config.precision);
    let cursor = surface.cursor();

    let found = Annotation::find(surface, config, cursor, Search::FromLineEnd, 0);
    let state = AnnotationState::of(found.as_ref(), config);
    tracing::debug!(?state, cursor, "toggling");

    let annotation = match found {
        Some(annotation) => annotation,
        None => insert_marker(surface, config, cursor),
    };

    let last_token = annotation
        .line
        .text
        .split_whitespace()
        .last()
        .map(|token| RangeToken::parse(token, &config.separator));

    let (mut insert_end, outcome) = if state == AnnotationState::AnnotationOpen {
        let at = annotation.line.token_end;
        erase_trailing_blanks(surface, at);
        surface.insert(at, &now_text);
        let span = last_token.map_or(0, |token| {
            token.span(now_seconds, config).unwrap_or_else(|err| {
                tracing::warn!(%err, "cannot measure closed range");
                0
            })
        });
        (at + now_text.len(), ToggleOutcome::ClockedOff { span })
    } else {
        let mut at = annotation.line.end;
        if annotation.line.dangling {
            surface.insert(at, "\n");
            at += 1;
        }
        let line_end = surface.line_end(at);
        surface.erase(at..line_end);
        if surface.line_text(at).trim().is_empty() {
            surface.insert(at, &annotation.prefix);
            at += annotation.prefix.len();
        }
        let text = format!(" {now_text}{}", config.separator);
        surface.insert(at, &text);
        let since_last = last_token
            .and_then(|token| token.end)
            .and_then(|prev_end| {
                RangeToken {
                    start: prev_end,
                    end: None,
                }
                .span(now_seconds, config)
                .ok()
            });
        (at + text.len(), ToggleOutcome::ClockedOn { since_last })
    };

    let len_before = surface.len();
    if split_if_needed(surface, config, insert_end, &annotation.prefix) {
        insert_end += surface.len() - len_before;
    }

    if surface.line_start(surface.cursor()) == surface.line_start(insert_end) {
        surface.set_cursor(insert_end);
    }

    surface.notify(&outcome.message(config.precision));
    outcome
}

/// Starts a new annotation at `cursor`.
///
/// Text after the cursor is moved to the next line so it is not read as
/// tokens, and a marker right after a word is set apart by a space.
fn insert_marker<S: TextSurface + ?Sized>(
    surface: &mut S,
    config: &Config,
    cursor: usize,
) -> Annotation {
    let after_word = surface
        .slice(surface.line_start(cursor)..cursor)
        .ends_with(|c: char| !c.is_whitespace());
    let text_follows = !surface
        .slice(cursor..surface.line_end(cursor))
        .trim()
        .is_empty();

    let mut text = String::new();
    if after_word {
        text.push(' ');
    }
    let marker = cursor + text.len();
    text.push_str(&config.marker);
    if text_follows {
        text.push('\n');
    }
    surface.insert(cursor, &text);
    tracing::debug!(marker, text_follows, "inserted marker");
    Annotation::at(surface, config, marker)
}

/// Erases whitespace from `pos` to the end of its line, if that is all
/// there is.
fn erase_trailing_blanks<S: TextSurface + ?Sized>(surface: &mut S, pos: usize) {
    let line_end = surface.line_end(pos);
    if surface.slice(pos..line_end).trim().is_empty() {
        surface.erase(pos..line_end);
    }
}

/// Inserts the current time at the cursor.
///
/// The time is separated from a preceding token by a space. With wrapping
/// enabled the line is split using the prefix of the annotation before the
/// cursor; without one the split is skipped and the user is told.
pub fn insert<S: TextSurface + ?Sized>(surface: &mut S, config: &Config) -> String {
    let now_text = current_clock_text(surface.now(), config.clock, config.precision);
    let cursor = surface.cursor();
    let before = surface.slice(surface.line_start(cursor)..cursor);
    let needs_space = !before.is_empty()
        && !before.ends_with(char::is_whitespace)
        && !before.ends_with(config.separator.as_str());

    let text = if needs_space {
        format!(" {now_text}")
    } else {
        now_text
    };
    surface.insert(cursor, &text);
    let end = cursor + text.len();
    surface.set_cursor(end);

    if config.wrap_column.is_some() {
        match find_preceding_marker(surface, config, end, Search::FromLineEnd, 0) {
            Some(marker) => {
                let prefix = extract_prefix(surface, config, marker);
                split_if_needed(surface, config, end, &prefix);
            }
            None => {
                tracing::warn!("no marker before cursor, skipping wrap");
                surface.notify(&format!("{}, not wrapping", NotFound::Marker));
            }
        }
    }
    text
}
