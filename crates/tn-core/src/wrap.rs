//! Keeping annotation lines inside the wrap column.

use crate::config::Config;
use crate::surface::TextSurface;

/// Offset of the first token on an annotation line.
///
/// The marker (or the continuation prefix) and the whitespace after it are
/// not part of any token.
fn first_token_offset(line: &str, config: &Config, prefix: &str) -> usize {
    let offset = line.find(config.marker.as_str()).map_or_else(
        || if line.starts_with(prefix) { prefix.len() } else { 0 },
        |i| i + config.marker.len(),
    );
    let rest = &line[offset..];
    offset + (rest.len() - rest.trim_start().len())
}

/// Splits the line containing `pos` if it reaches the wrap column.
///
/// The break goes after the last whitespace before the column, so the
/// trailing token moves to a new line that starts with the continuation
/// prefix. Returns whether a break was inserted.
pub fn split_if_needed<S: TextSurface + ?Sized>(
    surface: &mut S,
    config: &Config,
    pos: usize,
    prefix: &str,
) -> bool {
    let Some(wrap_column) = config.wrap_column else {
        return false;
    };
    let line_start = surface.line_start(pos);
    let line_end = surface.line_end(pos);
    if surface.column(line_end) < wrap_column {
        return false;
    }

    let boundary = surface.position_at_column(pos, wrap_column);
    let first_token =
        line_start + first_token_offset(surface.slice(line_start..line_end), config, prefix);
    if boundary <= first_token {
        return false;
    }

    let Some(break_at) = surface
        .slice(first_token..boundary)
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| first_token + i + c.len_utf8())
    else {
        tracing::debug!(line_start, wrap_column, "no whitespace to break at");
        return false;
    };

    let insertion = format!("{}\n{prefix} ", config.continuation);
    surface.insert(break_at, &insertion);
    tracing::debug!(break_at, "split annotation line");
    true
}
