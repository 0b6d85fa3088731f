//! Finding annotations in text.
//!
//! An annotation starts at a marker and runs to the end of its line. A line
//! ending with the continuation marker carries on into the next physical
//! line, whose copy of the annotation prefix is ignored:
//!
//! ```text
//! // time: 8:20-9:20 10:00-11:45 \
//! //       13:00-
//! ```

use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::surface::TextSurface;

/// Where a backward marker search begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    /// From the end of the line containing the position, so a marker later
    /// on the cursor line is still found.
    FromLineEnd,
    /// Exactly at the position. A marker starting there is not matched,
    /// which is what lets a walk over several annotations make progress.
    FromPosition,
}

/// Position of the nearest marker before `from` that lies entirely at or
/// after `lower_bound`.
pub fn find_preceding_marker<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    from: usize,
    search: Search,
    lower_bound: usize,
) -> Option<usize> {
    let limit = match search {
        Search::FromLineEnd => surface.line_end(from),
        Search::FromPosition => from,
    };
    if lower_bound > limit {
        return None;
    }
    surface.find_backward(&config.marker, lower_bound..limit)
}

/// The leading text for continuation lines of the annotation at `marker`.
///
/// Whatever precedes the marker on its line is kept verbatim and the marker
/// itself becomes blanks, so continued tokens line up under the first ones.
pub fn extract_prefix<S: TextSurface + ?Sized>(surface: &S, config: &Config, marker: usize) -> String {
    let before = surface.slice(surface.line_start(marker)..marker);
    let mut prefix = String::with_capacity(before.len() + config.marker.len());
    prefix.push_str(before);
    prefix.extend(std::iter::repeat_n(' ', config.marker.width()));
    prefix
}

/// An annotation's tokens flattened across continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Tokens joined by single spaces.
    pub text: String,

    /// End of the last physical line, before trailing whitespace. On a
    /// continuation line holding nothing but the prefix this is the start
    /// of that line.
    pub end: usize,

    /// End of the last token, or of the marker when there are no tokens.
    pub token_end: usize,

    /// The last physical line ends with a continuation marker but no line
    /// follows it.
    pub dangling: bool,
}

/// Reads the logical line starting at `pos`.
pub fn read_logical_line<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    pos: usize,
    prefix: &str,
) -> LogicalLine {
    read_logical_line_until(surface, config, pos, prefix, surface.len())
}

/// Reads the logical line starting at `pos` without looking past `limit`.
///
/// Lines are cut at `limit` and no continuation is followed across it.
pub fn read_logical_line_until<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    pos: usize,
    prefix: &str,
    limit: usize,
) -> LogicalLine {
    let len = surface.len();
    let limit = limit.min(len);
    let mut pieces: Vec<&str> = Vec::new();
    let mut pos = pos;
    let mut token_end = pos;

    loop {
        let line_end = surface.line_end(pos).min(limit).max(pos);
        let raw = surface.slice(pos..line_end);
        let body = if pieces.is_empty() {
            raw
        } else {
            strip_line_prefix(raw, prefix)
        };
        let body_start = pos + (raw.len() - body.len());
        let content = body.trim_end();
        let end = if content.is_empty() {
            pos
        } else {
            body_start + content.len()
        };

        let continued = content.strip_suffix(config.continuation.as_str());
        let tokens = continued.unwrap_or(content).trim_end();
        if !tokens.is_empty() {
            token_end = body_start + tokens.len();
        }
        pieces.push(tokens);

        let dangling = line_end >= len;
        if continued.is_none() || dangling || line_end >= limit {
            return LogicalLine {
                text: join_pieces(&pieces),
                end,
                token_end,
                dangling: continued.is_some() && dangling,
            };
        }
        pos = line_end + 1;
    }
}

/// Removes the continuation prefix from a physical line. A line holding
/// only the prefix, even with its trailing blanks trimmed, has no content.
fn strip_line_prefix<'a>(raw: &'a str, prefix: &str) -> &'a str {
    match raw.strip_prefix(prefix) {
        Some(rest) => rest,
        None if raw.trim_end() == prefix.trim_end() => &raw[raw.len()..],
        None => raw,
    }
}

fn join_pieces(pieces: &[&str]) -> String {
    pieces
        .iter()
        .flat_map(|piece| piece.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens of the logical line starting at `pos`, joined by single spaces.
pub fn extract_logical_line<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    pos: usize,
    prefix: &str,
) -> String {
    read_logical_line(surface, config, pos, prefix).text
}

/// Where new tokens go for the logical line starting at `pos`.
pub fn logical_line_end<S: TextSurface + ?Sized>(
    surface: &S,
    config: &Config,
    pos: usize,
    prefix: &str,
) -> usize {
    read_logical_line(surface, config, pos, prefix).end
}

/// A located annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Position of the marker.
    pub marker: usize,
    pub prefix: String,
    pub line: LogicalLine,
}

impl Annotation {
    /// Reads the annotation whose marker starts at `marker`.
    pub fn at<S: TextSurface + ?Sized>(surface: &S, config: &Config, marker: usize) -> Self {
        Self::at_until(surface, config, marker, surface.len())
    }

    /// Reads the annotation whose marker starts at `marker`, ignoring any
    /// text from `limit` on.
    pub fn at_until<S: TextSurface + ?Sized>(
        surface: &S,
        config: &Config,
        marker: usize,
        limit: usize,
    ) -> Self {
        let prefix = extract_prefix(surface, config, marker);
        let start = marker + config.marker.len();
        let line = read_logical_line_until(surface, config, start, &prefix, limit);
        Self {
            marker,
            prefix,
            line,
        }
    }

    /// Finds the nearest annotation before `from`.
    pub fn find<S: TextSurface + ?Sized>(
        surface: &S,
        config: &Config,
        from: usize,
        search: Search,
        lower_bound: usize,
    ) -> Option<Self> {
        find_preceding_marker(surface, config, from, search, lower_bound)
            .map(|marker| Self::at(surface, config, marker))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.line.text.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::surface::BufferSurface;

    fn surface(text: &str) -> BufferSurface {
        BufferSurface::new(text, NaiveTime::from_hms_opt(12, 0, 0).unwrap())
    }

    #[test]
    fn test_search_variants_differ_at_marker() {
        let text = "notes\ntime: 1-2\nmore\ntime: 3-4 5-6";
        let s = surface(text);
        let config = Config::default();
        let second = text.rfind("time:").unwrap();

        assert_eq!(
            find_preceding_marker(&s, &config, second, Search::FromLineEnd, 0),
            Some(second)
        );
        assert_eq!(
            find_preceding_marker(&s, &config, second, Search::FromPosition, 0),
            Some(6)
        );
        assert_eq!(
            find_preceding_marker(&s, &config, 6, Search::FromPosition, 0),
            None
        );
        assert_eq!(
            find_preceding_marker(&s, &config, second, Search::FromPosition, 7),
            None
        );
    }

    #[test]
    fn test_cursor_before_marker_on_same_line() {
        let s = surface("  time: 1-2");
        let config = Config::default();
        assert_eq!(
            find_preceding_marker(&s, &config, 0, Search::FromLineEnd, 0),
            Some(2)
        );
    }

    #[test]
    fn test_prefix_blanks_out_marker() {
        let s = surface("intro\n// time: 1-2");
        let config = Config::default();
        assert_eq!(extract_prefix(&s, &config, 9), "//      ");
    }

    #[test]
    fn test_joins_continuation_lines() {
        let text = "// time: 8:20-9:20  10:00-11:45 \\\n//       13:00-14:00 \\\n//       15:00-\nafter";
        let s = surface(text);
        let config = Config::default();
        let annotation = Annotation::at(&s, &config, 3);

        assert_eq!(annotation.prefix, "//      ");
        assert_eq!(
            annotation.line.text,
            "8:20-9:20 10:00-11:45 13:00-14:00 15:00-"
        );
        assert_eq!(annotation.line.end, text.find("\nafter").unwrap());
        assert!(!annotation.line.dangling);
        assert_eq!(annotation.tokens().count(), 4);
    }

    #[test]
    fn test_logical_end_skips_trailing_whitespace() {
        let text = "time: 1-2   \nnext";
        let s = surface(text);
        let config = Config::default();
        assert_eq!(logical_line_end(&s, &config, 5, "     "), 9);
        assert_eq!(extract_logical_line(&s, &config, 5, "     "), "1-2");
    }

    #[test]
    fn test_continuation_onto_blank_line() {
        let text = "time: 1-2 \\\n";
        let s = surface(text);
        let config = Config::default();
        let line = read_logical_line(&s, &config, 5, "     ");
        assert_eq!(line.text, "1-2");
        assert_eq!(line.end, text.len());
        assert!(!line.dangling);
    }

    #[test]
    fn test_continuation_at_end_of_text_is_dangling() {
        let text = "time: 1-2 \\";
        let s = surface(text);
        let config = Config::default();
        let line = read_logical_line(&s, &config, 5, "     ");
        assert_eq!(line.text, "1-2");
        assert_eq!(line.end, text.len());
        assert!(line.dangling);
    }

    #[test]
    fn test_continuation_on_every_line_terminates() {
        let text = "time: 1-2 \\\n\\\n\\\n\\";
        let s = surface(text);
        let config = Config::default();
        let line = read_logical_line(&s, &config, 5, "     ");
        assert_eq!(line.text, "1-2");
        assert!(line.dangling);
    }

    #[test]
    fn test_prefix_only_continuation_line_is_empty() {
        let config = Config::default();
        let texts = [
            "// time: 8:00-9:00 \\\n//      \nrest",
            "// time: 8:00-9:00 \\\n//\nrest",
        ];
        for text in texts {
            let s = surface(text);
            let annotation = Annotation::at(&s, &config, 3);
            assert_eq!(annotation.line.text, "8:00-9:00");
            assert_eq!(annotation.line.end, text.find('\n').unwrap() + 1);
            assert_eq!(annotation.line.token_end, text.find(" \\").unwrap());
        }
    }

    #[test]
    fn test_reading_stops_at_limit() {
        let text = "time: 1:00-2:00 \\\n      3:00-4:00\n";
        let s = surface(text);
        let config = Config::default();
        let first_line_end = text.find('\n').unwrap();

        let cut = Annotation::at_until(&s, &config, 0, first_line_end + 1);
        assert_eq!(cut.line.text, "1:00-2:00");
        assert!(!cut.line.dangling);

        let cut = Annotation::at_until(&s, &config, 0, "time: 1:00-2:00".len());
        assert_eq!(cut.line.text, "1:00-2:00");

        assert_eq!(Annotation::at(&s, &config, 0).line.text, "1:00-2:00 3:00-4:00");
    }

    #[test]
    fn test_prefix_width_counts_display_columns() {
        let config = Config {
            marker: "時間:".to_string(),
            ..Config::default()
        };
        let s = surface("# 時間: 1-2");
        assert_eq!(extract_prefix(&s, &config, 2), "#      ");
    }

    #[test]
    fn test_custom_markers() {
        let config = Config {
            marker: "@t".to_string(),
            continuation: "+".to_string(),
            ..Config::default()
        };
        let s = surface("x @t 1-2 +\n     3-4");
        let annotation = Annotation::find(&s, &config, 12, Search::FromLineEnd, 0).unwrap();
        assert_eq!(annotation.marker, 2);
        assert_eq!(annotation.prefix, "x   ");
        assert_eq!(annotation.line.text, "1-2 3-4");
    }
}
