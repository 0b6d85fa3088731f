//! The text surface that annotations live in.
//!
//! Operations never touch a concrete editor. They read and edit through
//! [`TextSurface`], which needs only a handful of primitives; everything
//! line- and column-oriented is provided on top of them.
//!
//! Positions are byte offsets into the text and always fall on character
//! boundaries. Searches that find nothing return `None`.

use std::ops::Range;

use chrono::NaiveTime;
use unicode_width::UnicodeWidthChar;

/// An editable text with a cursor, an optional selection, a clock and a
/// place to show short messages.
pub trait TextSurface {
    /// Length of the text in bytes.
    fn len(&self) -> usize;

    /// Text in `range`.
    fn slice(&self, range: Range<usize>) -> &str;

    fn insert(&mut self, pos: usize, text: &str);

    fn erase(&mut self, range: Range<usize>);

    fn cursor(&self) -> usize;

    fn set_cursor(&mut self, pos: usize);

    /// Active selection, if any.
    fn selection(&self) -> Option<Range<usize>>;

    /// Columns per tab stop.
    fn tab_width(&self) -> usize;

    /// Current wall-clock time.
    fn now(&self) -> NaiveTime;

    /// Shows a short message to the user.
    fn notify(&mut self, message: &str);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the line containing `pos`.
    fn line_start(&self, pos: usize) -> usize {
        self.slice(0..pos).rfind('\n').map_or(0, |i| i + 1)
    }

    /// End of the line containing `pos`, excluding the line break.
    fn line_end(&self, pos: usize) -> usize {
        let len = self.len();
        self.slice(pos..len).find('\n').map_or(len, |i| pos + i)
    }

    /// The whole line containing `pos`, without its line break.
    fn line_text(&self, pos: usize) -> &str {
        self.slice(self.line_start(pos)..self.line_end(pos))
    }

    /// Display column of `pos`, expanding tabs to the next tab stop and
    /// counting wide characters as two columns.
    fn column(&self, pos: usize) -> usize {
        let tab = self.tab_width().max(1);
        self.slice(self.line_start(pos)..pos)
            .chars()
            .fold(0, |col, c| advance_column(col, c, tab))
    }

    /// First position on the line of `pos` whose display column reaches
    /// `column`, or the line end if the line is shorter.
    fn position_at_column(&self, pos: usize, column: usize) -> usize {
        let tab = self.tab_width().max(1);
        let start = self.line_start(pos);
        let mut col = 0;
        for (offset, c) in self.slice(start..self.line_end(pos)).char_indices() {
            if col >= column {
                return start + offset;
            }
            col = advance_column(col, c, tab);
        }
        self.line_end(pos)
    }

    /// Start of the last occurrence of `needle` lying entirely inside `range`.
    fn find_backward(&self, needle: &str, range: Range<usize>) -> Option<usize> {
        let start = range.start;
        self.slice(range).rfind(needle).map(|i| start + i)
    }

    /// Start of the first occurrence of `needle` lying entirely inside `range`.
    fn find_forward(&self, needle: &str, range: Range<usize>) -> Option<usize> {
        let start = range.start;
        self.slice(range).find(needle).map(|i| start + i)
    }
}

/// Column reached after drawing `c` at column `col`.
fn advance_column(col: usize, c: char, tab: usize) -> usize {
    if c == '\t' {
        (col / tab + 1) * tab
    } else {
        col + c.width().unwrap_or(0)
    }
}

/// In-memory [`TextSurface`] backed by a `String`.
///
/// Edits shift the cursor and selection the way an editor would, the clock
/// is fixed at construction and notifications are collected in order.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    text: String,
    cursor: usize,
    selection: Option<Range<usize>>,
    tab_width: usize,
    now: NaiveTime,
    notifications: Vec<String>,
}

impl BufferSurface {
    /// Creates a surface with the cursor at the end of `text`.
    pub fn new(text: impl Into<String>, now: NaiveTime) -> Self {
        let text = text.into();
        Self {
            cursor: text.len(),
            text,
            selection: None,
            tab_width: 4,
            now,
            notifications: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, pos: usize) -> Self {
        self.cursor = self.clamp(pos);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, range: Range<usize>) -> Self {
        self.selection = Some(self.clamp(range.start)..self.clamp(range.end));
        self
    }

    #[must_use]
    pub const fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Byte offset of a 1-based line and character column.
    ///
    /// Lines past the end map to the end of the text; columns past the end
    /// of a line map to its line end.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let mut start = 0;
        for _ in 1..line.max(1) {
            match self.text[start..].find('\n') {
                Some(i) => start += i + 1,
                None => return self.text.len(),
            }
        }
        let end = self.line_end(start);
        self.text[start..end]
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(end, |(i, _)| start + i)
    }

    fn clamp(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn shift_for_insert(point: usize, pos: usize, len: usize) -> usize {
        if point >= pos { point + len } else { point }
    }

    fn shift_for_erase(point: usize, range: &Range<usize>) -> usize {
        if point >= range.end {
            point - (range.end - range.start)
        } else if point > range.start {
            range.start
        } else {
            point
        }
    }
}

impl TextSurface for BufferSurface {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn slice(&self, range: Range<usize>) -> &str {
        &self.text[range]
    }

    fn insert(&mut self, pos: usize, text: &str) {
        self.text.insert_str(pos, text);
        let len = text.len();
        self.cursor = Self::shift_for_insert(self.cursor, pos, len);
        if let Some(sel) = &mut self.selection {
            sel.start = Self::shift_for_insert(sel.start, pos, len);
            sel.end = Self::shift_for_insert(sel.end, pos, len);
        }
    }

    fn erase(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.text.replace_range(range.clone(), "");
        self.cursor = Self::shift_for_erase(self.cursor, &range);
        if let Some(sel) = &mut self.selection {
            sel.start = Self::shift_for_erase(sel.start, &range);
            sel.end = Self::shift_for_erase(sel.end, &range);
        }
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, pos: usize) {
        self.cursor = self.clamp(pos);
    }

    fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn now(&self) -> NaiveTime {
        self.now
    }

    fn notify(&mut self, message: &str) {
        tracing::debug!(message, "notification");
        self.notifications.push(message.to_string());
    }
}
