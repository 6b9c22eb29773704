//! Core editor types: selection ranges, text snapshots, and view modes.
//!
//! These types are framework-agnostic and shared by every other module in
//! the crate.

use smol_str::SmolStr;

/// A selection range in the document, measured in character offsets.
///
/// All offsets are in Unicode scalar values (chars), not bytes or UTF-16.
/// A collapsed range (`start == end`) is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize range so start <= end.
    pub fn normalize(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }

    /// Clamp both endpoints to a buffer of `len` chars.
    ///
    /// Re-establishes the `start <= end <= len` invariant after any buffer
    /// mutation that may have shortened the document.
    pub fn clamp(self, len: usize) -> Self {
        let r = self.normalize();
        Self {
            start: r.start.min(len),
            end: r.end.min(len),
        }
    }
}

impl From<std::ops::Range<usize>> for SelectionRange {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<SelectionRange> for std::ops::Range<usize> {
    fn from(r: SelectionRange) -> Self {
        r.start..r.end
    }
}

/// A read-only snapshot of the buffer and current selection.
///
/// Derived on demand from the live surface, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextState {
    /// Full document text.
    pub text: String,
    /// Substring covered by `selection`.
    pub selected_text: SmolStr,
    /// Current selection (already normalized and clamped).
    pub selection: SelectionRange,
}

impl TextState {
    /// Character at `offset`, if any. Offsets are char offsets.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Total length in chars.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// What the editor shows.
///
/// `Live` is the split-pane default: editable surface and rendered preview
/// side by side. Transitions happen only through explicit mode-switch
/// commands or direct caller updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Edit,
    Preview,
    #[default]
    Live,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_normalize() {
        let r = SelectionRange::new(10, 5);
        let n = r.normalize();
        assert_eq!(n.start, 5);
        assert_eq!(n.end, 10);
        assert_eq!(n.len(), 5);
    }

    #[test]
    fn test_range_clamp() {
        let r = SelectionRange::new(3, 40).clamp(10);
        assert_eq!(r, SelectionRange::new(3, 10));

        // Clamp normalizes too.
        let r = SelectionRange::new(40, 3).clamp(10);
        assert_eq!(r, SelectionRange::new(3, 10));
    }

    #[test]
    fn test_caret() {
        let c = SelectionRange::caret(7);
        assert!(c.is_caret());
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn test_text_state_char_at() {
        let state = TextState {
            text: "héllo".to_string(),
            selected_text: "".into(),
            selection: SelectionRange::caret(0),
        };
        assert_eq!(state.char_at(1), Some('é'));
        assert_eq!(state.char_at(5), None);
        assert_eq!(state.len_chars(), 5);
    }
}
