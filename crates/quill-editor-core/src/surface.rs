//! The live editing surface and the TextApi bound to it.
//!
//! `EditorSurface` is the single owner of the buffer and selection — the
//! Rust equivalent of the editable text control that a UI layer would wrap.
//! `TextApi` is the narrow mutation interface handed to commands: every
//! operation reads the surface's *current* value and selection at call time,
//! so sequential commands compose without re-fetching state in between.

use crate::buffer::{EditorRope, TextBuffer, UndoManager, UndoableBuffer};
use crate::types::{SelectionRange, TextState};

/// Buffer, selection, and focus state behind the editor.
///
/// The selection invariant (`start <= end <= len_chars`) is re-established
/// after every mutation by clamping.
pub struct EditorSurface {
    buffer: UndoableBuffer<EditorRope>,
    selection: SelectionRange,
    focused: bool,
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new("")
    }
}

impl EditorSurface {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: UndoableBuffer::new(EditorRope::from_str(text), 100),
            selection: SelectionRange::caret(0),
            focused: false,
        }
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    pub fn set_selection(&mut self, selection: SelectionRange) {
        self.selection = selection.clamp(self.buffer.len_chars());
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Snapshot the current buffer and selection.
    pub fn text_state(&self) -> TextState {
        let selection = self.selection.clamp(self.buffer.len_chars());
        let selected_text = self
            .buffer
            .slice(selection.into())
            .unwrap_or_default();
        TextState {
            text: self.buffer.to_string(),
            selected_text,
            selection,
        }
    }

    /// Replace the whole document, collapsing the selection to a clamped
    /// caret. Used for caller-driven value sync, so it bypasses undo
    /// history for the old content rather than recording a giant edit.
    pub fn reset(&mut self, text: &str) {
        self.buffer = UndoableBuffer::new(EditorRope::from_str(text), 100);
        self.selection = self.selection.clamp(self.buffer.len_chars());
    }

    fn replace_range(&mut self, range: SelectionRange, text: &str) {
        let range = range.clamp(self.buffer.len_chars());
        self.buffer.replace(range.into(), text);
        let caret = range.start + text.chars().count();
        self.selection = SelectionRange::caret(caret);
    }
}

/// The mutation interface handed to command execution.
///
/// Mirrors the classic textarea command API: `replace_selection`,
/// `set_selection_range`, `insert_text`, `get_state`, each returning the
/// resulting snapshot. Undo/redo pass through to the surface's buffer.
pub struct TextApi<'a> {
    surface: &'a mut EditorSurface,
}

impl<'a> TextApi<'a> {
    pub fn new(surface: &'a mut EditorSurface) -> Self {
        Self { surface }
    }

    /// Get the current state snapshot.
    pub fn get_state(&self) -> TextState {
        self.surface.text_state()
    }

    /// Replace the current selection with new text.
    ///
    /// The caret collapses immediately after the inserted text.
    pub fn replace_selection(&mut self, text: &str) -> TextState {
        let selection = self.surface.selection().normalize();
        self.surface.replace_range(selection, text);
        self.surface.set_focused(true);
        self.surface.text_state()
    }

    /// Set the selection range (clamped to buffer bounds).
    pub fn set_selection_range(&mut self, selection: SelectionRange) -> TextState {
        self.surface.set_focused(true);
        self.surface.set_selection(selection);
        self.surface.text_state()
    }

    /// Insert text at a specific position (default: selection start),
    /// by direct splicing rather than selection replacement.
    pub fn insert_text(&mut self, text: &str, position: Option<usize>) -> TextState {
        let pos = position
            .unwrap_or(self.surface.selection().normalize().start)
            .min(self.surface.len_chars());
        self.surface.replace_range(SelectionRange::caret(pos), text);
        self.surface.text_state()
    }

    /// Undo the last edit, clamping the selection afterwards.
    pub fn undo(&mut self) -> TextState {
        if self.surface.buffer.undo() {
            let len = self.surface.buffer.len_chars();
            self.surface.selection = self.surface.selection.clamp(len);
        }
        self.surface.text_state()
    }

    /// Redo the last undone edit, clamping the selection afterwards.
    pub fn redo(&mut self) -> TextState {
        if self.surface.buffer.redo() {
            let len = self.surface.buffer.len_chars();
            self.surface.selection = self.surface.selection.clamp(len);
        }
        self.surface.text_state()
    }
}
