//! quill-editor-core: Pure Rust markdown editor logic without framework
//! dependencies.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `EditorRope` - ropey-backed implementation with undo support
//! - Selection-relative text transforms and a declarative command catalog
//! - Shortcut parsing/matching and the editor state machine
//! - `MarkdownEditor` - a headless shell composing all of the above

pub mod buffer;
pub mod command;
pub mod orchestrator;
pub mod shell;
pub mod shortcut;
pub mod state;
pub mod surface;
pub mod transform;
pub mod types;

pub use buffer::{EditorRope, TextBuffer, UndoManager, UndoableBuffer};
pub use command::{
    default_commands, default_extra_commands, execute, Command, CommandAction, CommandKind,
    ExecuteContext,
};
pub use orchestrator::CommandOrchestrator;
pub use shell::{
    CommandsFilter, EditorOptions, MarkdownEditor, MarkdownRenderer, RenderError,
};
pub use shortcut::{
    matches_any, primary_shortcut, shortcut_tooltip, should_receive_shortcuts, FocusKind,
    FocusTarget, KeyEvent, Modifiers, Platform, Shortcut,
};
pub use smol_str::SmolStr;
pub use state::{close_all_popups, toggle_popup, EditorState, EditorUpdate};
pub use surface::{EditorSurface, TextApi};
pub use transform::{insert_at_line_start, insert_block, toggle_line_prefix, wrap_text};
pub use types::{SelectionRange, TextState, ViewMode};
