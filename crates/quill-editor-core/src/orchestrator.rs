//! Binds commands to a live surface that the orchestrator does not own.
//!
//! The host shell owns the [`EditorSurface`] behind `Rc<RefCell<..>>`; the
//! orchestrator holds only a `Weak` reference. Once the surface is dropped
//! (editor unmounted), `state()` returns `None` and command application
//! becomes a silent no-op. Callers check the sentinel, they never get a
//! panic from a detached editor.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::command::{execute, Command, CommandAction, ExecuteContext};
use crate::state::EditorUpdate;
use crate::surface::{EditorSurface, TextApi};
use crate::types::TextState;

pub struct CommandOrchestrator {
    surface: Weak<RefCell<EditorSurface>>,
}

impl CommandOrchestrator {
    pub fn new(surface: &Rc<RefCell<EditorSurface>>) -> Self {
        Self {
            surface: Rc::downgrade(surface),
        }
    }

    /// A detached orchestrator; every operation no-ops until replaced.
    pub fn detached() -> Self {
        Self {
            surface: Weak::new(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.surface.strong_count() > 0
    }

    /// Current snapshot, or `None` when the surface is gone.
    pub fn state(&self) -> Option<TextState> {
        let surface = self.surface.upgrade()?;
        let state = surface.borrow().text_state();
        Some(state)
    }

    /// Run an action against the live surface.
    ///
    /// Reads the surface's current value and selection at call time, so
    /// sequential applications compose without re-fetching in between.
    /// Returns `None` both for buffer-only actions and for a detached
    /// surface; use [`state`](Self::state) to distinguish if needed.
    pub fn apply_action(
        &self,
        action: &CommandAction,
        ctx: &ExecuteContext,
    ) -> Option<EditorUpdate> {
        let Some(surface) = self.surface.upgrade() else {
            tracing::debug!("command applied to detached surface, ignoring");
            return None;
        };
        let mut surface = surface.borrow_mut();
        let state = surface.text_state();
        let mut api = TextApi::new(&mut surface);
        execute(action, &state, &mut api, ctx)
    }

    /// Run a leaf command; group and divider commands no-op.
    pub fn apply_command(&self, command: &Command, ctx: &ExecuteContext) -> Option<EditorUpdate> {
        let action = command.action()?;
        self.apply_action(action, ctx)
    }

    /// Run a closure against a fresh `TextApi`, for custom popup commands
    /// that need direct buffer access.
    pub fn with_text_api<R>(&self, f: impl FnOnce(&mut TextApi<'_>) -> R) -> Option<R> {
        let surface = self.surface.upgrade()?;
        let mut surface = surface.borrow_mut();
        let mut api = TextApi::new(&mut surface);
        Some(f(&mut api))
    }
}
