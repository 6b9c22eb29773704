//! Headless editor shell: wires surface, catalog, shortcuts, and state
//! machine into one widget-shaped object.
//!
//! The shell owns no rendering. A host (terminal UI, web view, native
//! toolkit) feeds it key events and toolbar clicks, reads `toolbar()` and
//! `state()` to draw, and registers callbacks for buffer and height changes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::command::{
    default_commands, default_extra_commands, redo, undo, Command, CommandKind, ExecuteContext,
};
use crate::orchestrator::CommandOrchestrator;
use crate::shortcut::{
    matches_any, should_receive_shortcuts, FocusTarget, KeyEvent, Platform,
};
use crate::state::{close_all_popups, toggle_popup, EditorState, EditorUpdate};
use crate::surface::{EditorSurface, TextApi};
use crate::types::{SelectionRange, TextState, ViewMode};

/// Markdown-to-HTML conversion, delegated to the host.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// A failure inside a host-provided renderer or highlighter.
#[derive(Debug, thiserror::Error)]
#[error("markdown render failed: {0}")]
pub struct RenderError(pub String);

/// Construction-time options. Every field has a usable default.
pub struct EditorOptions {
    pub value: String,
    pub height: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub mode: ViewMode,
    pub fullscreen: bool,
    pub highlight_enabled: bool,
    pub tab_size: u8,
    pub commands: Option<Vec<Command>>,
    pub extra_commands: Option<Vec<Command>>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            value: String::new(),
            height: 400,
            min_height: 400,
            max_height: 1000,
            mode: ViewMode::Live,
            fullscreen: false,
            highlight_enabled: true,
            tab_size: 2,
            commands: None,
            extra_commands: None,
        }
    }
}

/// Per-command toolbar filter: return `None` to hide a command, or a
/// replacement to swap it (e.g. relabel, strip shortcuts).
pub type CommandsFilter = Box<dyn Fn(&Command, bool) -> Option<Command>>;

type ChangeCallback = Box<dyn FnMut(&str)>;
type HeightCallback = Box<dyn FnMut(u32, u32)>;

pub struct MarkdownEditor {
    surface: Rc<RefCell<EditorSurface>>,
    orchestrator: CommandOrchestrator,
    state: EditorState,
    commands: Vec<Command>,
    extra_commands: Vec<Command>,
    history_commands: Vec<Command>,
    commands_filter: Option<CommandsFilter>,
    on_change: Option<ChangeCallback>,
    on_height_change: Option<HeightCallback>,
    platform: Platform,
    min_height: u32,
    max_height: u32,
}

impl Default for MarkdownEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl MarkdownEditor {
    pub fn new(options: EditorOptions) -> Self {
        let surface = Rc::new(RefCell::new(EditorSurface::new(&options.value)));
        let orchestrator = CommandOrchestrator::new(&surface);
        let state = EditorState {
            mode: options.mode,
            fullscreen: options.fullscreen,
            height: options.height.clamp(options.min_height, options.max_height),
            highlight_enabled: options.highlight_enabled,
            tab_size: options.tab_size,
            ..EditorState::default()
        };
        Self {
            surface,
            orchestrator,
            state,
            commands: options.commands.unwrap_or_else(default_commands),
            extra_commands: options.extra_commands.unwrap_or_else(default_extra_commands),
            history_commands: vec![undo(), redo()],
            commands_filter: None,
            on_change: None,
            on_height_change: None,
            platform: Platform::detect(),
            min_height: options.min_height,
            max_height: options.max_height.max(options.min_height),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn on_height_change(&mut self, callback: impl FnMut(u32, u32) + 'static) {
        self.on_height_change = Some(Box::new(callback));
    }

    pub fn set_commands_filter(&mut self, filter: impl Fn(&Command, bool) -> Option<Command> + 'static) {
        self.commands_filter = Some(Box::new(filter));
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn value(&self) -> String {
        self.surface.borrow().text()
    }

    /// Caller-driven value sync (prop change). Does not fire `on_change`.
    pub fn set_value(&mut self, value: &str) {
        self.surface.borrow_mut().reset(value);
    }

    pub fn text_state(&self) -> TextState {
        self.surface.borrow().text_state()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The live surface handle, or effectively `None` semantics once the
    /// editor is dropped (weak refs elsewhere stop upgrading).
    pub fn surface(&self) -> Rc<RefCell<EditorSurface>> {
        Rc::clone(&self.surface)
    }

    pub fn focus(&mut self) {
        self.surface.borrow_mut().set_focused(true);
    }

    pub fn blur(&mut self) {
        self.surface.borrow_mut().set_focused(false);
        self.dispatch(EditorUpdate {
            popups: Some(close_all_popups(&self.state.popups)),
            ..Default::default()
        });
    }

    pub fn set_selection(&mut self, selection: SelectionRange) {
        self.surface.borrow_mut().set_selection(selection);
    }

    /// Single reducer entry point for view-state changes.
    pub fn dispatch(&mut self, update: EditorUpdate) {
        self.state.apply(update);
    }

    /// Typed keyboard input: replaces the selection in edit/live mode and
    /// fires `on_change`. Ignored in preview mode where the buffer is
    /// read-only.
    pub fn input_text(&mut self, text: &str) {
        if self.state.mode == ViewMode::Preview {
            return;
        }
        {
            let mut surface = self.surface.borrow_mut();
            let mut api = TextApi::new(&mut surface);
            api.replace_selection(text);
        }
        self.notify_change();
    }

    /// Insert spaces for a Tab press, honoring the configured tab size.
    pub fn input_tab(&mut self) {
        let spaces = " ".repeat(self.state.tab_size as usize);
        self.input_text(&spaces);
    }

    fn notify_change(&mut self) {
        let value = self.surface.borrow().text();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&value);
        }
    }

    fn find_command(&self, name: &str) -> Option<Command> {
        fn search(commands: &[Command], name: &str) -> Option<Command> {
            for command in commands {
                if command.name == name && !command.is_divider() {
                    return Some(command.clone());
                }
                if let CommandKind::Group { children, .. } = &command.kind {
                    if let Some(found) = search(children, name) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.commands, name)
            .or_else(|| search(&self.extra_commands, name))
            .or_else(|| search(&self.history_commands, name))
    }

    /// Execute a command by name (toolbar click or programmatic call).
    /// Returns false for unknown names, groups, and dividers.
    pub fn execute_command(&mut self, name: &str) -> bool {
        let Some(command) = self.find_command(name) else {
            tracing::warn!(name, "unknown command");
            return false;
        };
        if command.action().is_none() {
            return false;
        }

        let ctx = ExecuteContext {
            mode: self.state.mode,
            fullscreen: self.state.fullscreen,
        };
        let before = self.orchestrator.state().map(|s| s.text);
        let update = self.orchestrator.apply_command(&command, &ctx);
        if let Some(update) = update {
            self.dispatch(update);
        }

        let after = self.orchestrator.state().map(|s| s.text);
        if before != after {
            self.notify_change();
        }
        // Any command invocation closes open popups.
        if self.state.any_popup_open() {
            self.dispatch(EditorUpdate {
                popups: Some(close_all_popups(&self.state.popups)),
                ..Default::default()
            });
        }
        true
    }

    fn shortcut_target(&self, event: &KeyEvent) -> Option<Command> {
        fn search(commands: &[Command], event: &KeyEvent) -> Option<Command> {
            for command in commands {
                if matches_any(event, &command.shortcuts) {
                    return Some(command.clone());
                }
                if let CommandKind::Group { children, .. } = &command.kind {
                    if let Some(found) = search(children, event) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.commands, event)
            .or_else(|| search(&self.extra_commands, event))
            .or_else(|| search(&self.history_commands, event))
    }

    /// Resolve a key event against the registered shortcuts and execute the
    /// first match. Returns true when the event was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        // Escape closes popups before anything else. Hosts report the key
        // in varying case ("Escape" from DOM events), so compare loosely.
        if event.key.eq_ignore_ascii_case("escape") && self.state.any_popup_open() {
            self.dispatch(EditorUpdate {
                popups: Some(close_all_popups(&self.state.popups)),
                ..Default::default()
            });
            return true;
        }
        let Some(command) = self.shortcut_target(event) else {
            return false;
        };
        tracing::debug!(command = %command.name, "shortcut matched");
        self.execute_command(&command.name)
    }

    /// Page-level key handling: only acts when the focus target is allowed
    /// to receive editor shortcuts.
    pub fn handle_global_key(&mut self, event: &KeyEvent, target: FocusTarget) -> bool {
        if !should_receive_shortcuts(target) {
            return false;
        }
        self.handle_key(event)
    }

    fn filtered(&self, commands: &[Command], is_extra: bool) -> Vec<Command> {
        match &self.commands_filter {
            None => commands.to_vec(),
            Some(filter) => commands
                .iter()
                .filter_map(|command| filter(command, is_extra))
                .collect(),
        }
    }

    /// Main toolbar entries after the filter is applied.
    pub fn toolbar(&self) -> Vec<Command> {
        self.filtered(&self.commands, false)
    }

    /// Extra (right-hand) toolbar entries after the filter is applied.
    pub fn extra_toolbar(&self) -> Vec<Command> {
        self.filtered(&self.extra_commands, true)
    }

    /// Open or close a group's dropdown; opening one closes the rest.
    pub fn toggle_group_popup(&mut self, group: &str) {
        let popups = toggle_popup(&self.state.popups, group);
        self.dispatch(EditorUpdate {
            popups: Some(popups),
            ..Default::default()
        });
    }

    pub fn height(&self) -> u32 {
        self.state.height
    }

    /// Drag-resize by a signed delta, clamped to the configured bounds.
    /// Fires `on_height_change` when the height actually moves.
    pub fn drag_resize(&mut self, delta: i32) {
        let old = self.state.height;
        let new = (old as i64 + delta as i64)
            .clamp(self.min_height as i64, self.max_height as i64) as u32;
        if new == old {
            return;
        }
        self.dispatch(EditorUpdate {
            height: Some(new),
            ..Default::default()
        });
        if let Some(callback) = self.on_height_change.as_mut() {
            callback(new, old);
        }
    }

    /// Render the buffer for the preview pane. A renderer failure degrades
    /// to a visible inline error instead of propagating.
    pub fn preview_html(&self, renderer: &dyn MarkdownRenderer) -> String {
        let value = self.value();
        match renderer.render(&value) {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(%err, "preview render failed");
                format!("<pre class=\"render-error\">{err}</pre>")
            }
        }
    }
}
