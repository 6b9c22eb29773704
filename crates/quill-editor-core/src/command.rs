//! Command catalog and action dispatch.
//!
//! A [`Command`] is a named toolbar entry. Its behavior is a data-carrying
//! [`CommandAction`] variant rather than a callback, so the whole catalog is
//! inspectable (for shortcut tables, toolbars, help output) and execution
//! funnels through one `execute` dispatch.

use smol_str::SmolStr;

use crate::state::EditorUpdate;
use crate::surface::TextApi;
use crate::transform::{insert_block, toggle_line_prefix, wrap_text};
use crate::types::{TextState, ViewMode};

/// What a command does when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Wrap the selection in markers (`**`, `*`, `~~`, `` ` ``).
    Wrap { prefix: SmolStr, suffix: SmolStr },
    /// Toggle a per-line prefix (`- `, `> `, `- [ ] `); with an empty
    /// selection, just insert the prefix at the caret.
    LinePrefix { prefix: SmolStr },
    /// Number each selected line `1.`, `2.`, ...; empty selection inserts `1. `.
    OrderedList,
    /// Replace the enclosing line(s) with a heading of the given level.
    Heading { level: u8 },
    /// Wrap the selection in a fenced code block on its own lines.
    CodeBlock,
    /// Insert `[text](url)` around the selection.
    Link,
    /// Insert `![alt](image-url)` around the selection.
    Image,
    /// Insert `---` on its own line.
    HorizontalRule,
    /// Switch the view mode.
    SetMode(ViewMode),
    /// Flip the fullscreen flag.
    ToggleFullscreen,
    /// Revert the last buffer edit.
    Undo,
    /// Reapply the last undone edit.
    Redo,
}

/// Leaf, group, or visual separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Leaf(CommandAction),
    /// A dropdown of child commands, keyed by `group` for popup state.
    Group {
        group: SmolStr,
        children: Vec<Command>,
    },
    /// Non-interactive toolbar spacer.
    Divider,
}

/// A named, invokable editing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: SmolStr,
    pub label: SmolStr,
    pub shortcuts: Vec<SmolStr>,
    pub kind: CommandKind,
}

impl Command {
    pub fn leaf(name: &str, label: &str, action: CommandAction) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            shortcuts: Vec::new(),
            kind: CommandKind::Leaf(action),
        }
    }

    pub fn with_shortcuts(mut self, shortcuts: &[&str]) -> Self {
        self.shortcuts = shortcuts.iter().map(|s| SmolStr::from(*s)).collect();
        self
    }

    pub fn group(name: &str, label: &str, children: Vec<Command>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            shortcuts: Vec::new(),
            kind: CommandKind::Group {
                group: name.into(),
                children,
            },
        }
    }

    pub fn divider() -> Self {
        Self {
            name: "divider".into(),
            label: "".into(),
            shortcuts: Vec::new(),
            kind: CommandKind::Divider,
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self.kind, CommandKind::Divider)
    }

    /// The leaf action for this command, if any.
    pub fn action(&self) -> Option<&CommandAction> {
        match &self.kind {
            CommandKind::Leaf(action) => Some(action),
            _ => None,
        }
    }
}

/// View-level context passed alongside execution, for actions that
/// read editor state outside the buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteContext {
    pub mode: ViewMode,
    pub fullscreen: bool,
}

fn strip_heading_marker(line: &str) -> &str {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if let Some(stripped) = rest.strip_prefix(' ') {
            return stripped;
        }
    }
    line
}

/// Replace the line(s) containing the selection with a heading.
///
/// The selection is expanded to complete lines first, any existing heading
/// marker is dropped, and an empty line falls back to a placeholder title.
fn apply_heading(state: &TextState, api: &mut TextApi<'_>, level: u8) {
    let selection = state.selection.normalize();
    let chars: Vec<char> = state.text.chars().collect();

    let mut line_start = selection.start;
    while line_start > 0 && chars[line_start - 1] != '\n' {
        line_start -= 1;
    }
    let mut line_end = selection.end;
    while line_end < chars.len() && chars[line_end] != '\n' {
        line_end += 1;
    }

    let state = api.set_selection_range(crate::types::SelectionRange::new(line_start, line_end));
    let text = strip_heading_marker(state.selected_text.trim()).to_owned();
    let text = if text.is_empty() {
        format!("Heading {level}")
    } else {
        text
    };
    let marker = "#".repeat(level as usize);
    api.replace_selection(&format!("{marker} {text}"));
}

/// Run a single action against the buffer.
///
/// Buffer-editing actions return `None`; actions that target editor state
/// (mode, fullscreen) return the partial update to merge.
pub fn execute(
    action: &CommandAction,
    state: &TextState,
    api: &mut TextApi<'_>,
    ctx: &ExecuteContext,
) -> Option<EditorUpdate> {
    tracing::debug!(?action, "executing command action");
    match action {
        CommandAction::Wrap { prefix, suffix } => {
            wrap_text(state, api, prefix, suffix);
        }
        CommandAction::LinePrefix { prefix } => {
            if state.selected_text.is_empty() {
                api.replace_selection(prefix);
            } else {
                toggle_line_prefix(state, api, prefix);
            }
        }
        CommandAction::OrderedList => {
            if state.selected_text.is_empty() {
                api.replace_selection("1. ");
            } else {
                let new_text = state
                    .selected_text
                    .split('\n')
                    .enumerate()
                    .map(|(i, line)| format!("{}. {line}", i + 1))
                    .collect::<Vec<_>>()
                    .join("\n");
                api.replace_selection(&new_text);
            }
        }
        CommandAction::Heading { level } => {
            apply_heading(state, api, (*level).clamp(1, 6));
        }
        CommandAction::CodeBlock => {
            let body = if state.selected_text.is_empty() {
                "code"
            } else {
                state.selected_text.as_str()
            };
            insert_block(state, api, &format!("```\n{body}\n```"));
        }
        CommandAction::Link => {
            let text = if state.selected_text.is_empty() {
                "link text"
            } else {
                state.selected_text.as_str()
            };
            api.replace_selection(&format!("[{text}](url)"));
        }
        CommandAction::Image => {
            let alt = if state.selected_text.is_empty() {
                "alt text"
            } else {
                state.selected_text.as_str()
            };
            api.replace_selection(&format!("![{alt}](image-url)"));
        }
        CommandAction::HorizontalRule => {
            insert_block(state, api, "---");
        }
        CommandAction::SetMode(mode) => {
            return Some(EditorUpdate {
                mode: Some(*mode),
                ..Default::default()
            });
        }
        CommandAction::ToggleFullscreen => {
            return Some(EditorUpdate {
                fullscreen: Some(!ctx.fullscreen),
                ..Default::default()
            });
        }
        CommandAction::Undo => {
            api.undo();
        }
        CommandAction::Redo => {
            api.redo();
        }
    }
    None
}

pub fn bold() -> Command {
    Command::leaf(
        "bold",
        "Bold",
        CommandAction::Wrap {
            prefix: "**".into(),
            suffix: "**".into(),
        },
    )
    .with_shortcuts(&["ctrl+b", "cmd+b"])
}

pub fn italic() -> Command {
    Command::leaf(
        "italic",
        "Italic",
        CommandAction::Wrap {
            prefix: "*".into(),
            suffix: "*".into(),
        },
    )
    .with_shortcuts(&["ctrl+i", "cmd+i"])
}

pub fn strikethrough() -> Command {
    Command::leaf(
        "strikethrough",
        "Strikethrough",
        CommandAction::Wrap {
            prefix: "~~".into(),
            suffix: "~~".into(),
        },
    )
}

pub fn heading(level: u8) -> Command {
    let name = SmolStr::new(format!("h{level}"));
    let label = SmolStr::new(format!("Heading {level}"));
    Command {
        name,
        label,
        shortcuts: Vec::new(),
        kind: CommandKind::Leaf(CommandAction::Heading { level }),
    }
}

pub fn heading_group() -> Command {
    Command::group("heading", "Headings", vec![heading(1), heading(2), heading(3)])
}

pub fn code() -> Command {
    Command::leaf(
        "code",
        "Inline code",
        CommandAction::Wrap {
            prefix: "`".into(),
            suffix: "`".into(),
        },
    )
    .with_shortcuts(&["ctrl+`", "cmd+`"])
}

pub fn code_block() -> Command {
    Command::leaf("codeBlock", "Code block", CommandAction::CodeBlock)
        .with_shortcuts(&["ctrl+shift+c", "cmd+shift+c"])
}

pub fn link() -> Command {
    Command::leaf("link", "Link", CommandAction::Link).with_shortcuts(&["ctrl+k", "cmd+k"])
}

pub fn image() -> Command {
    Command::leaf("image", "Image", CommandAction::Image)
}

pub fn unordered_list() -> Command {
    Command::leaf(
        "unorderedList",
        "Unordered list",
        CommandAction::LinePrefix { prefix: "- ".into() },
    )
}

pub fn ordered_list() -> Command {
    Command::leaf("orderedList", "Ordered list", CommandAction::OrderedList)
}

pub fn task_list() -> Command {
    Command::leaf(
        "checkedList",
        "Task list",
        CommandAction::LinePrefix {
            prefix: "- [ ] ".into(),
        },
    )
}

pub fn quote() -> Command {
    Command::leaf(
        "quote",
        "Quote",
        CommandAction::LinePrefix { prefix: "> ".into() },
    )
}

pub fn horizontal_rule() -> Command {
    Command::leaf("hr", "Horizontal rule", CommandAction::HorizontalRule)
}

pub fn edit_mode() -> Command {
    Command::leaf("edit", "Edit mode", CommandAction::SetMode(ViewMode::Edit))
}

pub fn live_mode() -> Command {
    Command::leaf("live", "Live mode", CommandAction::SetMode(ViewMode::Live))
}

pub fn preview_mode() -> Command {
    Command::leaf(
        "preview",
        "Preview mode",
        CommandAction::SetMode(ViewMode::Preview),
    )
}

pub fn fullscreen() -> Command {
    Command::leaf("fullscreen", "Fullscreen", CommandAction::ToggleFullscreen)
        .with_shortcuts(&["f11"])
}

pub fn undo() -> Command {
    Command::leaf("undo", "Undo", CommandAction::Undo).with_shortcuts(&["ctrl+z", "cmd+z"])
}

pub fn redo() -> Command {
    Command::leaf("redo", "Redo", CommandAction::Redo).with_shortcuts(&[
        "ctrl+y",
        "ctrl+shift+z",
        "cmd+shift+z",
    ])
}

/// The main (left-hand) toolbar catalog, in display order.
pub fn default_commands() -> Vec<Command> {
    vec![
        bold(),
        italic(),
        strikethrough(),
        Command::divider(),
        heading_group(),
        Command::divider(),
        code(),
        code_block(),
        Command::divider(),
        link(),
        image(),
        Command::divider(),
        unordered_list(),
        ordered_list(),
        task_list(),
        Command::divider(),
        quote(),
        horizontal_rule(),
    ]
}

/// The extra (right-hand) toolbar catalog: mode switches and utilities.
pub fn default_extra_commands() -> Vec<Command> {
    vec![
        edit_mode(),
        live_mode(),
        preview_mode(),
        Command::divider(),
        fullscreen(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::EditorSurface;
    use crate::types::SelectionRange;

    fn run(action: &CommandAction, surface: &mut EditorSurface) -> Option<EditorUpdate> {
        let state = surface.text_state();
        let mut api = TextApi::new(surface);
        execute(action, &state, &mut api, &ExecuteContext::default())
    }

    #[test]
    fn test_bold_wraps_selection() {
        let mut surface = EditorSurface::new("make x strong");
        surface.set_selection(SelectionRange::new(5, 6));
        run(bold().action().unwrap(), &mut surface);
        assert_eq!(surface.text(), "make **x** strong");
    }

    #[test]
    fn test_heading_replaces_whole_line() {
        let mut surface = EditorSurface::new("first\nsome title\nlast");
        // Caret in the middle of the second line.
        surface.set_selection(SelectionRange::caret(10));
        run(&CommandAction::Heading { level: 2 }, &mut surface);
        assert_eq!(surface.text(), "first\n## some title\nlast");
    }

    #[test]
    fn test_heading_swaps_existing_level() {
        let mut surface = EditorSurface::new("# old title");
        surface.set_selection(SelectionRange::caret(4));
        run(&CommandAction::Heading { level: 3 }, &mut surface);
        assert_eq!(surface.text(), "### old title");
    }

    #[test]
    fn test_heading_placeholder_on_empty_line() {
        let mut surface = EditorSurface::new("");
        run(&CommandAction::Heading { level: 1 }, &mut surface);
        assert_eq!(surface.text(), "# Heading 1");
    }

    #[test]
    fn test_ordered_list_numbers_lines() {
        let mut surface = EditorSurface::new("a\nb\nc");
        surface.set_selection(SelectionRange::new(0, 5));
        run(&CommandAction::OrderedList, &mut surface);
        assert_eq!(surface.text(), "1. a\n2. b\n3. c");
    }

    #[test]
    fn test_quote_empty_selection_inserts_prefix() {
        let mut surface = EditorSurface::new("");
        run(quote().action().unwrap(), &mut surface);
        assert_eq!(surface.text(), "> ");
    }

    #[test]
    fn test_code_block_uses_placeholder() {
        let mut surface = EditorSurface::new("");
        run(&CommandAction::CodeBlock, &mut surface);
        assert_eq!(surface.text(), "```\ncode\n```");
    }

    #[test]
    fn test_link_wraps_selected_text() {
        let mut surface = EditorSurface::new("read this page");
        surface.set_selection(SelectionRange::new(5, 9));
        run(&CommandAction::Link, &mut surface);
        assert_eq!(surface.text(), "read [this](url) page");
    }

    #[test]
    fn test_mode_actions_return_updates() {
        let mut surface = EditorSurface::new("");
        let update = run(&CommandAction::SetMode(ViewMode::Preview), &mut surface).unwrap();
        assert_eq!(update.mode, Some(ViewMode::Preview));
        assert_eq!(update.fullscreen, None);

        let update = run(&CommandAction::ToggleFullscreen, &mut surface).unwrap();
        assert_eq!(update.fullscreen, Some(true));
    }

    #[test]
    fn test_undo_action_reverts_edit() {
        let mut surface = EditorSurface::new("abc");
        surface.set_selection(SelectionRange::new(0, 3));
        run(bold().action().unwrap(), &mut surface);
        assert_eq!(surface.text(), "**abc**");
        run(&CommandAction::Undo, &mut surface);
        assert_eq!(surface.text(), "abc");
    }

    #[test]
    fn test_default_catalog_names_unique() {
        let mut names: Vec<SmolStr> = default_commands()
            .iter()
            .chain(default_extra_commands().iter())
            .filter(|c| !c.is_divider())
            .map(|c| c.name.clone())
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
