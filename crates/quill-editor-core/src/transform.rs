//! Selection-relative text transforms used by the built-in commands.
//!
//! All transforms take the pre-transform snapshot plus the live [`TextApi`]
//! and express their edit as a single `replace_selection` call, so each one
//! lands on the undo stack as one step.

use crate::surface::TextApi;
use crate::types::TextState;

/// Wrap the selected text with a prefix and suffix.
///
/// Works on an empty selection too, producing adjacent markers with the
/// caret after them.
pub fn wrap_text(state: &TextState, api: &mut TextApi<'_>, prefix: &str, suffix: &str) {
    let new_text = format!("{prefix}{}{suffix}", state.selected_text);
    api.replace_selection(&new_text);
}

/// Prepend a prefix to every line of the selection, unconditionally.
pub fn insert_at_line_start(state: &TextState, api: &mut TextApi<'_>, prefix: &str) {
    let new_text = state
        .selected_text
        .split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n");
    api.replace_selection(&new_text);
}

/// Toggle a line prefix: remove it if *every* selected line already has it,
/// otherwise add it to every line.
pub fn toggle_line_prefix(state: &TextState, api: &mut TextApi<'_>, prefix: &str) {
    let lines: Vec<&str> = state.selected_text.split('\n').collect();
    let all_have_prefix = lines.iter().all(|line| line.starts_with(prefix));

    let new_text = if all_have_prefix {
        lines
            .iter()
            .map(|line| &line[prefix.len()..])
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        lines
            .iter()
            .map(|line| format!("{prefix}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    api.replace_selection(&new_text);
}

/// Insert a block of text on its own line(s).
///
/// A newline is prepended only when a character precedes the selection and
/// that character is not already a newline; likewise appended only when a
/// character follows and is not a newline. At document start or end no
/// spurious blank line is produced.
pub fn insert_block(state: &TextState, api: &mut TextApi<'_>, text: &str) {
    let selection = state.selection.normalize();
    let before: String = state.text.chars().take(selection.start).collect();
    let after: String = state.text.chars().skip(selection.end).collect();

    let prefix = if !before.is_empty() && !before.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    let suffix = if !after.is_empty() && !after.starts_with('\n') {
        "\n"
    } else {
        ""
    };

    api.replace_selection(&format!("{prefix}{text}{suffix}"));
}
