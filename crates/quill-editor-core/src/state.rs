//! Editor view state and its single reducer entry point.
//!
//! All state changes flow through [`EditorState::apply`], a shallow merge of
//! an [`EditorUpdate`] over the previous state. Any field set in the update
//! replaces the old value wholesale; collections are replaced, not merged.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::types::ViewMode;

/// Per-editor view state, separate from the text buffer itself.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub mode: ViewMode,
    pub fullscreen: bool,
    /// Popup visibility keyed by command group name. At most one entry is
    /// true at a time.
    pub popups: HashMap<SmolStr, bool>,
    pub height: u32,
    pub highlight_enabled: bool,
    pub tab_size: u8,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Live,
            fullscreen: false,
            popups: HashMap::new(),
            height: 400,
            highlight_enabled: true,
            tab_size: 2,
        }
    }
}

/// A partial state update. `None` fields leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorUpdate {
    pub mode: Option<ViewMode>,
    pub fullscreen: Option<bool>,
    pub popups: Option<HashMap<SmolStr, bool>>,
    pub height: Option<u32>,
    pub highlight_enabled: Option<bool>,
    pub tab_size: Option<u8>,
}

impl EditorState {
    /// Merge a partial update over the current state.
    pub fn apply(&mut self, update: EditorUpdate) {
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(fullscreen) = update.fullscreen {
            self.fullscreen = fullscreen;
        }
        if let Some(popups) = update.popups {
            self.popups = popups;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(highlight) = update.highlight_enabled {
            self.highlight_enabled = highlight;
        }
        if let Some(tab_size) = update.tab_size {
            self.tab_size = tab_size;
        }
    }

    pub fn is_popup_open(&self, group: &str) -> bool {
        self.popups.get(group).copied().unwrap_or(false)
    }

    pub fn any_popup_open(&self) -> bool {
        self.popups.values().any(|open| *open)
    }
}

/// Flip `group` and force every other popup closed.
pub fn toggle_popup(popups: &HashMap<SmolStr, bool>, group: &str) -> HashMap<SmolStr, bool> {
    let was_open = popups.get(group).copied().unwrap_or(false);
    let mut next: HashMap<SmolStr, bool> =
        popups.keys().map(|k| (k.clone(), false)).collect();
    next.insert(group.into(), !was_open);
    next
}

/// All popups closed, preserving known keys.
pub fn close_all_popups(popups: &HashMap<SmolStr, bool>) -> HashMap<SmolStr, bool> {
    popups.keys().map(|k| (k.clone(), false)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_only_set_fields() {
        let mut state = EditorState::default();
        state.apply(EditorUpdate {
            mode: Some(ViewMode::Edit),
            ..Default::default()
        });
        assert_eq!(state.mode, ViewMode::Edit);
        assert!(!state.fullscreen);
        assert_eq!(state.height, 400);

        state.apply(EditorUpdate {
            fullscreen: Some(true),
            height: Some(600),
            ..Default::default()
        });
        assert_eq!(state.mode, ViewMode::Edit);
        assert!(state.fullscreen);
        assert_eq!(state.height, 600);
    }

    #[test]
    fn test_popup_map_replaced_not_merged() {
        let mut state = EditorState::default();
        state.popups.insert("heading".into(), true);

        let mut replacement = HashMap::new();
        replacement.insert(SmolStr::new("table"), true);
        state.apply(EditorUpdate {
            popups: Some(replacement),
            ..Default::default()
        });

        assert!(!state.is_popup_open("heading"));
        assert!(state.is_popup_open("table"));
    }

    #[test]
    fn test_toggle_popup_mutual_exclusion() {
        let mut popups = HashMap::new();
        popups.insert(SmolStr::new("heading"), true);
        popups.insert(SmolStr::new("table"), false);

        let next = toggle_popup(&popups, "table");
        assert!(!next["heading"]);
        assert!(next["table"]);

        // Toggling the open one closes everything.
        let next = toggle_popup(&next, "table");
        assert!(!next["heading"]);
        assert!(!next["table"]);
    }

    #[test]
    fn test_close_all_popups() {
        let mut popups = HashMap::new();
        popups.insert(SmolStr::new("heading"), true);
        let closed = close_all_popups(&popups);
        assert_eq!(closed.len(), 1);
        assert!(!closed["heading"]);
    }
}
