//! Keyboard shortcut parsing, matching, and display formatting.
//!
//! A shortcut spec is a `+`-joined string like `"ctrl+shift+k"` or `"f11"`:
//! the last token is the key, everything before it a modifier. Unknown
//! modifier tokens are ignored rather than rejected, so newer specs keep
//! parsing on older builds.

use smol_str::SmolStr;

/// Modifier flags in the active key chord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const META: Modifiers = Modifiers {
        ctrl: false,
        meta: true,
        shift: false,
        alt: false,
    };
}

/// A key press as delivered by the host shell: a normalized key name plus
/// the modifier set held at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: SmolStr,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: &str, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// Host platform, for display glyphs and primary-shortcut selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Apple,
    #[default]
    Other,
}

impl Platform {
    /// Detect from the build target.
    pub fn detect() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::Apple
        } else {
            Platform::Other
        }
    }
}

/// A parsed shortcut spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: SmolStr,
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// Parse a spec string. Never fails: an unrecognized modifier token is
    /// silently dropped, and the trailing token always becomes the key.
    pub fn parse(spec: &str) -> Self {
        let lowered = spec.to_lowercase();
        let parts: Vec<&str> = lowered.split('+').collect();
        let key = SmolStr::new(parts.last().copied().unwrap_or(""));

        let mut modifiers = Modifiers::default();
        for modifier in &parts[..parts.len().saturating_sub(1)] {
            match *modifier {
                "ctrl" => modifiers.ctrl = true,
                "cmd" | "meta" => modifiers.meta = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                other => {
                    tracing::trace!(token = other, spec, "ignoring unknown modifier token");
                }
            }
        }

        Self { key, modifiers }
    }

    /// Exact-modifier match: every modifier flag must equal the event's,
    /// so `ctrl+b` does not fire while shift is also held.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let event_key = event.key.to_lowercase();
        let key_matches = event_key == self.key.as_str()
            || (self.key == "space" && event_key == " ");
        key_matches && event.modifiers == self.modifiers
    }

    /// Human-readable rendering: glyphs joined bare on Apple platforms,
    /// names joined with `+` elsewhere.
    pub fn description(&self, platform: Platform) -> String {
        let apple = platform == Platform::Apple;
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.ctrl {
            parts.push(if apple { "⌃" } else { "Ctrl" }.to_owned());
        }
        if self.modifiers.meta {
            parts.push(if apple { "⌘" } else { "Win" }.to_owned());
        }
        if self.modifiers.alt {
            parts.push(if apple { "⌥" } else { "Alt" }.to_owned());
        }
        if self.modifiers.shift {
            parts.push(if apple { "⇧" } else { "Shift" }.to_owned());
        }

        let mut key_chars = self.key.chars();
        let key = match key_chars.next() {
            Some(first) if self.key.chars().count() == 1 => first.to_uppercase().to_string(),
            Some(first) => first.to_uppercase().chain(key_chars).collect(),
            None => String::new(),
        };
        parts.push(key);

        parts.join(if apple { "" } else { "+" })
    }
}

/// Whether a key event matches any spec in a command's shortcut list.
pub fn matches_any(event: &KeyEvent, specs: &[SmolStr]) -> bool {
    specs.iter().any(|spec| Shortcut::parse(spec).matches(event))
}

/// Pick the spec whose primary modifier fits the platform (`cmd` on Apple,
/// `ctrl` elsewhere), falling back to the first entry.
pub fn primary_shortcut<'a>(specs: &'a [SmolStr], platform: Platform) -> Option<&'a SmolStr> {
    let preferred = specs.iter().find(|spec| {
        let parsed = Shortcut::parse(spec);
        match platform {
            Platform::Apple => parsed.modifiers.meta,
            Platform::Other => parsed.modifiers.ctrl,
        }
    });
    preferred.or_else(|| specs.first())
}

/// Tooltip text for a command's shortcut list.
pub fn shortcut_tooltip(specs: &[SmolStr], platform: Platform) -> Option<String> {
    primary_shortcut(specs, platform).map(|spec| Shortcut::parse(spec).description(platform))
}

/// What kind of control currently holds keyboard focus, as reported by the
/// host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKind {
    /// A plain text input, select box, or similar foreign form control.
    FormControl,
    /// A rich/contenteditable region outside the editor.
    RichText,
    /// A multiline text area outside the editor.
    ForeignTextArea,
    /// Anything else (page body, buttons, links).
    Page,
}

/// Where keyboard focus sits relative to this editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTarget {
    pub kind: FocusKind,
    /// True when the focused element lives inside this editor's container.
    pub within_editor: bool,
}

/// Whether global shortcut dispatch should act on a key event, given the
/// focus target. Foreign inputs keep their keystrokes; the editor's own
/// controls always receive shortcuts.
pub fn should_receive_shortcuts(target: FocusTarget) -> bool {
    if target.within_editor {
        return true;
    }
    matches!(target.kind, FocusKind::Page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let shortcut = Shortcut::parse("ctrl+b");
        assert_eq!(shortcut.key, "b");
        assert_eq!(shortcut.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn test_parse_cmd_maps_to_meta() {
        let shortcut = Shortcut::parse("cmd+shift+k");
        assert_eq!(shortcut.key, "k");
        assert!(shortcut.modifiers.meta);
        assert!(shortcut.modifiers.shift);
        assert!(!shortcut.modifiers.ctrl);
    }

    #[test]
    fn test_parse_bare_function_key() {
        let shortcut = Shortcut::parse("F11");
        assert_eq!(shortcut.key, "f11");
        assert_eq!(shortcut.modifiers, Modifiers::NONE);
    }

    #[test]
    fn test_parse_ignores_unknown_modifier() {
        let shortcut = Shortcut::parse("hyper+ctrl+b");
        assert_eq!(shortcut.key, "b");
        assert_eq!(shortcut.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn test_exact_modifier_match() {
        let shortcut = Shortcut::parse("ctrl+b");
        assert!(shortcut.matches(&KeyEvent::new("b", Modifiers::CTRL)));

        // Extra shift held means no match.
        let shifted = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::NONE
        };
        assert!(!shortcut.matches(&KeyEvent::new("b", shifted)));

        // No modifiers at all means no match either.
        assert!(!shortcut.matches(&KeyEvent::new("b", Modifiers::NONE)));
    }

    #[test]
    fn test_key_match_case_insensitive() {
        let shortcut = Shortcut::parse("ctrl+K");
        assert!(shortcut.matches(&KeyEvent::new("K", Modifiers::CTRL)));
        assert!(shortcut.matches(&KeyEvent::new("k", Modifiers::CTRL)));
    }

    #[test]
    fn test_space_alias() {
        let shortcut = Shortcut::parse("ctrl+space");
        assert!(shortcut.matches(&KeyEvent::new(" ", Modifiers::CTRL)));
    }

    #[test]
    fn test_description_other_platform() {
        assert_eq!(
            Shortcut::parse("ctrl+shift+k").description(Platform::Other),
            "Ctrl+Shift+K"
        );
        assert_eq!(
            Shortcut::parse("f11").description(Platform::Other),
            "F11"
        );
    }

    #[test]
    fn test_description_apple_glyphs() {
        assert_eq!(
            Shortcut::parse("cmd+shift+k").description(Platform::Apple),
            "⌘⇧K"
        );
        assert_eq!(
            Shortcut::parse("ctrl+alt+b").description(Platform::Apple),
            "⌃⌥B"
        );
    }

    #[test]
    fn test_primary_shortcut_per_platform() {
        let specs: Vec<SmolStr> = vec!["ctrl+b".into(), "cmd+b".into()];
        assert_eq!(
            primary_shortcut(&specs, Platform::Apple).unwrap(),
            "cmd+b"
        );
        assert_eq!(
            primary_shortcut(&specs, Platform::Other).unwrap(),
            "ctrl+b"
        );

        // No platform match falls back to first.
        let bare: Vec<SmolStr> = vec!["f11".into()];
        assert_eq!(primary_shortcut(&bare, Platform::Apple).unwrap(), "f11");
    }

    #[test]
    fn test_focus_scoping() {
        assert!(should_receive_shortcuts(FocusTarget {
            kind: FocusKind::Page,
            within_editor: false,
        }));
        assert!(!should_receive_shortcuts(FocusTarget {
            kind: FocusKind::FormControl,
            within_editor: false,
        }));
        assert!(!should_receive_shortcuts(FocusTarget {
            kind: FocusKind::ForeignTextArea,
            within_editor: false,
        }));
        assert!(should_receive_shortcuts(FocusTarget {
            kind: FocusKind::ForeignTextArea,
            within_editor: true,
        }));
    }
}
