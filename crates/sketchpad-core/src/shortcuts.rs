//! Keyboard shortcut registry.

use crate::input::Modifiers;

/// Editor action bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Undo,
    Redo,
    Cancel,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: Action,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, shift: bool, action: Action) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.ctrl
            && self.shift == modifiers.shift
    }
}

static SHORTCUTS: [Shortcut; 3] = [
    Shortcut::new("Z", true, false, Action::Undo),
    Shortcut::new("Y", true, false, Action::Redo),
    Shortcut::new("Escape", false, false, Action::Cancel),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        &SHORTCUTS
    }

    /// Find the action bound to `key` with `modifiers` held.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<Action> {
        SHORTCUTS
            .iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }
}
