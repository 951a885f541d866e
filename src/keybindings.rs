//! Keyboard shortcuts for the editor.

use serde::{Deserialize, Serialize};

use crate::event::Key;

/// Action a key press maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    DeleteSelected,
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Keys that delete the selected core
    #[serde(default = "default_delete_keys")]
    pub delete_selected: Vec<Key>,
}

fn default_delete_keys() -> Vec<Key> {
    vec![Key::Delete, Key::Backspace]
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            delete_selected: default_delete_keys(),
        }
    }
}

impl KeyBindings {
    /// Look up the action bound to `key`.
    pub fn action_for(&self, key: Key) -> Option<KeyAction> {
        self.delete_selected
            .contains(&key)
            .then_some(KeyAction::DeleteSelected)
    }
}
