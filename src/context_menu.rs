//! Right-click menu state.
//!
//! The menu only tracks where it was opened and which core it targets. The
//! host draws it from [`ContextMenu::items`] and reports the chosen action
//! back to the editor.

use serde::Serialize;

use crate::model::Point;

/// Command behind a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "index", rename_all = "lowercase")]
pub enum MenuAction {
    /// Append a core below the last one.
    Add,
    /// Delete the targeted core.
    Delete(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub action: MenuAction,
    pub label: String,
}

impl MenuItem {
    pub fn new(action: MenuAction, label: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMenu {
    open: bool,
    /// Canvas pixel position the menu was opened at.
    position: Point,
    /// Core under the pointer when the menu opened.
    target: Option<usize>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, position: Point, target: Option<usize>) {
        log::debug!("Context menu: opened at {:?} targeting {:?}", position, target);
        self.open = true;
        self.position = position;
        self.target = target;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.target = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Follow the targeted core across a reorder or deletion.
    pub fn retarget(&mut self, target: Option<usize>) {
        self.target = target;
    }

    /// Entries to show: always "Add", plus "Delete" when a core is targeted.
    pub fn items(&self) -> Vec<MenuItem> {
        if !self.open {
            return Vec::new();
        }

        let mut items = vec![MenuItem::new(MenuAction::Add, "Add")];
        if let Some(index) = self.target {
            items.push(MenuItem::new(MenuAction::Delete(index), "Delete"));
        }
        items
    }
}
