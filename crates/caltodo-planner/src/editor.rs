//! Inline edit state of the to-do rows.
//!
//! Each item is either viewing or editing; an editing item owns a text
//! buffer that is only sent to the backend on save.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Editing { buffer: String },
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    sessions: HashMap<i64, String>,
}

impl Editor {
    pub fn state(&self, id: i64) -> EditState {
        match self.sessions.get(&id) {
            Some(buffer) => EditState::Editing {
                buffer: buffer.clone(),
            },
            None => EditState::Viewing,
        }
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn buffer(&self, id: i64) -> Option<&str> {
        self.sessions.get(&id).map(String::as_str)
    }

    /// viewing → editing, seeded with the current text. An item already being
    /// edited keeps its buffer.
    pub fn begin(&mut self, id: i64, current_text: &str) {
        self.sessions
            .entry(id)
            .or_insert_with(|| current_text.to_string());
    }

    /// Replace the buffer of an item being edited. Returns false when the item
    /// is not in editing state.
    pub fn set_buffer(&mut self, id: i64, text: &str) -> bool {
        match self.sessions.get_mut(&id) {
            Some(buffer) => {
                *buffer = text.to_string();
                true
            }
            None => false,
        }
    }

    /// editing → viewing without saving.
    pub fn cancel(&mut self, id: i64) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// editing → viewing after the backend accepted the edit.
    pub fn finish(&mut self, id: i64) {
        self.sessions.remove(&id);
    }

    /// Drop every session, e.g. when another date is shown.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Drop sessions of items that no longer exist.
    pub fn retain_items(&mut self, ids: &[i64]) {
        self.sessions.retain(|id, _| ids.contains(id));
    }
}
