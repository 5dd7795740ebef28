//! Capabilities the controller needs from whatever shows the planner.

use crate::render::{CalendarView, TodoListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A modal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Dialogs and rendering, decoupled from the planner logic.
pub trait Frontend {
    /// Ask the user a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Show a modal notice.
    fn notify(&self, notice: Notice);

    /// Redraw both views.
    fn present(&self, calendar: &CalendarView, todos: &TodoListView);
}
