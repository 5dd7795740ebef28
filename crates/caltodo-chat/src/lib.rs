//! Chatbot panel for CalTodo.
//!
//! A request/response conversation: one POST per message with a bounded
//! trailing history, one request in flight at a time.

pub mod panel;

pub use panel::{
    Bubble, ChatPanel, PanelState, PendingReply, EMPTY_REPLY, HISTORY_WINDOW, HTTP_FAILURE,
    NETWORK_FAILURE, PLACEHOLDER, WELCOME_MESSAGE,
};
