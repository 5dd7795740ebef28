//! REST clients for the CalTodo backend.

pub mod chat;
pub mod error;
mod http;
pub mod summary;
pub mod todo;

pub use chat::{ChatClient, ChatMessage, ChatRequest, ChatResponse, ChatRole};
pub use error::ServiceError;
pub use summary::{SummaryClient, SummaryRequest, SummaryResponse, SummaryTodo};
pub use todo::{TodoClient, TodoCreateRequest, TodoItem, TodoResponse, TodoUpdateRequest, DATE_FORMAT};
