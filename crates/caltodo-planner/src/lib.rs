//! Calendar and to-do planner for CalTodo.
//!
//! Keeps a per-date cache of to-do items in sync with the backend, mirrors it
//! to local storage, and renders the month grid and day list.

pub mod clock;
pub mod controller;
pub mod editor;
pub mod frontend;
pub mod grid;
pub mod optimistic;
pub mod prefs;
pub mod render;
pub mod state;
pub mod storage;
pub mod store;
pub mod sync;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{BulkDeleteOutcome, PlannerController};
pub use editor::{EditState, Editor};
pub use frontend::{Frontend, Notice, NoticeKind};
pub use optimistic::Tentative;
pub use prefs::Theme;
pub use render::{CalendarView, DayCell, Mark, TodoListView, TodoRow};
pub use state::PlannerState;
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, PLANNER_DATA_KEY, THEME_KEY};
pub use store::{DayCounts, Store};
pub use sync::SyncError;
