//! Planner state owned by the controller.

use chrono::NaiveDate;

use crate::editor::Editor;
use crate::grid::{month_start, shift_month};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct PlannerState {
    pub store: Store,
    /// First day of the displayed month.
    pub current: NaiveDate,
    /// Day whose list is shown.
    pub selected: NaiveDate,
    pub editor: Editor,
}

impl PlannerState {
    /// Start on `today`'s month with `today` selected.
    pub fn new(store: Store, today: NaiveDate) -> Self {
        Self {
            store,
            current: month_start(today),
            selected: today,
            editor: Editor::default(),
        }
    }

    /// Select a day and display its month. Returns true when the month changed.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        if date != self.selected {
            self.editor.clear();
        }
        let month = month_start(date);
        let changed = month != self.current;
        self.selected = date;
        self.current = month;
        changed
    }

    /// Move the displayed month by `delta`. The selected day and any edit in
    /// progress are left alone.
    pub fn navigate(&mut self, delta: i32) {
        self.current = shift_month(self.current, delta);
    }
}
