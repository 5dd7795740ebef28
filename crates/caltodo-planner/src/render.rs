//! View models derived from the planner state.
//!
//! Both renderers are pure functions of `PlannerState` (plus today's date for
//! the calendar); counts come from the local cache, never from the server.

use chrono::{Datelike, NaiveDate};

use crate::grid::{month_end, month_grid, weekday_label};
use crate::state::PlannerState;

/// Indicator shown on a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Open,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub open: usize,
    pub done: usize,
    /// At most two marks: open first, then done.
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    /// Open and done items cached for the displayed month.
    pub open: usize,
    pub done: usize,
    pub meta: String,
    pub cells: Vec<DayCell>,
}

impl CalendarView {
    /// The grid as six rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: i64,
    pub text: String,
    pub done: bool,
    /// Edit buffer when the row is in editing state.
    pub editing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListView {
    pub date: NaiveDate,
    pub title: String,
    pub rows: Vec<TodoRow>,
    pub total: usize,
    pub open: usize,
    pub stats: String,
}

impl TodoListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// "{total}개 · {open} 남음"
pub fn stats_label(total: usize, open: usize) -> String {
    format!("{}개 · {} 남음", total, open)
}

/// "{open} 미완료 · {done} 완료"
pub fn month_meta(open: usize, done: usize) -> String {
    format!("{} 미완료 · {} 완료", open, done)
}

pub fn month_title(date: NaiveDate) -> String {
    format!("{}년 {}월", date.year(), date.month())
}

pub fn date_title(date: NaiveDate) -> String {
    format!(
        "{}년 {}월 {}일 ({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date)
    )
}

pub fn render_calendar(state: &PlannerState, today: NaiveDate) -> CalendarView {
    let cells = month_grid(state.current)
        .into_iter()
        .map(|date| {
            let counts = state.store.counts(date);
            let mut marks = Vec::with_capacity(2);
            if counts.open > 0 {
                marks.push(Mark::Open);
            }
            if counts.done > 0 {
                marks.push(Mark::Done);
            }
            DayCell {
                date,
                in_month: date.month() == state.current.month()
                    && date.year() == state.current.year(),
                is_today: date == today,
                is_selected: date == state.selected,
                open: counts.open,
                done: counts.done,
                marks,
            }
        })
        .collect();

    let (open, done) = state
        .store
        .range(state.current, month_end(state.current))
        .flat_map(|(_, items)| items)
        .fold((0, 0), |(open, done), t| {
            if t.done {
                (open, done + 1)
            } else {
                (open + 1, done)
            }
        });

    CalendarView {
        year: state.current.year(),
        month: state.current.month(),
        title: month_title(state.current),
        open,
        done,
        meta: month_meta(open, done),
        cells,
    }
}

pub fn render_todo_list(state: &PlannerState) -> TodoListView {
    let date = state.selected;
    let rows: Vec<TodoRow> = state
        .store
        .items(date)
        .iter()
        .map(|item| TodoRow {
            id: item.id,
            text: item.text.clone(),
            done: item.done,
            editing: state.editor.buffer(item.id).map(str::to_string),
        })
        .collect();

    let total = rows.len();
    let open = rows.iter().filter(|r| !r.done).count();

    TodoListView {
        date,
        title: date_title(date),
        rows,
        total,
        open,
        stats: stats_label(total, open),
    }
}
