//! Month arithmetic and the 6-week calendar grid.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Cells in the grid: 6 rows of 7 days.
pub const GRID_CELLS: usize = 42;

/// Day headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// First day of `year`-`month`, if that month exists.
pub fn month_first(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// The first of the month `delta` months away from the month of `date`.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = month_start(date);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// The Sunday on or before the first of the month containing `date`.
pub fn grid_start(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first - Days::new(u64::from(first.weekday().num_days_from_sunday()))
}

/// All 42 dates shown for the month containing `date`, row by row.
pub fn month_grid(date: NaiveDate) -> Vec<NaiveDate> {
    grid_start(date)
        .iter_days()
        .take(GRID_CELLS)
        .collect()
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}
