//! Cache population from the backend.

use caltodo_core::AppError;
use caltodo_services::{ServiceError, TodoClient, TodoItem};
use chrono::NaiveDate;
use thiserror::Error;

use crate::grid::{month_end, month_first};
use crate::store::Store;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No such month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<SyncError> for AppError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::InvalidMonth { year, month } => {
                AppError::Service(format!("No such month: {}-{}", year, month))
            }
            SyncError::Service(e) => e.into(),
        }
    }
}

/// Fetch `date` unless it is already loaded. Returns true when a request was
/// made. A failed fetch loads the date as empty.
pub async fn ensure_loaded(client: &TodoClient, store: &mut Store, date: NaiveDate) -> bool {
    if store.is_loaded(date) {
        return false;
    }

    let items = match client.fetch_by_date(date).await {
        Ok(todos) => todos.into_iter().map(TodoItem::from).collect(),
        Err(e) => {
            tracing::warn!("Failed to load todos for {}: {}", date, e);
            Vec::new()
        }
    };
    store.set(date, items);
    true
}

/// Replace every bucket of `year`-`month` with the backend's items.
///
/// This is a full replace, not a merge: edits to dates of this month that the
/// backend has not acknowledged yet are overwritten. On failure the cache is
/// left untouched. Returns the number of items loaded.
pub async fn load_month(
    client: &TodoClient,
    store: &mut Store,
    year: i32,
    month: u32,
) -> Result<usize, SyncError> {
    let from = month_first(year, month).ok_or(SyncError::InvalidMonth { year, month })?;
    let to = month_end(from);

    let todos = client.fetch_range(from, to).await?;
    let count = todos.len();

    let dated = todos.into_iter().filter_map(|todo| match todo.date {
        Some(date) => Some((date, todo.into_item())),
        None => {
            tracing::warn!("Range response item {} has no date, skipping", todo.id);
            None
        }
    });
    store.replace_range(from, to, dated);

    tracing::debug!("Loaded {} todos for {}-{:02}", count, year, month);
    Ok(count)
}
