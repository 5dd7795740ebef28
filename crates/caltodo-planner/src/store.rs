//! Date-keyed to-do cache.
//!
//! A date present in the map is "fully loaded"; an absent date must be
//! fetched before it can be trusted. The whole map is mirrored to local
//! storage after every mutation.

use std::collections::BTreeMap;

use caltodo_core::StorageError;
use caltodo_services::TodoItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::{LocalStorage, PLANNER_DATA_KEY};

/// Open and done counts of one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCounts {
    pub open: usize,
    pub done: usize,
}

impl DayCounts {
    pub fn total(&self) -> usize {
        self.open + self.done
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    days: BTreeMap<NaiveDate, Vec<TodoItem>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from local storage. Missing or unreadable data yields an
    /// empty store.
    pub fn restore(storage: &dyn LocalStorage) -> Self {
        let raw = match storage.get_item(PLANNER_DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read cached planner data: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Discarding unreadable planner data: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize the entire map into local storage.
    pub fn persist(&self, storage: &dyn LocalStorage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(PLANNER_DATA_KEY, &json)
    }

    pub fn is_loaded(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&[TodoItem]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    /// Items of `date`, empty when the date is not loaded.
    pub fn items(&self, date: NaiveDate) -> &[TodoItem] {
        self.get(date).unwrap_or(&[])
    }

    pub fn item(&self, date: NaiveDate, id: i64) -> Option<&TodoItem> {
        self.items(date).iter().find(|t| t.id == id)
    }

    pub fn item_mut(&mut self, date: NaiveDate, id: i64) -> Option<&mut TodoItem> {
        self.days.get_mut(&date)?.iter_mut().find(|t| t.id == id)
    }

    /// Replace the whole bucket of `date`.
    pub fn set(&mut self, date: NaiveDate, items: Vec<TodoItem>) {
        self.days.insert(date, items);
    }

    pub fn counts(&self, date: NaiveDate) -> DayCounts {
        self.items(date)
            .iter()
            .fold(DayCounts::default(), |mut acc, t| {
                if t.done {
                    acc.done += 1;
                } else {
                    acc.open += 1;
                }
                acc
            })
    }

    /// Drop every bucket in `[from, to]`, then rebuild them from `items`.
    ///
    /// Dates in range with no items end up absent. Items dated outside the
    /// range are ignored and buckets outside the range are never touched.
    pub fn replace_range<I>(&mut self, from: NaiveDate, to: NaiveDate, items: I)
    where
        I: IntoIterator<Item = (NaiveDate, TodoItem)>,
    {
        self.days.retain(|date, _| *date < from || *date > to);

        for (date, item) in items {
            if date < from || date > to {
                tracing::warn!("Ignoring item {} dated {} outside {}..={}", item.id, date, from, to);
                continue;
            }
            self.days.entry(date).or_default().push(item);
        }
    }

    /// Buckets in `[from, to]`, in date order.
    pub fn range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, &[TodoItem])> {
        self.days
            .range(from..=to)
            .map(|(date, items)| (*date, items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
