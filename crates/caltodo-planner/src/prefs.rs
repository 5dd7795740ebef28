//! Theme preference.

use std::fmt;

use caltodo_core::StorageError;

use crate::storage::{LocalStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Stored preference; anything unreadable falls back to light.
    pub fn load(storage: &dyn LocalStorage) -> Self {
        match storage.get_item(THEME_KEY) {
            Ok(Some(value)) => Self::parse(&value).unwrap_or_default(),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(self, storage: &dyn LocalStorage) -> Result<(), StorageError> {
        storage.set_item(THEME_KEY, self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
