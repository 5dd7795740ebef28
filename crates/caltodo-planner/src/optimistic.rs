//! Apply-then-confirm updates.
//!
//! A `Tentative` holds the value a slot had before an optimistic change.
//! The caller must settle it: `commit` once the backend confirms, or
//! `rollback` to restore the slot.

#[must_use = "a tentative change must be committed or rolled back"]
#[derive(Debug)]
pub struct Tentative<T> {
    previous: T,
}

impl<T> Tentative<T> {
    /// Write `value` into `slot`, remembering what was there.
    pub fn apply(slot: &mut T, value: T) -> Self {
        let previous = std::mem::replace(slot, value);
        Self { previous }
    }

    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Keep the applied value.
    pub fn commit(self) {}

    /// Restore the value the slot had before `apply`.
    pub fn rollback(self, slot: &mut T) {
        *slot = self.previous;
    }
}
