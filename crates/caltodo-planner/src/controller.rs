//! Planner controller.
//!
//! Owns the planner state and drives every user action through the same
//! sequence: remote call (awaited) → cache mutation → persist → re-render.
//! Operations take `&mut self`, so handlers never interleave.
//!
//! Remote failures are caught here: the state is left safe (rolled back or
//! unchanged), the user gets an error notice, and the error is returned for
//! the caller to log or ignore.

use caltodo_core::AppError;
use caltodo_services::{
    ServiceError, SummaryClient, SummaryRequest, SummaryResponse, SummaryTodo, TodoClient,
    TodoItem,
};
use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::frontend::{Frontend, Notice};
use crate::grid::month_end;
use crate::optimistic::Tentative;
use crate::prefs::Theme;
use crate::render::{render_calendar, render_todo_list};
use crate::state::PlannerState;
use crate::storage::LocalStorage;
use crate::store::Store;
use crate::sync;

/// Result of a clear-done or clear-all run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    pub deleted: usize,
    pub failed: usize,
}

pub struct PlannerController<F: Frontend> {
    state: PlannerState,
    todos: TodoClient,
    summaries: SummaryClient,
    storage: Box<dyn LocalStorage>,
    frontend: F,
    clock: Box<dyn Clock>,
    theme: Theme,
}

impl<F: Frontend> PlannerController<F> {
    /// Build a controller, rehydrating the cache and theme from `storage`.
    /// The session opens on the clock's current date.
    pub fn new(
        todos: TodoClient,
        summaries: SummaryClient,
        storage: Box<dyn LocalStorage>,
        frontend: F,
        clock: impl Clock + 'static,
    ) -> Self {
        let store = Store::restore(storage.as_ref());
        let theme = Theme::load(storage.as_ref());
        tracing::debug!("Restored {} cached days, theme {}", store.len(), theme);

        Self {
            state: PlannerState::new(store, clock.today()),
            todos,
            summaries,
            storage,
            frontend,
            clock: Box::new(clock),
            theme,
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn storage(&self) -> &dyn LocalStorage {
        self.storage.as_ref()
    }

    /// Load the displayed month and the selected day, then render.
    pub async fn start(&mut self) -> Result<(), AppError> {
        let result = self.load_current_month().await;
        self.ensure_loaded(self.state.selected).await;
        self.render();
        result.map(|_| ())
    }

    /// Hand fresh views of the current state to the frontend.
    pub fn render(&self) {
        let calendar = render_calendar(&self.state, self.clock.today());
        let todos = render_todo_list(&self.state);
        self.frontend.present(&calendar, &todos);
    }

    /// Replace a day's items, mirror the store to local storage, re-render.
    pub fn set_todos(&mut self, date: NaiveDate, items: Vec<TodoItem>) {
        if date == self.state.selected {
            let ids: Vec<i64> = items.iter().map(|t| t.id).collect();
            self.state.editor.retain_items(&ids);
        }
        self.state.store.set(date, items);
        self.persist();
        self.render();
    }

    /// Fetch `date` if it is not cached yet. Failures load it as empty.
    pub async fn ensure_loaded(&mut self, date: NaiveDate) -> bool {
        let fetched = sync::ensure_loaded(&self.todos, &mut self.state.store, date).await;
        if fetched {
            self.persist();
        }
        fetched
    }

    /// Replace the cached buckets of `year`-`month` with the backend's items.
    ///
    /// On failure the previous cache is kept.
    pub async fn load_month(&mut self, year: i32, month: u32) -> Result<usize, AppError> {
        match sync::load_month(&self.todos, &mut self.state.store, year, month).await {
            Ok(count) => {
                self.persist();
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load {}-{:02}: {}", year, month, e);
                Err(e.into())
            }
        }
    }

    async fn load_current_month(&mut self) -> Result<usize, AppError> {
        let current = self.state.current;
        self.load_month(current.year(), current.month()).await
    }

    /// Select a day cell. Never issues a month range fetch.
    pub async fn select_date(&mut self, date: NaiveDate) {
        self.state.select(date);
        self.ensure_loaded(date).await;
        self.render();
    }

    /// Show the month `delta` months away. The selected day is unchanged.
    pub async fn show_month(&mut self, delta: i32) -> Result<(), AppError> {
        self.state.navigate(delta);
        let result = self.load_current_month().await;
        self.render();
        result.map(|_| ())
    }

    pub async fn show_previous_month(&mut self) -> Result<(), AppError> {
        self.show_month(-1).await
    }

    pub async fn show_next_month(&mut self) -> Result<(), AppError> {
        self.show_month(1).await
    }

    /// Select the clock's current date and reload its month.
    pub async fn show_today(&mut self) -> Result<(), AppError> {
        self.state.select(self.clock.today());
        let result = self.load_current_month().await;
        self.ensure_loaded(self.state.selected).await;
        self.render();
        result.map(|_| ())
    }

    /// Create an item at the top of the selected day. Blank text is ignored.
    pub async fn add_todo(&mut self, text: &str) -> Result<Option<i64>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let date = self.state.selected;
        self.ensure_loaded(date).await;

        match self.todos.create(text, date).await {
            Ok(created) => {
                let item = created.into_item();
                let id = item.id;
                let mut items = self.state.store.items(date).to_vec();
                items.insert(0, item);
                self.set_todos(date, items);
                Ok(Some(id))
            }
            Err(e) => Err(self.report("할 일을 추가하지 못했습니다", e)),
        }
    }

    /// viewing → editing for an item of the selected day.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        let date = self.state.selected;
        let Some(text) = self.state.store.item(date, id).map(|t| t.text.clone()) else {
            return false;
        };
        self.state.editor.begin(id, &text);
        self.render();
        true
    }

    pub fn update_edit_buffer(&mut self, id: i64, text: &str) -> bool {
        let updated = self.state.editor.set_buffer(id, text);
        if updated {
            self.render();
        }
        updated
    }

    /// editing → viewing, discarding the buffer.
    pub fn cancel_edit(&mut self, id: i64) -> bool {
        let cancelled = self.state.editor.cancel(id);
        if cancelled {
            self.render();
        }
        cancelled
    }

    /// Send the edit buffer. The row returns to viewing either way: with the
    /// server's text on success, with its old text on failure.
    pub async fn save_edit(&mut self, id: i64) -> Result<bool, AppError> {
        let date = self.state.selected;
        let Some(text) = self.state.editor.buffer(id).map(|b| b.trim().to_string()) else {
            return Ok(false);
        };
        if text.is_empty() {
            return Ok(false);
        }
        let Some(done) = self.state.store.item(date, id).map(|t| t.done) else {
            self.state.editor.finish(id);
            self.render();
            return Ok(false);
        };

        match self.todos.update(id, &text, done).await {
            Ok(updated) => {
                let mut items = self.state.store.items(date).to_vec();
                if let Some(slot) = items.iter_mut().find(|t| t.id == id) {
                    *slot = updated.into_item();
                }
                self.state.editor.finish(id);
                self.set_todos(date, items);
                Ok(true)
            }
            Err(e) => {
                self.state.editor.finish(id);
                self.render();
                Err(self.report("할 일을 수정하지 못했습니다", e))
            }
        }
    }

    /// Flip `done` optimistically; roll back if the backend rejects it.
    ///
    /// Returns the confirmed `done` value, or `None` for an unknown item.
    pub async fn toggle_done(&mut self, id: i64) -> Result<Option<bool>, AppError> {
        let date = self.state.selected;
        let Some(item) = self.state.store.item_mut(date, id) else {
            return Ok(None);
        };
        let text = item.text.clone();
        let next = !item.done;
        let tentative = Tentative::apply(&mut item.done, next);
        self.render();

        match self.todos.update(id, &text, next).await {
            Ok(updated) => {
                tentative.commit();
                let confirmed = updated.done;
                let mut items = self.state.store.items(date).to_vec();
                if let Some(slot) = items.iter_mut().find(|t| t.id == id) {
                    *slot = updated.into_item();
                }
                self.set_todos(date, items);
                Ok(Some(confirmed))
            }
            Err(e) => {
                match self.state.store.item_mut(date, id) {
                    Some(item) => tentative.rollback(&mut item.done),
                    None => drop(tentative),
                }
                self.render();
                Err(self.report("완료 상태를 변경하지 못했습니다", e))
            }
        }
    }

    /// Ask for confirmation, then delete. Returns false when declined.
    pub async fn delete_todo(&mut self, id: i64) -> Result<bool, AppError> {
        if self.state.store.item(self.state.selected, id).is_none() {
            return Ok(false);
        }
        if !self.frontend.confirm("이 할 일을 삭제할까요?") {
            return Ok(false);
        }
        self.perform_delete(id).await
    }

    /// Delete without asking. Removes exactly the entry with `id`.
    pub async fn perform_delete(&mut self, id: i64) -> Result<bool, AppError> {
        let date = self.state.selected;

        match self.todos.delete(id).await {
            Ok(()) => {
                let mut items = self.state.store.items(date).to_vec();
                let Some(pos) = items.iter().position(|t| t.id == id) else {
                    return Ok(false);
                };
                items.remove(pos);
                self.state.editor.finish(id);
                self.set_todos(date, items);
                self.frontend
                    .notify(Notice::success("삭제 완료", "할 일이 삭제되었습니다."));
                Ok(true)
            }
            Err(e) => Err(self.report("할 일을 삭제하지 못했습니다", e)),
        }
    }

    /// Delete every done item of the selected day, one call at a time, then
    /// reconcile the day from the backend.
    pub async fn clear_done(&mut self) -> Result<BulkDeleteOutcome, AppError> {
        let date = self.state.selected;
        let done_ids: Vec<i64> = self
            .state
            .store
            .items(date)
            .iter()
            .filter(|t| t.done)
            .map(|t| t.id)
            .collect();

        if done_ids.is_empty() {
            self.frontend
                .notify(Notice::info("알림", "삭제할 완료 항목이 없습니다."));
            return Ok(BulkDeleteOutcome::default());
        }
        if !self
            .frontend
            .confirm(&format!("완료된 할 일 {}개를 삭제할까요?", done_ids.len()))
        {
            return Ok(BulkDeleteOutcome::default());
        }

        let (deleted, failed) = self.delete_each(&done_ids).await;

        let items = match self.todos.fetch_by_date(date).await {
            Ok(todos) => todos.into_iter().map(TodoItem::from).collect(),
            Err(e) => {
                tracing::warn!("Re-fetch after clearing {} failed: {}", date, e);
                self.state
                    .store
                    .items(date)
                    .iter()
                    .filter(|t| !deleted.contains(&t.id))
                    .cloned()
                    .collect()
            }
        };
        self.set_todos(date, items);

        let outcome = BulkDeleteOutcome {
            deleted: deleted.len(),
            failed,
        };
        self.report_bulk("완료 항목 삭제", outcome);
        Ok(outcome)
    }

    /// Delete every item of the selected day, one call at a time. The day is
    /// assumed empty afterwards.
    pub async fn clear_all(&mut self) -> Result<BulkDeleteOutcome, AppError> {
        let date = self.state.selected;
        let ids: Vec<i64> = self.state.store.items(date).iter().map(|t| t.id).collect();

        if ids.is_empty() {
            self.frontend
                .notify(Notice::info("알림", "삭제할 할 일이 없습니다."));
            return Ok(BulkDeleteOutcome::default());
        }
        if !self
            .frontend
            .confirm(&format!("이 날의 할 일 {}개를 모두 삭제할까요?", ids.len()))
        {
            return Ok(BulkDeleteOutcome::default());
        }

        let (deleted, failed) = self.delete_each(&ids).await;
        self.state.editor.clear();
        self.set_todos(date, Vec::new());

        let outcome = BulkDeleteOutcome {
            deleted: deleted.len(),
            failed,
        };
        self.report_bulk("전체 삭제", outcome);
        Ok(outcome)
    }

    async fn delete_each(&self, ids: &[i64]) -> (Vec<i64>, usize) {
        let mut deleted = Vec::with_capacity(ids.len());
        let mut failed = 0;
        for &id in ids {
            match self.todos.delete(id).await {
                Ok(()) => deleted.push(id),
                Err(e) => {
                    tracing::warn!("Failed to delete todo {}: {}", id, e);
                    failed += 1;
                }
            }
        }
        (deleted, failed)
    }

    /// Summarize the displayed month. Cached items are sent along; with none
    /// cached the backend summarizes its own data.
    pub async fn summarize_month(&mut self) -> Result<SummaryResponse, AppError> {
        let from = self.state.current;
        let to = month_end(from);
        let todos: Vec<SummaryTodo> = self
            .state
            .store
            .range(from, to)
            .flat_map(|(date, items)| {
                items.iter().map(move |t| SummaryTodo {
                    id: t.id.to_string(),
                    text: t.text.clone(),
                    done: t.done,
                    date,
                })
            })
            .collect();

        let result = if todos.is_empty() {
            self.summaries.summarize_range(from, to).await
        } else {
            let request = SummaryRequest { from, to, todos };
            self.summaries.summarize(&request).await
        };

        result.map_err(|e| self.report("일정을 요약하지 못했습니다", e))
    }

    /// Flip and persist the theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.theme.save(self.storage.as_ref()) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
        self.theme
    }

    fn persist(&self) {
        if let Err(e) = self.state.store.persist(self.storage.as_ref()) {
            tracing::warn!("Failed to mirror planner data to local storage: {}", e);
        }
    }

    fn report(&self, title: &str, e: ServiceError) -> AppError {
        tracing::error!("{}: {}", title, e);
        self.frontend.notify(Notice::error(title, e.user_message()));
        e.into()
    }

    fn report_bulk(&self, title: &str, outcome: BulkDeleteOutcome) {
        if outcome.failed > 0 {
            self.frontend.notify(Notice::error(
                title,
                format!(
                    "{}개 삭제, {}개는 삭제하지 못했습니다.",
                    outcome.deleted, outcome.failed
                ),
            ));
        } else {
            self.frontend.notify(Notice::success(
                title,
                format!("{}개를 삭제했습니다.", outcome.deleted),
            ));
        }
    }
}
