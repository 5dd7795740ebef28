//! Integration tests for PlannerController against a mocked backend.

use std::sync::Arc;

use caltodo_planner::{
    CalendarView, Clock, FixedClock, Frontend, LocalStorage, MemoryStorage, Notice, NoticeKind,
    PlannerController, TodoListView, PLANNER_DATA_KEY, THEME_KEY,
};
use caltodo_services::{SummaryClient, TodoClient};
use chrono::NaiveDate;
use parking_lot::Mutex;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingFrontend {
    answer: bool,
    confirms: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
    lists: Mutex<Vec<TodoListView>>,
    calendars: Mutex<Vec<CalendarView>>,
}

impl RecordingFrontend {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    fn last_list(&self) -> TodoListView {
        self.lists.lock().last().cloned().unwrap()
    }

    fn last_calendar(&self) -> CalendarView {
        self.calendars.lock().last().cloned().unwrap()
    }

    fn notice_kinds(&self) -> Vec<NoticeKind> {
        self.notices.lock().iter().map(|n| n.kind).collect()
    }
}

impl Frontend for RecordingFrontend {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().push(message.to_string());
        self.answer
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }

    fn present(&self, calendar: &CalendarView, todos: &TodoListView) {
        self.calendars.lock().push(calendar.clone());
        self.lists.lock().push(todos.clone());
    }
}

/// Clock the test can move forward while the controller holds it.
#[derive(Clone)]
struct SharedClock(Arc<Mutex<NaiveDate>>);

impl SharedClock {
    fn set(&self, today: NaiveDate) {
        *self.0.lock() = today;
    }
}

impl Clock for SharedClock {
    fn today(&self) -> NaiveDate {
        *self.0.lock()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn todo_json(id: i64, text: &str, done: bool, date: &str) -> serde_json::Value {
    serde_json::json!({ "id": id, "text": text, "done": done, "date": date })
}

fn seeded(data: serde_json::Value) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage
        .set_item(PLANNER_DATA_KEY, &data.to_string())
        .unwrap();
    storage
}

fn controller(
    server: &MockServer,
    storage: MemoryStorage,
    frontend: RecordingFrontend,
) -> PlannerController<RecordingFrontend> {
    PlannerController::new(
        TodoClient::new(&server.uri()).unwrap(),
        SummaryClient::new(&server.uri()).unwrap(),
        Box::new(storage),
        frontend,
        FixedClock(date(2024, 6, 15)),
    )
}

fn stored(storage: &MemoryStorage) -> serde_json::Value {
    let raw = storage.get_item(PLANNER_DATA_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_select_date_loads_and_renders_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(query_param("date", "2024-06-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            todo_json(1, "buy milk", false, "2024-06-15"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemoryStorage::new();
    let mut planner = controller(&server, storage.clone(), RecordingFrontend::default());
    planner.select_date(date(2024, 6, 15)).await;
    // Already cached, no second request.
    planner.select_date(date(2024, 6, 15)).await;

    let list = planner.frontend().last_list();
    assert_eq!(list.stats, "1개 · 1 남음");
    assert_eq!(list.rows[0].text, "buy milk");
    assert_eq!(
        stored(&storage)["2024-06-15"],
        serde_json::json!([{ "id": 1, "text": "buy milk", "done": false }])
    );
}

#[tokio::test]
async fn test_failed_fetch_loads_date_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut planner = controller(&server, MemoryStorage::new(), RecordingFrontend::default());
    planner.select_date(date(2024, 6, 15)).await;

    assert!(planner.state().store.is_loaded(date(2024, 6, 15)));
    assert!(planner.frontend().last_list().is_empty());
}

#[tokio::test]
async fn test_start_loads_month_without_per_date_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos/range"))
        .and(query_param("from", "2024-06-01"))
        .and(query_param("to", "2024-06-30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            todo_json(1, "buy milk", false, "2024-06-15"),
            todo_json(2, "report", true, "2024-06-03"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut planner = controller(&server, MemoryStorage::new(), RecordingFrontend::default());
    planner.start().await.unwrap();

    let frontend = planner.frontend();
    assert_eq!(frontend.last_list().stats, "1개 · 1 남음");
    let calendar = frontend.calendars.lock().last().cloned().unwrap();
    let third = calendar
        .cells
        .iter()
        .find(|c| c.date == date(2024, 6, 3))
        .unwrap();
    assert_eq!((third.open, third.done), (0, 1));
    assert_eq!(calendar.meta, "1 미완료 · 1 완료");
}

#[tokio::test]
async fn test_load_month_replaces_only_its_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos/range"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            todo_json(5, "new", false, "2024-06-20"),
        ])))
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-05-31": [{ "id": 1, "text": "may", "done": false }],
        "2024-06-10": [{ "id": 2, "text": "stale", "done": false }],
    }));
    let mut planner = controller(&server, storage.clone(), RecordingFrontend::default());
    assert_eq!(planner.load_month(2024, 6).await.unwrap(), 1);

    let store = &planner.state().store;
    assert_eq!(store.items(date(2024, 5, 31))[0].text, "may");
    assert!(!store.is_loaded(date(2024, 6, 10)));
    assert_eq!(store.items(date(2024, 6, 20))[0].id, 5);
    assert!(stored(&storage).get("2024-06-10").is_none());
}

#[tokio::test]
async fn test_load_month_failure_keeps_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos/range"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-10": [{ "id": 2, "text": "kept", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    assert!(planner.load_month(2024, 6).await.is_err());
    assert_eq!(planner.state().store.items(date(2024, 6, 10))[0].text, "kept");
}

#[tokio::test]
async fn test_add_todo_prepends_server_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .and(body_json(serde_json::json!({ "text": "gym", "date": "2024-06-15" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(todo_json(9, "gym", false, "2024-06-15")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    assert_eq!(planner.add_todo("   ").await.unwrap(), None);
    assert_eq!(planner.add_todo("  gym ").await.unwrap(), Some(9));

    let list = planner.frontend().last_list();
    assert_eq!(list.rows.len(), 2);
    assert_eq!(list.rows[0].id, 9);
    assert_eq!(list.rows[1].id, 1);
    assert_eq!(list.stats, "2개 · 2 남음");
}

#[tokio::test]
async fn test_failed_toggle_rolls_back() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    assert!(planner.toggle_done(1).await.is_err());
    assert!(!planner.state().store.item(date(2024, 6, 15), 1).unwrap().done);

    let frontend = planner.frontend();
    let lists = frontend.lists.lock();
    // Optimistic frame, then the rolled-back one.
    assert!(lists[lists.len() - 2].rows[0].done);
    assert!(!lists[lists.len() - 1].rows[0].done);
    drop(lists);
    assert_eq!(frontend.notice_kinds(), vec![NoticeKind::Error]);
}

#[tokio::test]
async fn test_toggle_commits_server_item() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/1"))
        .and(body_json(serde_json::json!({ "text": "buy milk", "done": true })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(todo_json(1, "buy milk", true, "2024-06-15")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage.clone(), RecordingFrontend::default());

    assert_eq!(planner.toggle_done(1).await.unwrap(), Some(true));
    assert_eq!(planner.toggle_done(42).await.unwrap(), None);
    assert_eq!(stored(&storage)["2024-06-15"][0]["done"], true);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [
            { "id": 1, "text": "buy milk", "done": false },
            { "id": 2, "text": "gym", "done": true }
        ],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(true));

    assert!(planner.delete_todo(1).await.unwrap());
    let items = planner.state().store.items(date(2024, 6, 15));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 2);

    assert_eq!(planner.frontend().notice_kinds(), vec![NoticeKind::Success]);
    let notice = planner.frontend().notices.lock()[0].clone();
    assert_eq!(notice.title, "삭제 완료");
    assert_eq!(notice.message, "할 일이 삭제되었습니다.");
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(false));

    assert!(!planner.delete_todo(1).await.unwrap());
    assert_eq!(planner.state().store.items(date(2024, 6, 15)).len(), 1);
    assert_eq!(planner.frontend().confirms.lock().len(), 1);
}

#[tokio::test]
async fn test_delete_failure_keeps_item() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "status": 404, "message": "Todo not found: 1" })),
        )
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(true));

    assert!(planner.delete_todo(1).await.is_err());
    assert_eq!(planner.state().store.items(date(2024, 6, 15)).len(), 1);
    assert_eq!(planner.frontend().notice_kinds(), vec![NoticeKind::Error]);
}

#[tokio::test]
async fn test_clear_done_reconciles_from_backend() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(query_param("date", "2024-06-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            todo_json(2, "b", true, "2024-06-15"),
            todo_json(3, "c", false, "2024-06-15"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [
            { "id": 1, "text": "a", "done": true },
            { "id": 2, "text": "b", "done": true },
            { "id": 3, "text": "c", "done": false }
        ],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(true));

    let outcome = planner.clear_done().await.unwrap();
    assert_eq!((outcome.deleted, outcome.failed), (1, 1));

    let ids: Vec<i64> = planner
        .state()
        .store
        .items(date(2024, 6, 15))
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(planner.frontend().notice_kinds(), vec![NoticeKind::Error]);
}

#[tokio::test]
async fn test_clear_done_falls_back_when_refetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [
            { "id": 1, "text": "a", "done": true },
            { "id": 3, "text": "c", "done": false }
        ],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(true));

    let outcome = planner.clear_done().await.unwrap();
    assert_eq!((outcome.deleted, outcome.failed), (1, 0));
    let items = planner.state().store.items(date(2024, 6, 15));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 3);
}

#[tokio::test]
async fn test_clear_done_with_nothing_done() {
    let server = MockServer::start().await;
    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 3, "text": "c", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(true));

    assert_eq!(planner.clear_done().await.unwrap().deleted, 0);
    assert!(planner.frontend().confirms.lock().is_empty());
    assert_eq!(planner.frontend().notice_kinds(), vec![NoticeKind::Info]);
}

#[tokio::test]
async fn test_clear_all_empties_day_even_with_failures() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [
            { "id": 1, "text": "a", "done": true },
            { "id": 2, "text": "b", "done": false }
        ],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::answering(true));

    let outcome = planner.clear_all().await.unwrap();
    assert_eq!((outcome.deleted, outcome.failed), (1, 1));
    assert!(planner.state().store.is_loaded(date(2024, 6, 15)));
    assert!(planner.state().store.items(date(2024, 6, 15)).is_empty());
}

#[tokio::test]
async fn test_save_edit_uses_server_echo() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/1"))
        .and(body_json(serde_json::json!({ "text": "buy oat milk", "done": false })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(todo_json(1, "Buy oat milk", false, "2024-06-15")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    assert!(planner.begin_edit(1));
    assert_eq!(
        planner.frontend().last_list().rows[0].editing.as_deref(),
        Some("buy milk")
    );
    assert!(planner.update_edit_buffer(1, "  buy oat milk "));
    assert!(planner.save_edit(1).await.unwrap());

    let list = planner.frontend().last_list();
    let row = &list.rows[0];
    assert_eq!(row.text, "Buy oat milk");
    assert_eq!(row.editing, None);
}

#[tokio::test]
async fn test_save_edit_failure_returns_to_viewing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    planner.begin_edit(1);
    planner.update_edit_buffer(1, "changed");
    assert!(planner.save_edit(1).await.is_err());

    assert!(!planner.state().editor.is_editing(1));
    assert_eq!(planner.state().editor.buffer(1), None);
    assert_eq!(planner.state().store.items(date(2024, 6, 15))[0].text, "buy milk");

    let list = planner.frontend().last_list();
    assert_eq!(list.rows[0].editing, None);
    assert_eq!(list.rows[0].text, "buy milk");
    assert_eq!(planner.frontend().notice_kinds(), vec![NoticeKind::Error]);
}

#[tokio::test]
async fn test_blank_edit_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    planner.begin_edit(1);
    planner.update_edit_buffer(1, "   ");
    assert!(!planner.save_edit(1).await.unwrap());
    assert!(planner.state().editor.is_editing(1));
}

#[tokio::test]
async fn test_navigation_keeps_selected_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos/range"))
        .and(query_param("from", "2024-07-01"))
        .and(query_param("to", "2024-07-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            todo_json(7, "trip", false, "2024-07-01"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());
    planner.begin_edit(1);
    planner.show_next_month().await.unwrap();

    assert_eq!(planner.state().selected, date(2024, 6, 15));
    assert_eq!(planner.state().current, date(2024, 7, 1));
    assert!(planner.state().editor.is_editing(1));

    let calendar = planner.frontend().last_calendar();
    assert_eq!(calendar.title, "2024년 7월");
    assert_eq!(calendar.meta, "1 미완료 · 0 완료");
    let first = calendar.cells.iter().find(|c| c.date == date(2024, 7, 1)).unwrap();
    assert!(first.in_month && !first.is_selected);
    assert_eq!(first.open, 1);

    let list = planner.frontend().last_list();
    assert_eq!(list.title, "2024년 6월 15일 (토)");
    assert_eq!(list.rows[0].text, "buy milk");
}

#[tokio::test]
async fn test_today_follows_clock_past_midnight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos/range"))
        .and(query_param("from", "2024-07-01"))
        .and(query_param("to", "2024-07-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(query_param("date", "2024-07-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let clock = SharedClock(Arc::new(Mutex::new(date(2024, 6, 30))));
    let mut planner = PlannerController::new(
        TodoClient::new(&server.uri()).unwrap(),
        SummaryClient::new(&server.uri()).unwrap(),
        Box::new(seeded(serde_json::json!({ "2024-06-30": [] }))),
        RecordingFrontend::default(),
        clock.clone(),
    );

    let today_cells = |calendar: &CalendarView| -> Vec<NaiveDate> {
        calendar
            .cells
            .iter()
            .filter(|c| c.is_today)
            .map(|c| c.date)
            .collect()
    };

    planner.render();
    assert_eq!(
        today_cells(&planner.frontend().last_calendar()),
        vec![date(2024, 6, 30)]
    );

    clock.set(date(2024, 7, 1));
    planner.render();
    // June's grid ends on 2024-07-06, so the new day shows as a trailing cell.
    assert_eq!(
        today_cells(&planner.frontend().last_calendar()),
        vec![date(2024, 7, 1)]
    );
    assert_eq!(planner.state().selected, date(2024, 6, 30));

    planner.show_today().await.unwrap();
    assert_eq!(planner.state().selected, date(2024, 7, 1));
    assert_eq!(planner.state().current, date(2024, 7, 1));
    assert_eq!(planner.frontend().last_list().title, "2024년 7월 1일 (월)");
}

#[tokio::test]
async fn test_summarize_month_sends_cached_items() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summary"))
        .and(body_json(serde_json::json!({
            "from": "2024-06-01",
            "to": "2024-06-30",
            "todos": [
                { "id": "1", "text": "buy milk", "done": false, "date": "2024-06-15" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "6월 요약",
            "oneLine": "할 일 1개",
            "bullets": "• buy milk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = seeded(serde_json::json!({
        "2024-06-15": [{ "id": 1, "text": "buy milk", "done": false }],
        "2024-07-01": [{ "id": 2, "text": "next month", "done": false }],
    }));
    let mut planner = controller(&server, storage, RecordingFrontend::default());

    let summary = planner.summarize_month().await.unwrap();
    assert_eq!(summary.title.as_deref(), Some("6월 요약"));
    assert_eq!(summary.one_line.as_deref(), Some("할 일 1개"));
}

#[tokio::test]
async fn test_summarize_empty_month_uses_backend_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summary/range"))
        .and(query_param("from", "2024-06-01"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "oneLine": "없음" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut planner = controller(&server, MemoryStorage::new(), RecordingFrontend::default());
    let summary = planner.summarize_month().await.unwrap();
    assert_eq!(summary.one_line.as_deref(), Some("없음"));
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let server = MockServer::start().await;
    let storage = MemoryStorage::new();
    let mut planner = controller(&server, storage.clone(), RecordingFrontend::default());

    assert_eq!(planner.theme().as_str(), "light");
    assert_eq!(planner.toggle_theme().as_str(), "dark");
    assert_eq!(storage.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));

    let reopened = controller(&server, storage, RecordingFrontend::default());
    assert_eq!(reopened.theme().as_str(), "dark");
}
