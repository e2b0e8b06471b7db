//! End-to-end page flow tests against a stub backend on an ephemeral port.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

use aula_app::Surface;
use aula_app::pages::{ClassPage, ClassPortalPage, DashboardPage, DeleteTarget, LoginPage};
use aula_auth::{MemoryTokenStore, Role, SessionClaims, TokenStore};
use aula_client::{ApiClient, RetryPolicy};
use aula_core::{ClassId, UserId};
use aula_session::SessionMonitor;

#[derive(Default)]
struct Backend {
    classes: Mutex<Vec<serde_json::Value>>,
    classes_gets: AtomicU32,
    student_classes_gets: AtomicU32,
    class_deletes: AtomicU32,
    joins: AtomicU32,
    materials_gets: AtomicU32,
    members_gets: AtomicU32,
    /// 500s remaining before the materials endpoint starts answering.
    materials_failures: AtomicU32,
    fail_members: AtomicBool,
}

fn class_json(id: i64, code: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Class {id}"),
        "jadwal_kelas": "08:00",
        "teacher": "Ms. Ade",
        "class_code": code,
        "created_at": "2024-05-01T02:00:00Z",
    })
}

impl Backend {
    fn with_duplicate_classes() -> Arc<Self> {
        let backend = Self::default();
        // The same class code appears twice, as the server sometimes returns.
        *backend.classes.lock().unwrap() = vec![
            class_json(3, "AAA111"),
            class_json(1, "BBB222"),
            class_json(2, "AAA111"),
        ];
        Arc::new(backend)
    }
}

struct TestServer {
    base_url: String,
    backend: Arc<Backend>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(backend: Arc<Backend>) -> Self {
        let app = router(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/classes", get(list_classes))
        .route("/classes/student/:id", get(list_classes_for_student))
        .route("/classes/count/:id", get(class_count))
        .route("/assignments/count/:id", get(assignment_count))
        .route("/assignments/:class_id", get(list_assignments))
        .route("/roles/count", get(role_counts))
        .route("/class/:id", get(class_details).delete(delete_class))
        .route("/class/:id/join", post(join_class))
        .route("/class/:id/members", get(list_members))
        .route("/materials/:class_id", get(list_materials))
        .with_state(backend)
}

fn mint_token(id: i64, username: &str, role: Role) -> String {
    let claims = SessionClaims {
        id: UserId::new(id),
        username: username.to_string(),
        role,
        exp: (Utc::now() + ChronoDuration::minutes(30)).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"stub-secret"),
    )
    .expect("failed to encode token")
}

async fn login(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
    if body["username"] == "ade" && body["password"] == "rahasia" {
        let token = mint_token(7, "ade", Role::Student);
        (StatusCode::OK, Json(json!({ "token": token })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad credentials"})))
    }
}

async fn list_classes(State(backend): State<Arc<Backend>>) -> Json<serde_json::Value> {
    backend.classes_gets.fetch_add(1, Ordering::SeqCst);
    Json(json!(backend.classes.lock().unwrap().clone()))
}

async fn list_classes_for_student(
    State(backend): State<Arc<Backend>>,
    Path(_id): Path<i64>,
) -> Json<serde_json::Value> {
    backend.student_classes_gets.fetch_add(1, Ordering::SeqCst);
    Json(json!(backend.classes.lock().unwrap().clone()))
}

async fn class_count(Path(_id): Path<i64>) -> Json<serde_json::Value> {
    Json(json!({"class_count": "2"}))
}

async fn assignment_count(Path(_id): Path<i64>) -> Json<serde_json::Value> {
    Json(json!({"assignment": "5"}))
}

async fn list_assignments(Path(class_id): Path<i64>) -> Json<serde_json::Value> {
    Json(json!([
        {
            "id": 1,
            "class_id": class_id,
            "title": "Worksheet",
            "description": "Problems 1-10",
            "due_date": "2024-06-01",
            "created_at": "2024-05-02T02:00:00Z",
            "attachment": "",
        }
    ]))
}

async fn role_counts() -> Json<serde_json::Value> {
    Json(json!({"Admin": 1, "Guru": 2, "Siswa": 10}))
}

async fn class_details(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<serde_json::Value>) {
    let classes = backend.classes.lock().unwrap();
    match classes.iter().find(|c| c["id"] == id) {
        Some(class) => (StatusCode::OK, Json(class.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))),
    }
}

async fn delete_class(State(backend): State<Arc<Backend>>, Path(id): Path<i64>) -> StatusCode {
    backend.class_deletes.fetch_add(1, Ordering::SeqCst);
    backend.classes.lock().unwrap().retain(|c| c["id"] != id);
    StatusCode::OK
}

async fn join_class(State(backend): State<Arc<Backend>>, Path(_id): Path<i64>) -> StatusCode {
    backend.joins.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn list_members(
    State(backend): State<Arc<Backend>>,
    Path(_id): Path<i64>,
) -> (StatusCode, Json<serde_json::Value>) {
    backend.members_gets.fetch_add(1, Ordering::SeqCst);
    if backend.fail_members.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "roster unavailable"})),
        );
    }

    // The same member twice, as the roster endpoint sometimes returns.
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "members retrieved",
            "data": [
                {"id": 10, "username": "rani", "role": "Siswa"},
                {"id": 11, "username": "bima", "role": "Siswa"},
                {"id": 10, "username": "rani", "role": "Siswa"},
            ],
        })),
    )
}

async fn list_materials(
    State(backend): State<Arc<Backend>>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<serde_json::Value>) {
    backend.materials_gets.fetch_add(1, Ordering::SeqCst);

    let failures = backend.materials_failures.load(Ordering::SeqCst);
    if failures > 0 {
        backend.materials_failures.store(failures - 1, Ordering::SeqCst);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "flaky"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!([
            {
                "id": 1,
                "class_id": class_id,
                "title": "Older notes",
                "content": "Week 1",
                "created_at": "2024-05-01T02:00:00Z",
                "attachment": "",
            },
            {
                "id": 2,
                "class_id": class_id,
                "title": "Newer notes",
                "content": "Week 2",
                "created_at": "2024-05-03T02:00:00Z",
                "attachment": "",
            }
        ])),
    )
}

fn client_with_store(server: &TestServer) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(server.base_url.clone(), store.clone());
    (client, store)
}

fn claims(id: i64, username: &str, role: Role) -> SessionClaims {
    SessionClaims {
        id: UserId::new(id),
        username: username.to_string(),
        role,
        exp: (Utc::now() + ChronoDuration::minutes(30)).timestamp(),
    }
}

fn quick_retry() -> RetryPolicy {
    RetryPolicy {
        attempts: 3,
        delay: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn login_persists_token_and_dashboard_shows_student_widgets() {
    let server = TestServer::spawn(Backend::with_duplicate_classes()).await;
    let (client, store) = client_with_store(&server);
    let (monitor, _rx) = SessionMonitor::new(store.clone());

    let mut login = LoginPage::new();
    login.username = "ade".to_string();
    login.password = "rahasia".to_string();

    let route = login.submit(&client, &monitor).await;
    assert_eq!(route.map(|r| r.path()), Some("/".to_string()));
    assert!(store.load().is_some(), "token must be persisted");
    assert_eq!(
        monitor.state(),
        aula_session::SessionState::Valid,
        "monitor re-armed after login"
    );

    let mut dashboard = DashboardPage::mount(store.as_ref() as &dyn TokenStore)
        .expect("valid session after login");
    assert_eq!(dashboard.username(), "ade");
    assert_eq!(dashboard.role(), Role::Student);

    let noon = chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    dashboard.load(&client, noon).await;

    // Student widgets: distinct joined classes (three rows, two codes) and
    // the assignment counter; no admin role cards.
    assert_eq!(dashboard.class_count(), Some(2));
    assert_eq!(dashboard.assignment_count(), Some(5));
    assert!(dashboard.role_counts().is_none());
}

#[tokio::test]
async fn admin_dashboard_shows_role_cards_instead_of_counters() {
    let server = TestServer::spawn(Backend::with_duplicate_classes()).await;
    let (client, store) = client_with_store(&server);
    store.save(&mint_token(1, "head", Role::Admin)).unwrap();

    let mut dashboard =
        DashboardPage::mount(store.as_ref() as &dyn TokenStore).expect("valid session");
    let noon = chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    dashboard.load(&client, noon).await;

    let counts = dashboard.role_counts().expect("admin sees role cards");
    assert_eq!(counts.of(Role::Student.wire_name()), 10);
    assert_eq!(counts.of(Role::Teacher.wire_name()), 2);
    assert!(dashboard.class_count().is_none());
    assert!(dashboard.assignment_count().is_none());
}

#[tokio::test]
async fn duplicate_class_codes_render_exactly_once_sorted_by_id() {
    let server = TestServer::spawn(Backend::with_duplicate_classes()).await;
    let (client, _store) = client_with_store(&server);

    let mut portal = ClassPortalPage::new(claims(2, "guru", Role::Teacher));
    portal.refresh(&client).await;

    // First occurrence wins the dedup (id 3 carries AAA111), then the list
    // is sorted ascending by id.
    let codes: Vec<&str> = portal
        .classes()
        .iter()
        .map(|c| c.class_code.as_str())
        .collect();
    assert_eq!(codes, vec!["BBB222", "AAA111"]);

    let ids: Vec<i64> = portal.classes().iter().map(|c| c.id.as_i64()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn deleting_a_class_requires_confirmation() {
    let server = TestServer::spawn(Backend::with_duplicate_classes()).await;
    let (client, _store) = client_with_store(&server);

    let mut portal = ClassPortalPage::new(claims(2, "guru", Role::Teacher));
    portal.refresh(&client).await;
    let before: Vec<_> = portal.classes().to_vec();
    let target = portal.classes()[0].id;

    // Cancelling the dialog issues no delete call and changes nothing.
    portal.request_delete(target);
    assert!(
        portal
            .surfaces()
            .iter()
            .any(|s| matches!(s, Surface::ConfirmDelete(_)))
    );
    portal.cancel_delete();
    portal.confirm_delete(&client).await;
    assert_eq!(server.backend.class_deletes.load(Ordering::SeqCst), 0);
    assert_eq!(portal.classes(), before.as_slice());
    assert_eq!(server.backend.classes_gets.load(Ordering::SeqCst), 1);

    // Confirming issues exactly one delete call followed by one re-fetch.
    portal.request_delete(target);
    portal.confirm_delete(&client).await;
    assert_eq!(server.backend.class_deletes.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.classes_gets.load(Ordering::SeqCst), 2);
    assert!(portal.classes().iter().all(|c| c.id != target));
}

#[tokio::test]
async fn joining_with_an_unknown_code_issues_no_join_call() {
    let server = TestServer::spawn(Backend::with_duplicate_classes()).await;
    let (client, _store) = client_with_store(&server);

    let mut portal = ClassPortalPage::new(claims(7, "ade", Role::Student));
    portal.join_by_code(&client, "ZZZ999").await;

    assert_eq!(server.backend.joins.load(Ordering::SeqCst), 0);
    assert!(portal.surfaces().has_validation_modal());

    // A known code issues exactly one join call.
    portal.join_by_code(&client, "BBB222").await;
    assert_eq!(server.backend.joins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refetch_after_a_cancelled_edit_is_a_no_op() {
    let server = TestServer::spawn(Backend::with_duplicate_classes()).await;
    let (client, _store) = client_with_store(&server);

    let mut portal = ClassPortalPage::new(claims(2, "guru", Role::Teacher));
    portal.refresh(&client).await;
    let before: Vec<_> = portal.classes().to_vec();

    // Open an edit form and walk away without saving.
    let form = portal.edit_form(before[0].id).expect("class exists");
    drop(form);

    portal.refresh(&client).await;
    assert_eq!(portal.classes(), before.as_slice());
}

#[tokio::test]
async fn class_page_retries_materials_until_they_load() {
    let backend = Backend::with_duplicate_classes();
    backend.materials_failures.store(2, Ordering::SeqCst);
    let server = TestServer::spawn(backend).await;
    let (client, _store) = client_with_store(&server);

    let mut page = ClassPage::with_retry(
        ClassId::new(1),
        claims(2, "guru", Role::Teacher),
        quick_retry(),
    );
    page.load(&client).await;

    // Two failures, then success on the third and final attempt.
    assert_eq!(server.backend.materials_gets.load(Ordering::SeqCst), 3);
    assert!(!page.surfaces().has_error_dialog());

    // Newest-first ordering.
    let titles: Vec<&str> = page.materials().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Newer notes", "Older notes"]);

    // Roster arrived deduplicated by user id.
    assert_eq!(page.members().len(), 2);
}

#[tokio::test]
async fn class_page_surfaces_a_dialog_after_retries_are_exhausted() {
    let backend = Backend::with_duplicate_classes();
    backend.fail_members.store(true, Ordering::SeqCst);
    let server = TestServer::spawn(backend).await;
    let (client, _store) = client_with_store(&server);

    let mut page = ClassPage::with_retry(
        ClassId::new(1),
        claims(2, "guru", Role::Teacher),
        quick_retry(),
    );
    page.load(&client).await;

    // Exactly three attempts, then a persistent error dialog; the other tabs
    // loaded normally.
    assert_eq!(server.backend.members_gets.load(Ordering::SeqCst), 3);
    assert!(page.surfaces().has_error_dialog());
    assert!(page.members().is_empty());
    assert!(!page.materials().is_empty());
    assert!(page.details().is_some());

    // Deleting still works through the confirmation flow on loaded tabs.
    let material = page.materials()[0].id;
    page.request_delete(DeleteTarget::Material(material));
    page.cancel_delete();
    page.confirm_delete(&client).await;
    assert_eq!(server.backend.class_deletes.load(Ordering::SeqCst), 0);
}
