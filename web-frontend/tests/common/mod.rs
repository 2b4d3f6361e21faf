//! Test harness: a stub of the REST API on an ephemeral port and the real
//! router pointed at it.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, Response, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use tower::util::ServiceExt;
use web_frontend::config::{
    ApiSettings, RateLimitSettings, ServerSettings, Settings, SiteSettings, TelemetrySettings,
};
use web_frontend::startup::build_router;
use web_frontend::AppState;

pub const ADMIN_EMAIL: &str = "ops@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// What the stub API saw, and how it should misbehave.
#[derive(Clone, Default)]
pub struct StubApi {
    pub views: Arc<AtomicUsize>,
    pub saved_invoices: Arc<Mutex<Vec<Value>>>,
    pub partnerships: Arc<Mutex<Vec<Value>>>,
    pub comments: Arc<Mutex<Vec<Value>>>,
    pub saved_courses: Arc<Mutex<Vec<Value>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
    pub status_updates: Arc<Mutex<Vec<(String, Value)>>>,
    pub sent_invoices: Arc<Mutex<Vec<String>>>,
    /// Admin resources that answer 500.
    failing: Arc<Mutex<HashSet<&'static str>>>,
    /// When set, every admin resource answers 401.
    token_expired: Arc<AtomicBool>,
}

impl StubApi {
    /// Make `resource` (`courses`, `enrollments`, `invoices`, `analytics`) fail with a 500.
    pub fn fail(&self, resource: &'static str) {
        self.failing.lock().unwrap().insert(resource);
    }

    pub fn expire_token(&self, expired: bool) {
        self.token_expired.store(expired, Ordering::SeqCst);
    }

    /// The canned failure for `resource`, if one is switched on.
    fn refusal(&self, resource: &'static str) -> Option<axum::response::Response> {
        if self.token_expired.load(Ordering::SeqCst) {
            let body = Json(json!({ "message": "Token expired" }));
            return Some((StatusCode::UNAUTHORIZED, body).into_response());
        }
        if self.failing.lock().unwrap().contains(resource) {
            let body = Json(json!({ "message": "Database unavailable" }));
            return Some((StatusCode::INTERNAL_SERVER_ERROR, body).into_response());
        }
        None
    }
}

pub struct TestApp {
    pub router: Router,
    pub api: StubApi,
}

pub fn admin_token() -> String {
    let claims = json!({
        "sub": "admin_1",
        "email": ADMIN_EMAIL,
        "name": "Ops Team",
        "role": "admin",
        "exp": 9_999_999_999i64,
    });
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.signature",
        general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

pub fn blog_post_json() -> Value {
    json!({
        "_id": "post_1",
        "slug": "hello-rust",
        "title": "Hello Rust",
        "excerpt": "Why we rebuilt our site in Rust.",
        "content": "<p>Fast pages, fewer surprises.</p>",
        "author": { "name": "Ada Lovelace" },
        "category": "engineering",
        "tags": ["rust", "web"],
        "publishedAt": "2026-03-01T10:00:00Z"
    })
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        (StatusCode::OK, Json(json!({ "data": { "token": admin_token() } }))).into_response()
    } else {
        let body = Json(json!({ "message": "Invalid credentials" }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

async fn blogs() -> Json<Value> {
    Json(json!({ "data": { "posts": [blog_post_json()], "page": 1, "totalPages": 1 } }))
}

async fn blog(Path(slug): Path<String>) -> impl IntoResponse {
    if slug == "hello-rust" {
        Json(json!({ "data": blog_post_json() })).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Blog not found" }))).into_response()
    }
}

async fn related() -> Json<Value> {
    Json(json!([]))
}

async fn comments() -> Json<Value> {
    Json(json!([
        {
            "_id": "c1",
            "name": "Grace",
            "content": "Great read!",
            "createdAt": "2026-03-02T09:00:00Z"
        }
    ]))
}

async fn add_comment(State(api): State<StubApi>, Json(body): Json<Value>) -> StatusCode {
    api.comments.lock().unwrap().push(body);
    StatusCode::CREATED
}

async fn record_view(State(api): State<StubApi>) -> StatusCode {
    api.views.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

async fn submit_partnership(State(api): State<StubApi>, Json(body): Json<Value>) -> StatusCode {
    api.partnerships.lock().unwrap().push(body);
    StatusCode::CREATED
}

pub fn course_json() -> Value {
    json!({
        "_id": "course_1",
        "title": "Rust for Teams",
        "slug": "rust-for-teams",
        "description": "Hands-on ownership and async.",
        "price": "1200",
        "durationWeeks": 6,
        "level": "intermediate",
        "published": true
    })
}

pub fn enrollment_json(status: &str) -> Value {
    json!({
        "_id": "enr_1",
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "courseTitle": "Rust for Teams",
        "status": status,
        "createdAt": "2026-02-10T08:00:00Z"
    })
}

async fn courses(State(api): State<StubApi>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("courses") {
        return refusal;
    }
    Json(json!({ "data": [course_json()] })).into_response()
}

/// `rust-for-teams` is taken; any other slug is created as `course_2`.
async fn create_course(State(api): State<StubApi>, Json(body): Json<Value>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("courses") {
        return refusal;
    }
    if body["slug"] == "rust-for-teams" {
        let message = Json(json!({ "message": "A course with this slug already exists" }));
        return (StatusCode::CONFLICT, message).into_response();
    }
    api.saved_courses.lock().unwrap().push(body.clone());
    let mut course = body;
    course["_id"] = json!("course_2");
    (StatusCode::CREATED, Json(json!({ "data": course }))).into_response()
}

async fn update_course(
    State(api): State<StubApi>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("courses") {
        return refusal;
    }
    api.saved_courses.lock().unwrap().push(body.clone());
    let mut course = body;
    course["_id"] = json!(id);
    Json(json!({ "data": course })).into_response()
}

async fn delete_course(State(api): State<StubApi>, Path(id): Path<String>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("courses") {
        return refusal;
    }
    api.deleted.lock().unwrap().push(format!("course/{}", id));
    StatusCode::NO_CONTENT.into_response()
}

async fn enrollments(State(api): State<StubApi>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("enrollments") {
        return refusal;
    }
    Json(json!({ "data": [enrollment_json("pending")] })).into_response()
}

async fn update_enrollment(
    State(api): State<StubApi>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("enrollments") {
        return refusal;
    }
    let status = body["status"].as_str().unwrap_or_default().to_string();
    api.status_updates.lock().unwrap().push((id, body));
    Json(json!({ "data": enrollment_json(&status) })).into_response()
}

async fn analytics(State(api): State<StubApi>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("analytics") {
        return refusal;
    }
    Json(json!({
        "data": {
            "totalCourses": 1,
            "totalEnrollments": 12,
            "activeStudents": 9,
            "totalRevenue": "14400",
            "completionRate": 75,
            "courses": [{ "title": "Rust for Teams", "enrollments": 12, "revenue": "14400" }]
        }
    }))
    .into_response()
}

async fn invoices(State(api): State<StubApi>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("invoices") {
        return refusal;
    }
    Json(json!([])).into_response()
}

async fn create_invoice(State(api): State<StubApi>, Json(body): Json<Value>) -> impl IntoResponse {
    api.saved_invoices.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({ "data": { "_id": "inv_1" } })))
}

async fn send_invoice(State(api): State<StubApi>, Path(id): Path<String>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("invoices") {
        return refusal;
    }
    api.sent_invoices.lock().unwrap().push(id);
    Json(json!({ "message": "Invoice sent" })).into_response()
}

async fn delete_invoice(State(api): State<StubApi>, Path(id): Path<String>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("invoices") {
        return refusal;
    }
    api.deleted.lock().unwrap().push(format!("invoice/{}", id));
    StatusCode::NO_CONTENT.into_response()
}

pub fn invoice_json() -> Value {
    json!({
        "_id": "inv_42",
        "invoiceNumber": "INV-0042",
        "status": "sent",
        "client": { "name": "Acme Ltd", "email": "billing@acme.test" },
        "issueDate": "2026-03-01",
        "dueDate": "2026-03-31",
        "currency": "KES",
        "items": [
            { "description": "Workshop", "quantity": 2, "unitPrice": "450.00" }
        ],
        "taxRate": 16,
        "discount": 0
    })
}

/// Only `inv_42` exists; freshly created invoices are not readable back.
async fn invoice(State(api): State<StubApi>, Path(id): Path<String>) -> impl IntoResponse {
    if let Some(refusal) = api.refusal("invoices") {
        return refusal;
    }
    if id == "inv_42" {
        Json(json!({ "data": invoice_json() })).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Invoice not found" }))).into_response()
    }
}

async fn pdf() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 stub".to_vec())
}

fn stub_router(api: StubApi) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/blogs", get(blogs))
        .route("/api/blogs/:slug", get(blog))
        .route("/api/blogs/:slug/related", get(related))
        .route("/api/blogs/:slug/comments", get(comments).post(add_comment))
        .route("/api/blogs/:slug/view", post(record_view))
        .route("/api/events", get(|| async { Json(json!([])) }))
        .route("/api/partnerships/submit", post(submit_partnership))
        .route("/api/academy/courses", get(courses).post(create_course))
        .route("/api/academy/courses/:id", put(update_course).delete(delete_course))
        .route("/api/academy/enrollments", get(enrollments))
        .route("/api/academy/enrollments/:id", put(update_enrollment))
        .route("/api/academy/analytics", get(analytics))
        .route("/api/invoices", get(invoices).post(create_invoice))
        .route("/api/invoices/:id", get(invoice).delete(delete_invoice))
        .route("/api/invoices/:id/pdf", get(pdf))
        .route("/api/invoices/:id/send", post(send_invoice))
        .with_state(api)
}

/// Start the stub API and build the site router against it.
pub async fn spawn_app() -> TestApp {
    let api = StubApi::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub API");
    let address = listener.local_addr().expect("Stub API has no address");
    let stub = stub_router(api.clone());
    tokio::spawn(async move {
        axum::serve(listener, stub).await.expect("Stub API stopped");
    });

    let settings = Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        api: ApiSettings {
            base_url: format!("http://{}", address),
            timeout_seconds: 5,
            public_api_key: None,
        },
        site: SiteSettings {
            name: "Nexa Digital".to_string(),
            base_url: "https://nexa.example".to_string(),
            default_og_image: String::new(),
            logo_url: String::new(),
            twitter_handle: String::new(),
        },
        telemetry: TelemetrySettings::default(),
        rate_limit: RateLimitSettings::default(),
    };

    let state = AppState::new(&settings, service_core::observability::prometheus_handle())
        .expect("Failed to build app state");

    TestApp {
        router: build_router(state),
        api,
    }
}

/// Response status, headers and body text.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `name=value` of the session cookie, if one was set.
    pub fn cookie(&self) -> Option<String> {
        self.header("set-cookie")
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

pub async fn read(response: Response<Body>) -> TestResponse {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        read(response).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().uri(uri).header("User-Agent", "integration-test");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
        htmx: bool,
    ) -> TestResponse {
        let body = serde_urlencoded::to_string(form).expect("Failed to encode form");
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("User-Agent", "integration-test")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Sign in through the login form and return the session cookie.
    pub async fn sign_in(&self) -> String {
        let response = self
            .post_form(
                "/admin/login",
                &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)],
                None,
                true,
            )
            .await;
        assert_eq!(response.header("HX-Redirect"), Some("/admin"));
        response.cookie().expect("Login did not set a session cookie")
    }
}
