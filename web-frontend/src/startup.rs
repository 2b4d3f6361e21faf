use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    bot_detection::bot_detection_middleware, metrics::metrics_middleware,
    rate_limit::ip_rate_limit_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    academy::academy_index,
    admin::{admin_dashboard_handler, analytics_handler},
    admin_courses::{
        create_course, delete_course, edit_course, list_courses, new_course, update_course,
    },
    admin_enrollments::{list_enrollments, update_enrollment_status},
    app::{about, health_check, index},
    auth::{login_handler, login_page, logout_handler},
    blog::{blog_index, blog_post, post_comment},
    errors::fallback,
    events::events_index,
    invoices::{
        delete_invoice, download_pdf, edit_invoice, editor_action, list_invoices, new_invoice,
        preview_invoice, save_invoice, send_invoice,
    },
    metrics::metrics,
    partnerships::{partnerships_page, submit_partnership},
    services::{service_detail, services_index},
};
use crate::middleware::auth::require_admin;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    let form_limit = from_fn_with_state(state.form_limiter.clone(), ip_rate_limit_middleware);

    let public = Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/services", get(services_index))
        .route("/services/:slug", get(service_detail))
        .route("/blog", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route(
            "/blog/:slug/comments",
            post(post_comment).layer(form_limit.clone()),
        )
        .route("/events", get(events_index))
        .route("/academy", get(academy_index))
        .route(
            "/partnerships",
            get(partnerships_page).merge(post(submit_partnership).layer(form_limit.clone())),
        )
        .route("/health", get(health_check))
        .route("/metrics", get(metrics));

    let admin_auth = Router::new()
        .route(
            "/admin/login",
            get(login_page).merge(post(login_handler).layer(form_limit)),
        )
        .route("/admin/logout", post(logout_handler));

    let admin = Router::new()
        .route("/admin", get(admin_dashboard_handler))
        .route("/admin/analytics", get(analytics_handler))
        .route("/admin/courses", get(list_courses).post(create_course))
        .route("/admin/courses/new", get(new_course))
        .route("/admin/courses/:id", post(update_course))
        .route("/admin/courses/:id/edit", get(edit_course))
        .route("/admin/courses/:id/delete", post(delete_course))
        .route("/admin/enrollments", get(list_enrollments))
        .route(
            "/admin/enrollments/:id/status",
            post(update_enrollment_status),
        )
        .route("/admin/invoices", get(list_invoices))
        .route("/admin/invoices/new", get(new_invoice))
        .route("/admin/invoices/editor", post(editor_action))
        .route("/admin/invoices/save", post(save_invoice))
        .route("/admin/invoices/:id/edit", get(edit_invoice))
        .route("/admin/invoices/:id/preview", get(preview_invoice))
        .route("/admin/invoices/:id/pdf", get(download_pdf))
        .route("/admin/invoices/:id/send", post(send_invoice))
        .route("/admin/invoices/:id/delete", post(delete_invoice))
        .route_layer(from_fn(require_admin));

    Router::new()
        .merge(public)
        .merge(admin_auth)
        .merge(admin)
        .route_layer(from_fn(metrics_middleware))
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(session_layer)
        .layer(from_fn(bot_detection_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
}
