use super::{admin_api_failure, PageChrome, RequestContext};
use crate::error::ApiError;
use crate::models::admin::sign_out;
use crate::models::{AcademyAnalytics, AdminUser};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// One dashboard figure; `None` renders as "unavailable".
pub struct SummaryCard {
    pub label: &'static str,
    pub value: Option<usize>,
    pub link: &'static str,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: PageChrome,
    pub cards: Vec<SummaryCard>,
}

#[derive(Template)]
#[template(path = "admin/analytics.html")]
pub struct AnalyticsTemplate {
    pub chrome: PageChrome,
    /// `None` when the analytics API failed; never filled with placeholders.
    pub analytics: Option<AcademyAnalytics>,
}

impl AnalyticsTemplate {
    pub fn revenue_label(&self) -> String {
        self.analytics
            .as_ref()
            .map(|a| {
                invoicing_core::format_with_symbol(a.total_revenue, invoicing_core::Currency::Usd)
            })
            .unwrap_or_default()
    }
}

fn count<T>(label: &'static str, result: &Result<Vec<T>, ApiError>) -> Option<usize> {
    match result {
        Ok(items) => Some(items.len()),
        Err(e) => {
            tracing::warn!(card = label, error = %e, "Dashboard figure unavailable");
            None
        }
    }
}

fn is_unauthorized<T>(result: &Result<T, ApiError>) -> bool {
    matches!(result, Err(ApiError::Unauthorized))
}

pub async fn admin_dashboard_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    admin: AdminUser,
) -> Response {
    let call = ctx.admin_call(&admin);
    let (courses, enrollments, invoices) = tokio::join!(
        state.academy.courses(&call),
        state.academy.enrollments(None, &call),
        state.invoices.list(&call)
    );

    if is_unauthorized(&courses) || is_unauthorized(&enrollments) || is_unauthorized(&invoices) {
        sign_out(&session).await;
        return Redirect::to("/admin/login").into_response();
    }

    let cards = vec![
        SummaryCard {
            label: "Courses",
            value: count("courses", &courses),
            link: "/admin/courses",
        },
        SummaryCard {
            label: "Enrollments",
            value: count("enrollments", &enrollments),
            link: "/admin/enrollments",
        },
        SummaryCard {
            label: "Invoices",
            value: count("invoices", &invoices),
            link: "/admin/invoices",
        },
    ];

    DashboardTemplate {
        chrome: PageChrome::admin(&state, &session, &admin, "Dashboard", "dashboard").await,
        cards,
    }
    .into_response()
}

pub async fn analytics_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
) -> Response {
    let analytics = match state.academy.analytics(&ctx.admin_call(&admin)).await {
        Ok(analytics) => Some(analytics),
        Err(ApiError::Unauthorized) => {
            return admin_api_failure(&session, &headers, &ApiError::Unauthorized, "/admin").await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Analytics unavailable");
            None
        }
    };

    AnalyticsTemplate {
        chrome: PageChrome::admin(&state, &session, &admin, "Analytics", "analytics").await,
        analytics,
    }
    .into_response()
}
