use super::{admin_api_failure, PageChrome, RequestContext};
use crate::models::{AdminUser, Enrollment, EnrollmentStatus};
use crate::services::flash::{push_banner, Banner};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

const ENROLLMENTS_PATH: &str = "/admin/enrollments";

#[derive(Template)]
#[template(path = "admin/enrollments.html")]
pub struct EnrollmentsTemplate {
    pub chrome: PageChrome,
    pub enrollments: Vec<Enrollment>,
    pub statuses: &'static [EnrollmentStatus],
    /// Active filter value; empty for all.
    pub filter: String,
}

#[derive(Deserialize, Default)]
pub struct EnrollmentFilterQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
    /// Filter to return to after the update.
    #[serde(default)]
    pub filter: String,
}

fn list_path(filter: &str) -> String {
    match EnrollmentStatus::parse(filter) {
        Some(status) => format!("{}?status={}", ENROLLMENTS_PATH, status.as_str()),
        None => ENROLLMENTS_PATH.to_string(),
    }
}

pub async fn list_enrollments(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Query(query): Query<EnrollmentFilterQuery>,
) -> Response {
    let status = query.status.as_deref().and_then(EnrollmentStatus::parse);

    let enrollments = match state
        .academy
        .enrollments(status, &ctx.admin_call(&admin))
        .await
    {
        Ok(enrollments) => enrollments,
        Err(e) => return admin_api_failure(&session, &headers, &e, "/admin").await,
    };

    EnrollmentsTemplate {
        chrome: PageChrome::admin(&state, &session, &admin, "Enrollments", "enrollments").await,
        enrollments,
        statuses: &EnrollmentStatus::ALL,
        filter: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
    }
    .into_response()
}

pub async fn update_enrollment_status(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let back = list_path(&form.filter);

    let Some(status) = EnrollmentStatus::parse(&form.status) else {
        push_banner(&session, Banner::error("Unknown enrollment status.")).await;
        return super::see_other(&headers, &back);
    };

    match state
        .academy
        .update_enrollment_status(&id, status, &ctx.admin_call(&admin))
        .await
    {
        Ok(enrollment) => {
            tracing::info!(enrollment_id = %id, status = %status, "Enrollment status updated");
            push_banner(
                &session,
                Banner::success(format!(
                    "{} is now {}.",
                    enrollment.student_name, status
                )),
            )
            .await;
            super::see_other(&headers, &back)
        }
        Err(e) => admin_api_failure(&session, &headers, &e, &back).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_path_keeps_known_filters_only() {
        assert_eq!(list_path("active"), "/admin/enrollments?status=active");
        assert_eq!(list_path(""), "/admin/enrollments");
        assert_eq!(list_path("bogus"), "/admin/enrollments");
    }
}
