use crate::error::ApiError;
use crate::models::{AcademyAnalytics, Course, CoursePayload, Enrollment, EnrollmentStatus};
use crate::services::api_client::{ApiClient, CallContext};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct StatusUpdate {
    status: EnrollmentStatus,
}

#[derive(Serialize)]
struct EnrollmentFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
}

#[derive(Clone)]
pub struct AcademyClient {
    api: Arc<ApiClient>,
}

impl AcademyClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn courses(&self, ctx: &CallContext<'_>) -> Result<Vec<Course>, ApiError> {
        self.api.get_json(&["academy", "courses"], ctx).await
    }

    /// The API has no single-course read; the course is picked from the list.
    pub async fn course(&self, id: &str, ctx: &CallContext<'_>) -> Result<Course, ApiError> {
        self.courses(ctx)
            .await?
            .into_iter()
            .find(|course| course.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("course {}", id)))
    }

    pub async fn create_course(
        &self,
        payload: &CoursePayload,
        ctx: &CallContext<'_>,
    ) -> Result<Course, ApiError> {
        self.api
            .post_json(&["academy", "courses"], payload, ctx)
            .await
    }

    pub async fn update_course(
        &self,
        id: &str,
        payload: &CoursePayload,
        ctx: &CallContext<'_>,
    ) -> Result<Course, ApiError> {
        self.api
            .put_json(&["academy", "courses", id], payload, ctx)
            .await
    }

    pub async fn delete_course(&self, id: &str, ctx: &CallContext<'_>) -> Result<(), ApiError> {
        self.api.delete(&["academy", "courses", id], ctx).await
    }

    pub async fn enrollments(
        &self,
        status: Option<EnrollmentStatus>,
        ctx: &CallContext<'_>,
    ) -> Result<Vec<Enrollment>, ApiError> {
        let filter = EnrollmentFilter {
            status: status.as_ref().map(EnrollmentStatus::as_str),
        };
        self.api
            .get_json_with_query(&["academy", "enrollments"], &filter, ctx)
            .await
    }

    pub async fn update_enrollment_status(
        &self,
        id: &str,
        status: EnrollmentStatus,
        ctx: &CallContext<'_>,
    ) -> Result<Enrollment, ApiError> {
        self.api
            .put_json(&["academy", "enrollments", id], &StatusUpdate { status }, ctx)
            .await
    }

    pub async fn analytics(&self, ctx: &CallContext<'_>) -> Result<AcademyAnalytics, ApiError> {
        self.api.get_json(&["academy", "analytics"], ctx).await
    }
}
