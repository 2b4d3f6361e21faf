use super::{admin_api_failure, errors::not_found_page, FieldErrors, PageChrome, RequestContext};
use crate::error::ApiError;
use crate::models::{AdminUser, Course, CourseInput};
use crate::services::flash::{push_banner, Banner};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use tower_sessions::Session;
use validator::Validate;

const COURSES_PATH: &str = "/admin/courses";

#[derive(Template)]
#[template(path = "admin/courses.html")]
pub struct CoursesTemplate {
    pub chrome: PageChrome,
    pub courses: Vec<Course>,
}

#[derive(Template)]
#[template(path = "admin/course_form.html")]
pub struct CourseFormTemplate {
    pub chrome: PageChrome,
    /// `None` while creating.
    pub course_id: Option<String>,
    pub form: CourseInput,
    pub errors: FieldErrors,
}

impl CourseFormTemplate {
    pub fn action(&self) -> String {
        match &self.course_id {
            Some(id) => format!("{}/{}", COURSES_PATH, id),
            None => COURSES_PATH.to_string(),
        }
    }
}

async fn render_form(
    state: &AppState,
    session: &Session,
    admin: &AdminUser,
    course_id: Option<String>,
    form: CourseInput,
    errors: FieldErrors,
    status: StatusCode,
) -> Response {
    let title = if course_id.is_some() { "Edit course" } else { "New course" };
    let page = CourseFormTemplate {
        chrome: PageChrome::admin(state, session, admin, title, "courses").await,
        course_id,
        form,
        errors,
    };
    (status, page).into_response()
}

pub async fn list_courses(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
) -> Response {
    let courses = match state.academy.courses(&ctx.admin_call(&admin)).await {
        Ok(courses) => courses,
        Err(e) => return admin_api_failure(&session, &headers, &e, "/admin").await,
    };

    CoursesTemplate {
        chrome: PageChrome::admin(&state, &session, &admin, "Courses", "courses").await,
        courses,
    }
    .into_response()
}

pub async fn new_course(
    State(state): State<AppState>,
    session: Session,
    admin: AdminUser,
) -> Response {
    let form = CourseInput {
        duration_weeks: "4".to_string(),
        price: "0".to_string(),
        ..Default::default()
    };
    render_form(
        &state,
        &session,
        &admin,
        None,
        form,
        FieldErrors::default(),
        StatusCode::OK,
    )
    .await
}

pub async fn edit_course(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.academy.course(&id, &ctx.admin_call(&admin)).await {
        Ok(course) => {
            render_form(
                &state,
                &session,
                &admin,
                Some(course.id.clone()),
                CourseInput::from_course(&course),
                FieldErrors::default(),
                StatusCode::OK,
            )
            .await
        }
        Err(e) if e.is_not_found() => not_found_page(&state, &session).await,
        Err(e) => admin_api_failure(&session, &headers, &e, COURSES_PATH).await,
    }
}

pub async fn create_course(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Form(form): Form<CourseInput>,
) -> Response {
    save(&state, &session, &ctx, &headers, &admin, None, form).await
}

pub async fn update_course(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
    Form(form): Form<CourseInput>,
) -> Response {
    save(&state, &session, &ctx, &headers, &admin, Some(id), form).await
}

async fn save(
    state: &AppState,
    session: &Session,
    ctx: &RequestContext,
    headers: &HeaderMap,
    admin: &AdminUser,
    course_id: Option<String>,
    form: CourseInput,
) -> Response {
    let payload = form.to_payload();
    if let Err(errors) = payload.validate() {
        let errors = FieldErrors::from_validation(&errors);
        return render_form(
            state,
            session,
            admin,
            course_id,
            form,
            errors,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await;
    }

    let call = ctx.admin_call(admin);
    let result = match &course_id {
        Some(id) => state.academy.update_course(id, &payload, &call).await,
        None => state.academy.create_course(&payload, &call).await,
    };

    match result {
        Ok(course) => {
            tracing::info!(course_id = %course.id, "Course saved");
            push_banner(session, Banner::success(format!("Saved \"{}\".", course.title))).await;
            super::see_other(headers, COURSES_PATH)
        }
        Err(ApiError::Rejected { message, .. }) => {
            let mut errors = FieldErrors::default();
            errors.insert("form", message);
            render_form(
                state,
                session,
                admin,
                course_id,
                form,
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
        Err(ApiError::Unauthorized) => {
            admin_api_failure(session, headers, &ApiError::Unauthorized, COURSES_PATH).await
        }
        Err(e) => {
            // Keep the typed values on screen.
            push_banner(session, Banner::error(e.user_message())).await;
            render_form(
                state,
                session,
                admin,
                course_id,
                form,
                FieldErrors::default(),
                StatusCode::BAD_GATEWAY,
            )
            .await
        }
    }
}

pub async fn delete_course(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.academy.delete_course(&id, &ctx.admin_call(&admin)).await {
        Ok(()) => {
            tracing::info!(course_id = %id, "Course deleted");
            push_banner(&session, Banner::success("Course deleted.")).await;
            super::see_other(&headers, COURSES_PATH)
        }
        Err(e) => admin_api_failure(&session, &headers, &e, COURSES_PATH).await,
    }
}
