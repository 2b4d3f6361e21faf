use super::{PageChrome, RequestContext};
use crate::models::Course;
use crate::services::seo::SeoMeta;
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "pages/academy.html")]
pub struct AcademyTemplate {
    pub chrome: PageChrome,
    pub courses: Vec<Course>,
    pub unavailable: bool,
}

pub async fn academy_index(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> impl IntoResponse {
    let (courses, unavailable) = match state.academy.courses(&ctx.public_call()).await {
        Ok(courses) => (courses.into_iter().filter(|c| c.published).collect(), false),
        Err(e) => {
            tracing::warn!(error = %e, "Course catalog unavailable");
            (Vec::new(), true)
        }
    };

    let seo = SeoMeta::page(
        &state.site,
        "Academy",
        "Practical courses in software engineering, cloud and design.",
        "/academy",
    );
    AcademyTemplate {
        chrome: PageChrome::public(&state, &session, seo, "academy").await,
        courses,
        unavailable,
    }
}
