use super::PageChrome;
use crate::services::seo::SeoMeta;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: PageChrome,
}

/// The dedicated not-found page, with a 404 status.
pub async fn not_found_page(state: &AppState, session: &Session) -> Response {
    let mut seo = SeoMeta::page(&state.site, "Page not found", "", "/");
    seo.noindex = true;
    let page = NotFoundTemplate {
        chrome: PageChrome::public(state, session, seo, "").await,
    };
    (StatusCode::NOT_FOUND, page).into_response()
}

pub async fn fallback(State(state): State<AppState>, session: Session) -> Response {
    not_found_page(&state, &session).await
}
