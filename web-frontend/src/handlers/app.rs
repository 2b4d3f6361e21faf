use super::{PageChrome, RequestContext};
use crate::content::{CompanyProfile, ServiceOffering, COMPANY, SERVICES};
use crate::models::{BlogPost, BlogQuery};
use crate::services::seo::SeoMeta;
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

const LATEST_POSTS: u32 = 3;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub services: &'static [ServiceOffering],
    pub latest_posts: Vec<BlogPost>,
}

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub chrome: PageChrome,
    pub company: &'static CompanyProfile,
}

pub async fn index(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> impl IntoResponse {
    let query = BlogQuery {
        limit: Some(LATEST_POSTS),
        ..Default::default()
    };
    // The section is simply hidden when the blog is unavailable.
    let latest_posts = match state.blogs.list(&query, &ctx.public_call()).await {
        Ok(listing) => listing
            .posts
            .into_iter()
            .take(LATEST_POSTS as usize)
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Latest posts unavailable for home page");
            Vec::new()
        }
    };

    let seo = SeoMeta::page(&state.site, "", COMPANY.mission, "/");
    HomeTemplate {
        chrome: PageChrome::public(&state, &session, seo, "home").await,
        services: SERVICES,
        latest_posts,
    }
}

pub async fn about(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let seo = SeoMeta::page(&state.site, "About", COMPANY.mission, "/about");
    AboutTemplate {
        chrome: PageChrome::public(&state, &session, seo, "about").await,
        company: &COMPANY,
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
