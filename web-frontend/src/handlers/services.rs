use super::{errors::not_found_page, PageChrome};
use crate::content::{find_service, ServiceOffering, SERVICES};
use crate::services::seo::SeoMeta;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "pages/services.html")]
pub struct ServicesTemplate {
    pub chrome: PageChrome,
    pub services: &'static [ServiceOffering],
}

#[derive(Template)]
#[template(path = "pages/service_detail.html")]
pub struct ServiceDetailTemplate {
    pub chrome: PageChrome,
    pub service: &'static ServiceOffering,
    pub others: Vec<&'static ServiceOffering>,
}

pub async fn services_index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let seo = SeoMeta::page(
        &state.site,
        "Services",
        "Web, mobile, cloud, marketing and training services.",
        "/services",
    );
    ServicesTemplate {
        chrome: PageChrome::public(&state, &session, seo, "services").await,
        services: SERVICES,
    }
}

pub async fn service_detail(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Response {
    let Some(service) = find_service(&slug) else {
        return not_found_page(&state, &session).await;
    };

    let seo = SeoMeta::page(&state.site, service.name, service.summary, &service.path());
    ServiceDetailTemplate {
        chrome: PageChrome::public(&state, &session, seo, "services").await,
        service,
        others: SERVICES.iter().filter(|s| s.slug != service.slug).collect(),
    }
    .into_response()
}
