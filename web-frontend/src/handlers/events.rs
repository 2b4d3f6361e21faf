use super::{PageChrome, RequestContext};
use crate::models::event::order_for_listing;
use crate::models::Event;
use crate::services::seo::SeoMeta;
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "pages/events.html")]
pub struct EventsTemplate {
    pub chrome: PageChrome,
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
    pub unavailable: bool,
}

pub async fn events_index(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> impl IntoResponse {
    let (upcoming, past, unavailable) = match state.outreach.events(&ctx.public_call()).await {
        Ok(events) => {
            let (upcoming, past) = order_for_listing(events, chrono::Utc::now());
            (upcoming, past, false)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Events unavailable");
            (Vec::new(), Vec::new(), true)
        }
    };

    let seo = SeoMeta::page(
        &state.site,
        "Events",
        "Meetups, workshops and webinars.",
        "/events",
    );
    EventsTemplate {
        chrome: PageChrome::public(&state, &session, seo, "events").await,
        upcoming,
        past,
        unavailable,
    }
}
