pub mod academy;
pub mod admin;
pub mod admin_courses;
pub mod admin_enrollments;
pub mod app;
pub mod auth;
pub mod blog;
pub mod errors;
pub mod events;
pub mod invoices;
pub mod metrics;
pub mod partnerships;
pub mod services;

use crate::error::ApiError;
use crate::models::admin::sign_out;
use crate::models::AdminUser;
use crate::services::flash::{push_banner, take_banners, Banner};
use crate::services::seo::SeoMeta;
use crate::services::CallContext;
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Datelike;
use service_core::middleware::{bot_detection::BotVerdict, tracing::RequestId};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tower_sessions::Session;
use validator::ValidationErrors;

/// Inline form messages keyed by field path (`client.email`, `items[0].description`).
#[derive(Debug, Clone, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        Self(service_core::utils::validation::field_messages(errors))
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn extend(&mut self, other: BTreeMap<String, String>) {
        self.0.extend(other);
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Message for `field`, or an empty string.
    pub fn message(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Request-scoped facts recorded by the middleware stack.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub is_bot: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext {
            request_id: parts.extensions.get::<RequestId>().map(|id| id.0.clone()),
            is_bot: parts
                .extensions
                .get::<BotVerdict>()
                .is_some_and(BotVerdict::is_bot),
        })
    }
}

impl RequestContext {
    pub fn public_call(&self) -> CallContext<'_> {
        CallContext::public(self.request_id.as_deref())
    }

    pub fn admin_call<'a>(&'a self, admin: &'a AdminUser) -> CallContext<'a> {
        CallContext::authorized(admin.token(), self.request_id.as_deref())
    }
}

/// Layout data shared by every full page.
pub struct PageChrome {
    pub seo: SeoMeta,
    pub banners: Vec<Banner>,
    pub site_name: String,
    pub year: i32,
    /// Navigation entry to highlight.
    pub active: &'static str,
    /// Signed-in administrator, empty on public pages.
    pub admin_name: String,
}

impl PageChrome {
    pub async fn public(
        state: &AppState,
        session: &Session,
        seo: SeoMeta,
        active: &'static str,
    ) -> Self {
        Self {
            seo,
            banners: take_banners(session).await,
            site_name: state.site.name.clone(),
            year: chrono::Utc::now().year(),
            active,
            admin_name: String::new(),
        }
    }

    pub async fn admin(
        state: &AppState,
        session: &Session,
        admin: &AdminUser,
        title: &str,
        active: &'static str,
    ) -> Self {
        Self {
            seo: SeoMeta::admin(&state.site, title),
            banners: take_banners(session).await,
            site_name: state.site.name.clone(),
            year: chrono::Utc::now().year(),
            active,
            admin_name: admin.display_name(),
        }
    }

    /// Chrome for the login page, before anyone is signed in.
    pub async fn login(state: &AppState, session: &Session) -> Self {
        Self {
            seo: SeoMeta::admin(&state.site, "Sign in"),
            banners: take_banners(session).await,
            site_name: state.site.name.clone(),
            year: chrono::Utc::now().year(),
            active: "login",
            admin_name: String::new(),
        }
    }

    pub fn is_active(&self, nav: &str) -> bool {
        self.active == nav
    }
}

pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Redirect that works for full page loads and HTMX requests alike.
pub fn see_other(headers: &HeaderMap, to: &str) -> Response {
    if is_htmx(headers) {
        match HeaderValue::from_str(to) {
            Ok(location) => {
                let mut response = StatusCode::OK.into_response();
                response.headers_mut().insert("HX-Redirect", location);
                response
            }
            Err(_) => Redirect::to("/").into_response(),
        }
    } else {
        Redirect::to(to).into_response()
    }
}

/// Present an API failure on an admin page.
///
/// Rejected credentials end the admin session and send the user to the login
/// page. Other failures are bannered and the user is sent to `back_to`, with
/// the page state left as it was.
pub async fn admin_api_failure(
    session: &Session,
    headers: &HeaderMap,
    error: &ApiError,
    back_to: &str,
) -> Response {
    push_banner(session, Banner::error(error.user_message())).await;

    if matches!(error, ApiError::Unauthorized) {
        sign_out(session).await;
        return see_other(headers, "/admin/login");
    }
    see_other(headers, back_to)
}
