use crate::models::admin::{AdminClaims, SESSION_PROFILE_KEY, SESSION_TOKEN_KEY};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Guard for `/admin/*`: without a live session token the request is sent to
/// the login page.
pub async fn require_admin(
    session: Session,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let access_token: Option<String> = session.get(SESSION_TOKEN_KEY).await.unwrap_or(None);
    let claims: Option<AdminClaims> = session.get(SESSION_PROFILE_KEY).await.unwrap_or(None);

    let expired = claims
        .as_ref()
        .map_or(true, |c| c.is_expired(chrono::Utc::now().timestamp()));

    if access_token.is_none() || expired {
        tracing::debug!(path = %request.uri().path(), "Admin session required");
        return Ok(redirect_to_login(&request));
    }

    Ok(next.run(request).await)
}

fn redirect_to_login(request: &Request<Body>) -> Response {
    if request.headers().contains_key("HX-Request") {
        let mut response = StatusCode::OK.into_response();
        response.headers_mut().insert(
            "HX-Redirect",
            axum::http::HeaderValue::from_static("/admin/login"),
        );
        return response;
    }
    Redirect::to("/admin/login").into_response()
}
