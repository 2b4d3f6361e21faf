use super::{PageChrome, RequestContext};
use crate::error::ApiError;
use crate::models::admin::{sign_in, sign_out};
use crate::models::AdminUser;
use crate::services::flash::{push_banner, Banner};
use crate::utils::jwt::decode_jwt_claims;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub chrome: PageChrome,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn login_error(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(format!(
            "<p class='form-error' role='alert'>{}</p>",
            html_escape(message)
        )),
    )
        .into_response()
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    admin: Option<AdminUser>,
) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }
    LoginTemplate {
        chrome: PageChrome::login(&state, &session).await,
    }
    .into_response()
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    Form(payload): Form<LoginRequest>,
) -> Response {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return login_error("Enter your email and password.");
    }

    let response = match state
        .auth
        .login(email, &payload.password, ctx.request_id.as_deref())
        .await
    {
        Ok(response) => response,
        Err(ApiError::Unauthorized) | Err(ApiError::Rejected { .. }) => {
            tracing::info!("Admin login refused");
            return login_error("Invalid email or password");
        }
        Err(e) => return login_error(&e.user_message()),
    };

    // The frontend only reads the claims; the API verifies the token itself.
    let claims = match decode_jwt_claims(&response.token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::error!("Failed to decode JWT claims: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<p class='form-error' role='alert'>Authentication error</p>"),
            )
                .into_response();
        }
    };

    if let Err(e) = sign_in(&session, &response.token, &claims).await {
        tracing::error!("Failed to store admin session: {}", e);
        return login_error("Could not start your session. Please try again.");
    }

    tracing::info!(user_id = %claims.sub, "Admin logged in successfully");
    let welcome = format!("Welcome back, {}.", claims.display_name());
    push_banner(&session, Banner::success(welcome)).await;
    super::see_other(&headers, "/admin")
}

pub async fn logout_handler(session: Session, headers: HeaderMap) -> Response {
    sign_out(&session).await;
    push_banner(&session, Banner::info("You have been signed out.")).await;
    super::see_other(&headers, "/admin/login")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_fragments_are_escaped() {
        assert_eq!(
            html_escape("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }
}
