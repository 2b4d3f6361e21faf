use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

pub const SESSION_TOKEN_KEY: &str = "admin.access_token";
pub const SESSION_PROFILE_KEY: &str = "admin.profile";

/// Claims carried by the admin bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    #[serde(alias = "id", alias = "userId")]
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AdminClaims {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self.email.split('@').next().unwrap_or("Admin").to_string(),
        }
    }

    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase();
        if initials.is_empty() {
            "A".to_string()
        } else {
            initials
        }
    }

    /// Tokens without an `exp` claim are treated as unexpired.
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_unix)
    }
}

/// Signed-in administrator, extracted from the session.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub claims: AdminClaims,
    pub access_token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract session",
                )
                    .into_response()
            })?;

        let access_token: Option<String> = session.get(SESSION_TOKEN_KEY).await.unwrap_or(None);
        let claims: Option<AdminClaims> = session.get(SESSION_PROFILE_KEY).await.unwrap_or(None);

        match (access_token, claims) {
            (Some(access_token), Some(claims))
                if !claims.is_expired(chrono::Utc::now().timestamp()) =>
            {
                Ok(AdminUser {
                    claims,
                    access_token,
                })
            }
            _ => Err(Redirect::to("/admin/login").into_response()),
        }
    }
}

impl AdminUser {
    pub fn token(&self) -> &str {
        &self.access_token
    }

    pub fn display_name(&self) -> String {
        self.claims.display_name()
    }
}

/// Store the token and its decoded claims after a successful login.
pub async fn sign_in(
    session: &Session,
    token: &str,
    claims: &AdminClaims,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_TOKEN_KEY, token).await?;
    session.insert(SESSION_PROFILE_KEY, claims).await?;
    Ok(())
}

/// Forget the admin credentials, keeping the rest of the session.
pub async fn sign_out(session: &Session) {
    if let Err(e) = session.remove_value(SESSION_TOKEN_KEY).await {
        tracing::warn!(error = %e, "Failed to remove admin token from session");
    }
    if let Err(e) = session.remove_value(SESSION_PROFILE_KEY).await {
        tracing::warn!(error = %e, "Failed to remove admin profile from session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(name: Option<&str>, exp: Option<i64>) -> AdminClaims {
        AdminClaims {
            sub: "u1".into(),
            email: "jane.doe@example.com".into(),
            name: name.map(String::from),
            role: Some("admin".into()),
            exp,
        }
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(claims(None, None).display_name(), "jane.doe");
        assert_eq!(claims(Some("Jane Doe"), None).initials(), "JD");
    }

    #[test]
    fn expiry_is_optional() {
        assert!(!claims(None, None).is_expired(2_000_000_000));
        assert!(claims(None, Some(100)).is_expired(200));
        assert!(!claims(None, Some(300)).is_expired(200));
    }
}
