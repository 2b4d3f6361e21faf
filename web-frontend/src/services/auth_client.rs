use crate::error::ApiError;
use crate::services::api_client::{ApiClient, CallContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

#[derive(Clone)]
pub struct AuthClient {
    api: Arc<ApiClient>,
}

impl AuthClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Exchange admin credentials for a bearer token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        request_id: Option<&str>,
    ) -> Result<LoginResponse, ApiError> {
        let ctx = CallContext::public(request_id);
        self.api
            .post_json(&["auth", "login"], &LoginRequest { email, password }, &ctx)
            .await
    }
}
