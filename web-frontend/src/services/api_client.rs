//! JSON-over-HTTP access to the REST API.
//!
//! Every call carries trace context and the inbound request ID. Responses may
//! be bare JSON or wrapped as `{ "data": ... }`; both are accepted.

use crate::config::ApiSettings;
use crate::error::ApiError;
use metrics::counter;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use service_core::observability::{TracedClientExt, TracedRequest};
use std::time::Duration;

/// Per-call credentials and correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext<'a> {
    /// Admin bearer token; `None` for public calls.
    pub token: Option<&'a str>,
    pub request_id: Option<&'a str>,
}

impl<'a> CallContext<'a> {
    pub fn public(request_id: Option<&'a str>) -> Self {
        Self {
            token: None,
            request_id,
        }
    }

    pub fn authorized(token: &'a str, request_id: Option<&'a str>) -> Self {
        Self {
            token: Some(token),
            request_id,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Binary payload such as a generated PDF.
#[derive(Debug, Clone)]
pub struct Download {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct ApiClient {
    client: Client,
    settings: ApiSettings,
}

impl ApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(concat!("web-frontend/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    /// Build `{base_url}/api/{segments...}` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|e| ApiError::Decode(format!("invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Decode("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn prepare(&self, request: TracedRequest, ctx: &CallContext<'_>) -> TracedRequest {
        let request = request
            .maybe_bearer_auth(ctx.token)
            .request_id(ctx.request_id);

        match (&ctx.token, &self.settings.public_api_key) {
            (None, Some(key)) => request.header("x-api-key", key.expose_secret()),
            _ => request,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        ctx: &CallContext<'_>,
    ) -> Result<T, ApiError> {
        self.get_json_with_query(segments, &[] as &[(&str, &str)], ctx)
            .await
    }

    pub async fn get_json_with_query<T, Q>(
        &self,
        segments: &[&str],
        query: &Q,
        ctx: &CallContext<'_>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.prepare(self.client.traced_get(url.as_str()).query(query), ctx);
        let response = send("GET", &url, request).await?;
        decode(&url, response).await
    }

    pub async fn post_json<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        ctx: &CallContext<'_>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let request = self.prepare(self.client.traced_post(url.as_str()).json(body), ctx);
        let response = send("POST", &url, request).await?;
        decode(&url, response).await
    }

    /// POST where only success matters; the response body is discarded.
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
        ctx: &CallContext<'_>,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        let request = self.prepare(self.client.traced_post(url.as_str()).json(body), ctx);
        send("POST", &url, request).await.map(|_| ())
    }

    pub async fn put_json<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        ctx: &CallContext<'_>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let request = self.prepare(self.client.traced_put(url.as_str()).json(body), ctx);
        let response = send("PUT", &url, request).await?;
        decode(&url, response).await
    }

    pub async fn delete(&self, segments: &[&str], ctx: &CallContext<'_>) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        let request = self.prepare(self.client.traced_delete(url.as_str()), ctx);
        send("DELETE", &url, request).await.map(|_| ())
    }

    pub async fn get_bytes(
        &self,
        segments: &[&str],
        ctx: &CallContext<'_>,
    ) -> Result<Download, ApiError> {
        let url = self.endpoint(segments)?;
        let request = self.prepare(self.client.traced_get(url.as_str()), ctx);
        let response = send("GET", &url, request).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(Download {
            content_type,
            bytes,
        })
    }
}

/// Send and map non-success statuses onto [`ApiError`].
async fn send(method: &str, url: &Url, request: TracedRequest) -> Result<Response, ApiError> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            counter!("api_requests_total", "outcome" => "transport_error").increment(1);
            tracing::error!(method = %method, url = %url, error = %e, "API request failed");
            return Err(ApiError::Transport(e));
        }
    };

    let status = response.status();
    if status.is_success() {
        counter!("api_requests_total", "outcome" => "ok").increment(1);
        return Ok(response);
    }

    counter!("api_requests_total", "outcome" => "error_status").increment(1);
    let error = status_error(status, url, response).await;
    match &error {
        ApiError::NotFound(_) => {
            tracing::info!(method = %method, url = %url, "API resource not found")
        }
        _ => tracing::warn!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            error = %error,
            "API request unsuccessful"
        ),
    }
    Err(error)
}

async fn status_error(status: StatusCode, url: &Url, response: Response) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(url.path().to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .message
                .or(body.error)
                .unwrap_or_else(|| "The request was rejected.".to_string());
            ApiError::Rejected {
                status: status.as_u16(),
                message,
            }
        }
        _ => ApiError::Upstream {
            status: status.as_u16(),
        },
    }
}

async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice::<Envelope<T>>(&bytes)
        .map(Envelope::into_inner)
        .map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to decode API response");
            ApiError::Decode(e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(ApiSettings {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
            public_api_key: None,
        })
        .unwrap()
    }

    #[test]
    fn endpoint_encodes_segments() {
        let api = client("http://api.local:5000/");
        let url = api.endpoint(&["blogs", "rust & web", "related"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://api.local:5000/api/blogs/rust%20&%20web/related"
        );
    }

    #[test]
    fn envelope_accepts_wrapped_and_bare() {
        let wrapped: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);

        let bare: Envelope<Vec<u32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(bare.into_inner(), vec![3]);
    }
}
