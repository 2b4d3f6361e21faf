use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{configuration_directory, load_layered};
use service_core::error::AppError;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub site: SiteSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct ApiSettings {
    /// Root of the REST API, e.g. `https://api.example.com`; paths start at `/api`.
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Sent as `x-api-key` on public calls (views, comments, partnerships)
    /// when the API requires it.
    #[serde(default)]
    pub public_api_key: Option<Secret<String>>,
}

fn default_timeout_seconds() -> u64 {
    15
}

/// Public identity of the site, used for canonical URLs and structured data.
#[derive(Deserialize, Clone, Debug)]
pub struct SiteSettings {
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub default_og_image: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub twitter_handle: String,
}

impl SiteSettings {
    /// Absolute URL for a site path or an already absolute URL.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC endpoint; span export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-IP budget for public form submissions and admin login attempts.
#[derive(Deserialize, Clone)]
pub struct RateLimitSettings {
    pub form_attempts: u32,
    pub window_seconds: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            form_attempts: 5,
            window_seconds: 60,
        }
    }
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let configuration_directory = configuration_directory("web-frontend")?;
    load_layered(&configuration_directory)
}
