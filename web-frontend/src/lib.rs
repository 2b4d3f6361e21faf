pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use config::{Settings, SiteSettings};
use error::ApiError;
use service_core::middleware::rate_limit::{create_ip_rate_limiter, IpRateLimiter};
use service_core::observability::PrometheusHandle;
use services::{
    academy_client::AcademyClient, auth_client::AuthClient, blog_client::BlogClient,
    invoice_client::InvoiceClient, outreach_client::OutreachClient, ApiClient,
};
use std::sync::Arc;

/// Shared application state containing API clients
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthClient,
    pub blogs: BlogClient,
    pub academy: AcademyClient,
    pub invoices: InvoiceClient,
    pub outreach: OutreachClient,
    pub site: Arc<SiteSettings>,
    pub metrics: PrometheusHandle,
    /// Shared budget for public form posts and admin login attempts.
    pub form_limiter: IpRateLimiter,
}

impl AppState {
    pub fn new(settings: &Settings, metrics: PrometheusHandle) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(settings.api.clone())?);

        Ok(Self {
            auth: AuthClient::new(api.clone()),
            blogs: BlogClient::new(api.clone()),
            academy: AcademyClient::new(api.clone()),
            invoices: InvoiceClient::new(api.clone()),
            outreach: OutreachClient::new(api),
            site: Arc::new(settings.site.clone()),
            metrics,
            form_limiter: create_ip_rate_limiter(
                settings.rate_limit.form_attempts,
                settings.rate_limit.window_seconds,
            ),
        })
    }
}
