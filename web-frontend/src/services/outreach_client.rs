use crate::error::ApiError;
use crate::models::{Event, PartnershipRequest};
use crate::services::api_client::{ApiClient, CallContext};
use std::sync::Arc;

/// Events and partnership enquiries.
#[derive(Clone)]
pub struct OutreachClient {
    api: Arc<ApiClient>,
}

impl OutreachClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn events(&self, ctx: &CallContext<'_>) -> Result<Vec<Event>, ApiError> {
        self.api.get_json(&["events"], ctx).await
    }

    pub async fn submit_partnership(
        &self,
        request: &PartnershipRequest,
        ctx: &CallContext<'_>,
    ) -> Result<(), ApiError> {
        self.api
            .post_no_content(&["partnerships", "submit"], request, ctx)
            .await?;
        tracing::info!(company = %request.company, "Partnership enquiry submitted");
        Ok(())
    }
}
