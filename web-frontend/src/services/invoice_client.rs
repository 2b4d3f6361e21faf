use crate::error::ApiError;
use crate::models::{InvoiceRecord, InvoiceSummary, SavedInvoice};
use crate::services::api_client::{ApiClient, CallContext, Download};
use invoicing_core::InvoicePayload;
use metrics::counter;
use std::sync::Arc;

/// Invoices live behind `/api/invoices`; every call needs the admin token.
#[derive(Clone)]
pub struct InvoiceClient {
    api: Arc<ApiClient>,
}

impl InvoiceClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, ctx: &CallContext<'_>) -> Result<Vec<InvoiceSummary>, ApiError> {
        self.api.get_json(&["invoices"], ctx).await
    }

    pub async fn get(&self, id: &str, ctx: &CallContext<'_>) -> Result<InvoiceRecord, ApiError> {
        self.api.get_json(&["invoices", id], ctx).await
    }

    pub async fn create(
        &self,
        payload: &InvoicePayload,
        ctx: &CallContext<'_>,
    ) -> Result<SavedInvoice, ApiError> {
        let saved: SavedInvoice = self.api.post_json(&["invoices"], payload, ctx).await?;
        counter!("invoices_saved_total", "operation" => "create").increment(1);
        tracing::info!(invoice_id = %saved.id, "Invoice created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &InvoicePayload,
        ctx: &CallContext<'_>,
    ) -> Result<SavedInvoice, ApiError> {
        let saved: SavedInvoice = self.api.put_json(&["invoices", id], payload, ctx).await?;
        counter!("invoices_saved_total", "operation" => "update").increment(1);
        tracing::info!(invoice_id = %saved.id, "Invoice updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str, ctx: &CallContext<'_>) -> Result<(), ApiError> {
        self.api.delete(&["invoices", id], ctx).await?;
        tracing::info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    pub async fn download_pdf(
        &self,
        id: &str,
        ctx: &CallContext<'_>,
    ) -> Result<Download, ApiError> {
        self.api.get_bytes(&["invoices", id, "pdf"], ctx).await
    }

    /// Ask the API to email the invoice to the client.
    pub async fn send(&self, id: &str, ctx: &CallContext<'_>) -> Result<(), ApiError> {
        self.api
            .post_no_content(&["invoices", id, "send"], &serde_json::json!({}), ctx)
            .await?;
        tracing::info!(invoice_id = %id, "Invoice sent");
        Ok(())
    }
}
