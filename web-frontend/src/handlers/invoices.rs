//! Invoice Maker: list, editor, save, preview, PDF, send and delete.
//!
//! The editor posts the whole form on every change. Each post is rebuilt into
//! an [`InvoiceForm`], one edit is applied and the editor is rendered again
//! with fresh totals: as an HTMX fragment, or as a full page without HTMX.

use super::{
    admin_api_failure, errors::not_found_page, is_htmx, FieldErrors, PageChrome, RequestContext,
};
use crate::error::ApiError;
use crate::models::{AdminUser, EditorAction, InvoiceFormInput, InvoiceRecord, InvoiceSummary};
use crate::services::flash::{push_banner, Banner};
use crate::services::initial_data;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use invoicing_core::{format_with_symbol, Currency, InvoiceForm, InvoiceTotals};
use tower_sessions::Session;

const INVOICES_PATH: &str = "/admin/invoices";

fn edit_path(id: &str) -> String {
    format!("{}/{}/edit", INVOICES_PATH, id)
}

fn initial_data_key(id: &str) -> String {
    format!("invoice:{}", id)
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// One editor row, with display strings prepared.
pub struct LineView {
    pub index: usize,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
    pub description_error: String,
    pub quantity_error: String,
    pub unit_price_error: String,
}

pub struct CurrencyOption {
    pub code: &'static str,
    pub label: String,
    pub selected: bool,
}

/// Everything the editor template shows.
pub struct InvoiceEditorView {
    pub id: String,
    pub invoice_number: String,
    pub form: InvoiceForm,
    pub issue_date: String,
    pub due_date: String,
    pub tax_rate: String,
    pub discount: String,
    pub currencies: Vec<CurrencyOption>,
    pub lines: Vec<LineView>,
    pub can_remove_lines: bool,
    pub subtotal: String,
    pub discount_total: String,
    pub tax_amount: String,
    pub total: String,
    /// Discount larger than the subtotal.
    pub negative_total: bool,
    /// Refused edits and API failures shown above the form.
    pub notice: String,
    pub errors: FieldErrors,
}

impl InvoiceEditorView {
    pub fn new(
        record: Option<(&str, &str)>,
        form: InvoiceForm,
        errors: FieldErrors,
        notice: String,
    ) -> Self {
        let totals: InvoiceTotals = form.totals();
        let currency = form.currency;
        let money = |amount| format_with_symbol(amount, currency);

        let lines = form
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let field = |name: &str| {
                    errors
                        .message(&format!("items[{}].{}", index, name))
                        .to_string()
                };
                LineView {
                    index,
                    description: item.description.clone(),
                    quantity: item.quantity.normalize().to_string(),
                    unit_price: item.unit_price.normalize().to_string(),
                    total: money(item.total),
                    description_error: field("description"),
                    quantity_error: field("quantity"),
                    unit_price_error: field("unit_price"),
                }
            })
            .collect();

        let (id, invoice_number) = record
            .map(|(id, number)| (id.to_string(), number.to_string()))
            .unwrap_or_default();

        Self {
            id,
            invoice_number,
            issue_date: form.issue_date.format("%Y-%m-%d").to_string(),
            due_date: form.due_date.format("%Y-%m-%d").to_string(),
            tax_rate: form.tax_rate.normalize().to_string(),
            discount: form.discount.normalize().to_string(),
            currencies: Currency::ALL
                .iter()
                .map(|c| CurrencyOption {
                    code: c.code(),
                    label: format!("{} ({})", c.code(), c.symbol()),
                    selected: *c == currency,
                })
                .collect(),
            lines,
            can_remove_lines: form.items.len() > 1,
            subtotal: money(totals.subtotal),
            discount_total: money(form.discount),
            tax_amount: money(totals.tax_amount),
            total: money(totals.total),
            negative_total: totals.is_negative(),
            notice,
            errors,
            form,
        }
    }

    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn heading(&self) -> String {
        if !self.invoice_number.is_empty() {
            format!("Invoice {}", self.invoice_number)
        } else if self.is_saved() {
            "Edit invoice".to_string()
        } else {
            "New invoice".to_string()
        }
    }
}

#[derive(Template)]
#[template(path = "admin/invoices.html")]
pub struct InvoiceListTemplate {
    pub chrome: PageChrome,
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Template)]
#[template(path = "admin/invoice_editor.html")]
pub struct InvoiceEditorPage {
    pub chrome: PageChrome,
    pub editor: InvoiceEditorView,
}

#[derive(Template)]
#[template(path = "admin/invoice_editor_form.html")]
pub struct InvoiceEditorFragment {
    pub editor: InvoiceEditorView,
}

/// Printable view of a saved invoice.
#[derive(Template)]
#[template(path = "admin/invoice_preview.html")]
pub struct InvoicePreviewTemplate {
    pub chrome: PageChrome,
    pub record: InvoiceRecord,
    pub lines: Vec<PreviewLine>,
    pub subtotal: String,
    pub discount: String,
    pub tax_amount: String,
    pub total: String,
}

pub struct PreviewLine {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

async fn render_editor(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
    admin: &AdminUser,
    editor: InvoiceEditorView,
    status: StatusCode,
) -> Response {
    if is_htmx(headers) {
        return (status, InvoiceEditorFragment { editor }).into_response();
    }
    let title = editor.heading();
    let page = InvoiceEditorPage {
        chrome: PageChrome::admin(state, session, admin, &title, "invoices").await,
        editor,
    };
    (status, page).into_response()
}

pub async fn list_invoices(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
) -> Response {
    let invoices = match state.invoices.list(&ctx.admin_call(&admin)).await {
        Ok(invoices) => invoices,
        Err(e) => return admin_api_failure(&session, &headers, &e, "/admin").await,
    };

    InvoiceListTemplate {
        chrome: PageChrome::admin(&state, &session, &admin, "Invoices", "invoices").await,
        invoices,
    }
    .into_response()
}

pub async fn new_invoice(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    admin: AdminUser,
) -> Response {
    let editor = InvoiceEditorView::new(
        None,
        InvoiceForm::new_draft(today()),
        FieldErrors::default(),
        String::new(),
    );
    render_editor(&state, &session, &headers, &admin, editor, StatusCode::OK).await
}

pub async fn edit_invoice(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    let mut stashed = initial_data::claim::<InvoiceRecord>(&session, &initial_data_key(&id)).await;

    let record = match stashed.take() {
        Some(record) => record,
        None => match state.invoices.get(&id, &ctx.admin_call(&admin)).await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => return not_found_page(&state, &session).await,
            Err(e) => return admin_api_failure(&session, &headers, &e, INVOICES_PATH).await,
        },
    };

    let mut form = record.form;
    form.recompute_line_totals();
    let editor = InvoiceEditorView::new(
        Some((record.id.as_str(), record.invoice_number.as_str())),
        form,
        FieldErrors::default(),
        String::new(),
    );
    render_editor(&state, &session, &headers, &admin, editor, StatusCode::OK).await
}

/// Apply one editor action to the posted form and render the result.
pub async fn editor_action(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    admin: AdminUser,
    Form(input): Form<InvoiceFormInput>,
) -> Response {
    let parsed = input.to_form(today());
    let mut form = parsed.form;
    let mut errors = FieldErrors::default();
    errors.extend(parsed.field_errors);

    let action = EditorAction::parse(input.action.as_deref());
    // A refused edit leaves the form as posted; only the notice changes.
    let notice = match form.apply(action.to_edit()) {
        Ok(_) => String::new(),
        Err(e) => {
            tracing::debug!(error = %e, ?action, "Editor action refused");
            form.recompute_line_totals();
            e.to_string()
        }
    };

    let record_id = input.record_id().map(str::to_string);
    let record = record_id
        .as_deref()
        .map(|id| (id, input.invoice_number.as_str()));
    let editor = InvoiceEditorView::new(record, form, errors, notice);
    render_editor(&state, &session, &headers, &admin, editor, StatusCode::OK).await
}

pub async fn save_invoice(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Form(input): Form<InvoiceFormInput>,
) -> Response {
    let parsed = input.to_form(today());
    let mut form = parsed.form;
    form.recompute_line_totals();

    let record_id = input.record_id().map(str::to_string);
    let record = record_id
        .as_deref()
        .map(|id| (id, input.invoice_number.as_str()));

    let mut errors = FieldErrors::default();
    if let Err(validation) = form.validate_for_submit() {
        errors = FieldErrors::from_validation(&validation);
    }
    errors.extend(parsed.field_errors);
    if !errors.is_empty() {
        tracing::info!(fields = errors.len(), "Invoice failed validation");
        let editor = InvoiceEditorView::new(
            record,
            form,
            errors,
            "Please correct the highlighted fields.".to_string(),
        );
        return render_editor(
            &state,
            &session,
            &headers,
            &admin,
            editor,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await;
    }

    let payload = form.to_payload();
    let call = ctx.admin_call(&admin);
    let result = match record_id.as_deref() {
        Some(id) => state.invoices.update(id, &payload, &call).await,
        None => state.invoices.create(&payload, &call).await,
    };

    match result {
        Ok(saved) => {
            let record = saved.into_record(payload.form);
            initial_data::stash(&session, &initial_data_key(&record.id), &record).await;
            push_banner(
                &session,
                Banner::success(format!("Invoice {} saved.", record.display_number())),
            )
            .await;
            super::see_other(&headers, &edit_path(&record.id))
        }
        Err(ApiError::Unauthorized) => {
            admin_api_failure(&session, &headers, &ApiError::Unauthorized, INVOICES_PATH).await
        }
        Err(e) => {
            let status = match e {
                ApiError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_GATEWAY,
            };
            let editor = InvoiceEditorView::new(
                record,
                payload.form,
                FieldErrors::default(),
                e.user_message(),
            );
            render_editor(&state, &session, &headers, &admin, editor, status).await
        }
    }
}

pub async fn preview_invoice(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    let mut record = match state.invoices.get(&id, &ctx.admin_call(&admin)).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => return not_found_page(&state, &session).await,
        Err(e) => return admin_api_failure(&session, &headers, &e, &edit_path(&id)).await,
    };

    record.form.recompute_line_totals();
    let currency = record.form.currency;
    let totals = record.form.totals();
    let money = |amount| format_with_symbol(amount, currency);

    let lines = record
        .form
        .items
        .iter()
        .map(|item| PreviewLine {
            description: item.description.clone(),
            quantity: item.quantity.normalize().to_string(),
            unit_price: money(item.unit_price),
            total: money(item.total),
        })
        .collect();

    let title = format!("Invoice {}", record.display_number());
    InvoicePreviewTemplate {
        chrome: PageChrome::admin(&state, &session, &admin, &title, "invoices").await,
        lines,
        subtotal: money(totals.subtotal),
        discount: money(record.form.discount),
        tax_amount: money(totals.tax_amount),
        total: money(totals.total),
        record,
    }
    .into_response()
}

/// `invoice-{number}.pdf`, keeping only characters safe in a header value.
fn pdf_filename(number: &str) -> String {
    let safe: String = number
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if safe.is_empty() {
        "invoice.pdf".to_string()
    } else {
        format!("invoice-{}.pdf", safe)
    }
}

pub async fn download_pdf(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    let call = ctx.admin_call(&admin);
    let (record, pdf) = tokio::join!(
        state.invoices.get(&id, &call),
        state.invoices.download_pdf(&id, &call)
    );

    let number = match record {
        Ok(record) => record.display_number().to_string(),
        Err(e) if e.is_not_found() => return not_found_page(&state, &session).await,
        Err(e) => {
            tracing::warn!(invoice_id = %id, error = %e, "Invoice number unavailable for PDF name");
            id.clone()
        }
    };

    let pdf = match pdf {
        Ok(pdf) => pdf,
        Err(e) if e.is_not_found() => return not_found_page(&state, &session).await,
        Err(e) => return admin_api_failure(&session, &headers, &e, &edit_path(&id)).await,
    };

    let disposition = format!("attachment; filename=\"{}\"", pdf_filename(&number));
    let mut response = pdf.bytes.into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&pdf.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/pdf")),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response_headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

pub async fn send_invoice(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.invoices.send(&id, &ctx.admin_call(&admin)).await {
        Ok(()) => {
            push_banner(&session, Banner::success("Invoice sent to the client.")).await;
            super::see_other(&headers, &edit_path(&id))
        }
        Err(e) => admin_api_failure(&session, &headers, &e, &edit_path(&id)).await,
    }
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    headers: HeaderMap,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.invoices.delete(&id, &ctx.admin_call(&admin)).await {
        Ok(()) => {
            push_banner(&session, Banner::success("Invoice deleted.")).await;
            super::see_other(&headers, INVOICES_PATH)
        }
        Err(e) => admin_api_failure(&session, &headers, &e, &edit_path(&id)).await,
    }
}
