use super::{FieldErrors, PageChrome, RequestContext};
use crate::error::ApiError;
use crate::models::{PartnershipRequest, PartnershipType};
use crate::services::flash::{push_banner, Banner};
use crate::services::seo::SeoMeta;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;
use validator::Validate;

#[derive(Template)]
#[template(path = "pages/partnerships.html")]
pub struct PartnershipsTemplate {
    pub chrome: PageChrome,
    pub form: PartnershipRequest,
    pub types: &'static [PartnershipType],
    pub errors: FieldErrors,
}

async fn render(
    state: &AppState,
    session: &Session,
    form: PartnershipRequest,
    errors: FieldErrors,
    status: StatusCode,
) -> Response {
    let seo = SeoMeta::page(
        &state.site,
        "Partnerships",
        "Partner with us on technology, training and referrals.",
        "/partnerships",
    );
    let page = PartnershipsTemplate {
        chrome: PageChrome::public(state, session, seo, "partnerships").await,
        form,
        types: &PartnershipType::ALL,
        errors,
    };
    (status, page).into_response()
}

pub async fn partnerships_page(State(state): State<AppState>, session: Session) -> Response {
    render(
        &state,
        &session,
        PartnershipRequest::default(),
        FieldErrors::default(),
        StatusCode::OK,
    )
    .await
}

pub async fn submit_partnership(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Form(request): Form<PartnershipRequest>,
) -> Response {
    let request = request.trimmed();
    if let Err(errors) = request.validate() {
        let errors = FieldErrors::from_validation(&errors);
        return render(&state, &session, request, errors, StatusCode::UNPROCESSABLE_ENTITY).await;
    }

    match state
        .outreach
        .submit_partnership(&request, &ctx.public_call())
        .await
    {
        Ok(()) => {
            let thanks = "Thanks for reaching out! We'll be in touch within two business days.";
            push_banner(&session, Banner::success(thanks)).await;
            Redirect::to("/partnerships").into_response()
        }
        Err(ApiError::Rejected { message, .. }) => {
            let mut errors = FieldErrors::default();
            errors.insert("form", message);
            render(&state, &session, request, errors, StatusCode::UNPROCESSABLE_ENTITY).await
        }
        Err(e) => {
            // Keep what was typed.
            push_banner(&session, Banner::error(e.user_message())).await;
            render(
                &state,
                &session,
                request,
                FieldErrors::default(),
                StatusCode::BAD_GATEWAY,
            )
            .await
        }
    }
}
