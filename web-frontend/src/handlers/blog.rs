use super::{errors::not_found_page, FieldErrors, PageChrome, RequestContext};
use crate::error::ApiError;
use crate::models::{BlogListing, BlogPost, BlogQuery, Comment, NewComment};
use crate::services::flash::{push_banner, Banner};
use crate::services::seo::SeoMeta;
use crate::services::{view_tracker, CallContext};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;
use validator::Validate;

#[derive(Template)]
#[template(path = "pages/blog_list.html")]
pub struct BlogListTemplate {
    pub chrome: PageChrome,
    pub listing: BlogListing,
    pub category: String,
    pub unavailable: bool,
}

impl BlogListTemplate {
    fn page_link(&self, page: u32) -> String {
        let query = BlogQuery {
            page: Some(page),
            category: Some(self.category.clone()).filter(|c| !c.is_empty()),
            limit: None,
        };
        match serde_urlencoded::to_string(&query) {
            Ok(query) => format!("/blog?{}", query),
            Err(_) => "/blog".to_string(),
        }
    }

    pub fn previous_link(&self) -> String {
        self.page_link(self.listing.page.saturating_sub(1).max(1))
    }

    pub fn next_link(&self) -> String {
        self.page_link(self.listing.page + 1)
    }
}

#[derive(Template)]
#[template(path = "pages/blog_post.html")]
pub struct BlogPostTemplate {
    pub chrome: PageChrome,
    pub post: BlogPost,
    pub related: Vec<BlogPost>,
    pub comments: Vec<Comment>,
    pub comment_form: NewComment,
    pub errors: FieldErrors,
}

pub async fn blog_index(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Query(query): Query<BlogQuery>,
) -> impl IntoResponse {
    let query = query.normalized();
    let category = query.category.clone().unwrap_or_default();

    let (listing, unavailable) = match state.blogs.list(&query, &ctx.public_call()).await {
        Ok(listing) => (listing, false),
        Err(e) => {
            tracing::warn!(error = %e, "Blog listing unavailable");
            (BlogListing::default(), true)
        }
    };

    let seo = SeoMeta::page(
        &state.site,
        "Blog",
        "Insights on software, cloud and digital growth.",
        "/blog",
    );
    BlogListTemplate {
        chrome: PageChrome::public(&state, &session, seo, "blog").await,
        listing,
        category,
        unavailable,
    }
}

pub async fn blog_post(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Path(slug): Path<String>,
) -> Response {
    let post = match fetch_post(&state, &session, &ctx, &slug).await {
        Ok(post) => post,
        Err(response) => return response,
    };

    if !ctx.is_bot && view_tracker::first_view(&session, &post.id).await {
        if let Some(visitor) = view_tracker::visitor_id(&session).await {
            record_view(&state, &ctx, &post.id, visitor);
        }
    }

    render_post(
        &state,
        &session,
        &ctx,
        post,
        NewComment {
            name: String::new(),
            email: String::new(),
            content: String::new(),
        },
        FieldErrors::default(),
        StatusCode::OK,
    )
    .await
}

pub async fn post_comment(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Path(slug): Path<String>,
    Form(comment): Form<NewComment>,
) -> Response {
    let post = match fetch_post(&state, &session, &ctx, &slug).await {
        Ok(post) => post,
        Err(response) => return response,
    };

    let comment = comment.trimmed();
    if let Err(errors) = comment.validate() {
        let errors = FieldErrors::from_validation(&errors);
        return render_post(
            &state,
            &session,
            &ctx,
            post,
            comment,
            errors,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await;
    }

    match state
        .blogs
        .add_comment(&post.id, &comment, &ctx.public_call())
        .await
    {
        Ok(()) => {
            tracing::info!(post_id = %post.id, "Comment submitted");
            push_banner(&session, Banner::success("Thanks! Your comment has been posted.")).await;
            Redirect::to(&format!("{}#comments", post.path())).into_response()
        }
        Err(ApiError::Rejected { message, .. }) => {
            let mut errors = FieldErrors::default();
            errors.insert("content", message);
            render_post(
                &state,
                &session,
                &ctx,
                post,
                comment,
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
        Err(e) => {
            push_banner(&session, Banner::error(e.user_message())).await;
            Redirect::to(&post.path()).into_response()
        }
    }
}

async fn fetch_post(
    state: &AppState,
    session: &Session,
    ctx: &RequestContext,
    slug: &str,
) -> Result<BlogPost, Response> {
    match state.blogs.get(slug, &ctx.public_call()).await {
        Ok(post) => Ok(post),
        Err(e) if e.is_not_found() => Err(not_found_page(state, session).await),
        Err(e) => {
            push_banner(session, Banner::error(e.user_message())).await;
            Err(Redirect::to("/blog").into_response())
        }
    }
}

/// Report the view in the background; failures are only logged.
fn record_view(state: &AppState, ctx: &RequestContext, post_id: &str, visitor: String) {
    let blogs = state.blogs.clone();
    let post_id = post_id.to_string();
    let request_id = ctx.request_id.clone();

    tokio::spawn(async move {
        let call = CallContext::public(request_id.as_deref());
        if let Err(e) = blogs.record_view(&post_id, &visitor, &call).await {
            tracing::warn!(post_id = %post_id, error = %e, "Failed to record blog view");
        }
    });
}

async fn render_post(
    state: &AppState,
    session: &Session,
    ctx: &RequestContext,
    post: BlogPost,
    comment_form: NewComment,
    errors: FieldErrors,
    status: StatusCode,
) -> Response {
    let call = ctx.public_call();
    let (related, comments) = tokio::join!(
        state.blogs.related(&post.slug, &call),
        state.blogs.comments(&post.id, &call)
    );
    let related = related.unwrap_or_else(|e| {
        tracing::warn!(slug = %post.slug, error = %e, "Related posts unavailable");
        Vec::new()
    });
    let comments = comments.unwrap_or_else(|e| {
        tracing::warn!(post_id = %post.id, error = %e, "Comments unavailable");
        Vec::new()
    });

    let seo = SeoMeta::article(&state.site, &post);
    let page = BlogPostTemplate {
        chrome: PageChrome::public(state, session, seo, "blog").await,
        related: related.into_iter().filter(|p| p.id != post.id).take(3).collect(),
        post,
        comments,
        comment_form,
        errors,
    };
    (status, page).into_response()
}
