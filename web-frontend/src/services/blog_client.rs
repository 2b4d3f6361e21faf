use crate::error::ApiError;
use crate::models::blog::BlogListResponse;
use crate::models::{BlogListing, BlogPost, BlogQuery, Comment, NewComment};
use crate::services::api_client::{ApiClient, CallContext};
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct ViewRequest<'a> {
    session_id: &'a str,
}

#[derive(Clone)]
pub struct BlogClient {
    api: Arc<ApiClient>,
}

impl BlogClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        query: &BlogQuery,
        ctx: &CallContext<'_>,
    ) -> Result<BlogListing, ApiError> {
        let response: BlogListResponse = self
            .api
            .get_json_with_query(&["blogs"], query, ctx)
            .await?;
        Ok(response.into())
    }

    pub async fn get(&self, slug: &str, ctx: &CallContext<'_>) -> Result<BlogPost, ApiError> {
        self.api.get_json(&["blogs", slug], ctx).await
    }

    pub async fn related(
        &self,
        slug: &str,
        ctx: &CallContext<'_>,
    ) -> Result<Vec<BlogPost>, ApiError> {
        self.api.get_json(&["blogs", slug, "related"], ctx).await
    }

    pub async fn comments(
        &self,
        post_id: &str,
        ctx: &CallContext<'_>,
    ) -> Result<Vec<Comment>, ApiError> {
        self.api.get_json(&["blogs", post_id, "comments"], ctx).await
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        comment: &NewComment,
        ctx: &CallContext<'_>,
    ) -> Result<(), ApiError> {
        self.api
            .post_no_content(&["blogs", post_id, "comments"], comment, ctx)
            .await
    }

    pub async fn record_view(
        &self,
        post_id: &str,
        session_id: &str,
        ctx: &CallContext<'_>,
    ) -> Result<(), ApiError> {
        self.api
            .post_no_content(&["blogs", post_id, "view"], &ViewRequest { session_id }, ctx)
            .await?;
        counter!("blog_views_recorded_total").increment(1);
        Ok(())
    }
}
