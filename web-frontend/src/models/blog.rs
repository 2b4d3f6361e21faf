use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// A blog article as returned by `/api/blogs`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(alias = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Pre-rendered HTML body.
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "featuredImage")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "author_name")]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "createdAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: u64,
}

impl BlogPost {
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// e.g. "March 4, 2025"; empty when unpublished.
    pub fn published_label(&self) -> String {
        self.published_at
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        &self.excerpt
    }
}

/// The API sends the author either as a plain name or as `{ "name": ... }`.
fn author_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Author {
        Name(String),
        Profile { name: String },
        Missing(()),
    }

    Ok(match Author::deserialize(deserializer)? {
        Author::Name(name) | Author::Profile { name } => name,
        Author::Missing(()) => String::new(),
    })
}

/// One page of posts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListing {
    #[serde(alias = "blogs", alias = "items")]
    pub posts: Vec<BlogPost>,
    #[serde(default = "first_page", alias = "currentPage")]
    pub page: u32,
    #[serde(default = "first_page", alias = "pages")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl BlogListing {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Listing responses are either paginated objects or bare arrays.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum BlogListResponse {
    Paged(BlogListing),
    Plain(Vec<BlogPost>),
}

impl From<BlogListResponse> for BlogListing {
    fn from(response: BlogListResponse) -> Self {
        match response {
            BlogListResponse::Paged(listing) => listing,
            BlogListResponse::Plain(posts) => BlogListing {
                posts,
                page: 1,
                total_pages: 1,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl BlogQuery {
    /// Empty category parameters from the filter form mean "all".
    pub fn normalized(mut self) -> Self {
        self.category = self.category.filter(|c| !c.trim().is_empty());
        self.page = self.page.filter(|p| *p > 0);
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn posted_label(&self) -> String {
        self.created_at
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Reader comment submitted from an article page.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(
        min = 2,
        max = 2000,
        message = "Comment must be between 2 and 2000 characters"
    ))]
    pub content: String,
}

impl NewComment {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_accepts_author_shapes() {
        let plain: BlogPost = serde_json::from_value(json!({
            "_id": "p1", "slug": "a", "title": "A", "author": "Jane"
        }))
        .unwrap();
        assert_eq!(plain.id, "p1");
        assert_eq!(plain.author, "Jane");

        let nested: BlogPost = serde_json::from_value(json!({
            "id": "p2", "slug": "b", "title": "B", "author": {"name": "Ken", "bio": "x"},
            "publishedAt": "2025-03-04T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(nested.author, "Ken");
        assert_eq!(nested.published_label(), "March 4, 2025");
    }

    #[test]
    fn listing_accepts_bare_arrays() {
        let response: BlogListResponse =
            serde_json::from_value(json!([{ "id": "1", "slug": "s", "title": "T" }])).unwrap();
        let listing = BlogListing::from(response);
        assert_eq!(listing.posts.len(), 1);
        assert!(!listing.has_next());
        assert!(!listing.has_previous());
    }

    #[test]
    fn listing_reads_pagination() {
        let response: BlogListResponse = serde_json::from_value(json!({
            "blogs": [], "currentPage": 2, "totalPages": 3
        }))
        .unwrap();
        let listing = BlogListing::from(response);
        assert!(listing.has_previous());
        assert!(listing.has_next());
    }

    #[test]
    fn comment_length_is_bounded() {
        let comment = NewComment {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            content: "x".into(),
        };
        assert!(comment.validate().is_err());

        let comment = NewComment {
            content: "Great read".into(),
            ..comment
        };
        assert!(comment.validate().is_ok());
    }
}
