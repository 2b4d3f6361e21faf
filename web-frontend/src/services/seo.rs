//! Page metadata and structured data for `<head>`.

use crate::config::SiteSettings;
use crate::models::BlogPost;
use serde_json::{json, Value};

/// Everything the base layout renders into `<head>`.
#[derive(Debug, Clone, Default)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    /// `website` or `article`.
    pub og_type: String,
    pub image: String,
    pub site_name: String,
    pub twitter_handle: String,
    pub keywords: String,
    pub published_time: String,
    pub modified_time: String,
    pub author: String,
    /// Serialized JSON-LD, already safe to place inside `<script>`.
    pub json_ld: Option<String>,
    /// Admin pages must not be indexed.
    pub noindex: bool,
}

impl SeoMeta {
    pub fn page(site: &SiteSettings, title: &str, description: &str, path: &str) -> Self {
        let title = if title.is_empty() {
            site.name.clone()
        } else {
            format!("{} | {}", title, site.name)
        };
        Self {
            title,
            description: description.to_string(),
            canonical_url: site.absolute_url(path),
            og_type: "website".to_string(),
            image: site.absolute_url(&site.default_og_image),
            site_name: site.name.clone(),
            twitter_handle: site.twitter_handle.clone(),
            ..Default::default()
        }
    }

    pub fn admin(site: &SiteSettings, title: &str) -> Self {
        Self {
            title: format!("{} | {} Admin", title, site.name),
            site_name: site.name.clone(),
            noindex: true,
            ..Default::default()
        }
    }

    pub fn article(site: &SiteSettings, post: &BlogPost) -> Self {
        let mut meta = Self::page(site, &post.title, &post.excerpt, &post.path());
        meta.og_type = "article".to_string();
        if let Some(image) = post.cover_image.as_deref().filter(|i| !i.is_empty()) {
            meta.image = site.absolute_url(image);
        }
        meta.keywords = post.tags.join(", ");
        meta.published_time = post.published_at.map(|d| d.to_rfc3339()).unwrap_or_default();
        meta.modified_time = post
            .updated_at
            .or(post.published_at)
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();
        meta.author = post.author.clone();
        meta.json_ld = Some(script_safe_json(&blog_posting_schema(site, post)));
        meta
    }
}

/// schema.org `BlogPosting` for an article.
pub fn blog_posting_schema(site: &SiteSettings, post: &BlogPost) -> Value {
    let url = site.absolute_url(&post.path());
    let image = post
        .cover_image
        .as_deref()
        .filter(|i| !i.is_empty())
        .unwrap_or(&site.default_og_image);
    let author = if post.author.is_empty() {
        site.name.as_str()
    } else {
        post.author.as_str()
    };
    let published = post.published_at.map(|d| d.to_rfc3339());
    let modified = post.updated_at.map(|d| d.to_rfc3339()).or(published.clone());

    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.excerpt,
        "image": site.absolute_url(image),
        "author": { "@type": "Person", "name": author },
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": { "@type": "ImageObject", "url": site.absolute_url(&site.logo_url) }
        },
        "datePublished": published,
        "dateModified": modified,
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
        "keywords": post.tags.join(", "),
        "articleSection": post.category,
    })
}

/// Serialize for an inline `<script>` block: `<`, `>` and `&` become unicode
/// escapes so the payload cannot close the tag.
pub fn script_safe_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteSettings {
        SiteSettings {
            name: "Nexa Digital".into(),
            base_url: "https://nexa.example".into(),
            default_og_image: "/static/img/og.png".into(),
            logo_url: "/static/img/logo.png".into(),
            twitter_handle: "@nexa".into(),
        }
    }

    fn post() -> BlogPost {
        serde_json::from_value(json!({
            "id": "p1",
            "slug": "scaling-teams",
            "title": "Scaling </script> Teams",
            "excerpt": "Lessons learned",
            "author": "Wanjiru",
            "tags": ["teams", "growth"],
            "publishedAt": "2025-01-02T08:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn schema_describes_the_article() {
        let schema = blog_posting_schema(&site(), &post());
        assert_eq!(schema["@type"], "BlogPosting");
        assert_eq!(schema["author"]["name"], "Wanjiru");
        assert_eq!(
            schema["mainEntityOfPage"]["@id"],
            "https://nexa.example/blog/scaling-teams"
        );
        assert_eq!(schema["image"], "https://nexa.example/static/img/og.png");
        assert_eq!(schema["keywords"], "teams, growth");
        assert_eq!(schema["dateModified"], schema["datePublished"]);
    }

    #[test]
    fn json_ld_cannot_close_the_script_tag() {
        let meta = SeoMeta::article(&site(), &post());
        let json_ld = meta.json_ld.unwrap();
        assert!(!json_ld.contains("</script>"));
        assert!(json_ld.contains("\\u003c/script\\u003e"));
        let parsed: Value = serde_json::from_str(&json_ld).unwrap();
        assert_eq!(parsed["headline"], "Scaling </script> Teams");
    }

    #[test]
    fn page_titles_carry_the_site_name() {
        let meta = SeoMeta::page(&site(), "About", "Who we are", "/about");
        assert_eq!(meta.title, "About | Nexa Digital");
        assert_eq!(meta.canonical_url, "https://nexa.example/about");
        assert_eq!(meta.og_type, "website");
    }
}
