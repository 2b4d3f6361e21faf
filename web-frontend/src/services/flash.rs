//! One-shot banners carried across a redirect in the session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const SESSION_KEY: &str = "flash.banners";

/// Banners dismiss themselves after this long.
pub const BANNER_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            message: message.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "banner banner-success",
            BannerKind::Error => "banner banner-error",
            BannerKind::Info => "banner banner-info",
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        BANNER_TIMEOUT_MS
    }
}

/// Queue a banner for the next rendered page.
pub async fn push_banner(session: &Session, banner: Banner) {
    let mut banners: Vec<Banner> = session
        .get(SESSION_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    banners.push(banner);
    if let Err(e) = session.insert(SESSION_KEY, banners).await {
        tracing::warn!(error = %e, "Failed to store banner in session");
    }
}

/// Remove and return every queued banner.
pub async fn take_banners(session: &Session) -> Vec<Banner> {
    match session.remove::<Vec<Banner>>(SESSION_KEY).await {
        Ok(banners) => banners.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read banners from session");
            Vec::new()
        }
    }
}
