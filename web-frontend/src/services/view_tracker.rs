//! Per-session blog view de-duplication.

use rand::{distributions::Alphanumeric, Rng};
use std::collections::BTreeSet;
use tower_sessions::Session;

const VISITOR_KEY: &str = "blog.visitor_id";
const VIEWED_KEY: &str = "blog.viewed_posts";
const VISITOR_ID_LEN: usize = 24;

/// Anonymous visitor ID reported with view counts, created on first use.
pub async fn visitor_id(session: &Session) -> Option<String> {
    if let Ok(Some(id)) = session.get::<String>(VISITOR_KEY).await {
        return Some(id);
    }

    let id: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(VISITOR_ID_LEN)
        .map(char::from)
        .collect();

    match session.insert(VISITOR_KEY, &id).await {
        Ok(()) => Some(id),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to store visitor id");
            None
        }
    }
}

/// Mark `post_id` as viewed in this session. Returns `true` only the first
/// time, so each session counts once per post.
pub async fn first_view(session: &Session, post_id: &str) -> bool {
    let mut viewed: BTreeSet<String> = session
        .get(VIEWED_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    if !viewed.insert(post_id.to_string()) {
        return false;
    }

    if let Err(e) = session.insert(VIEWED_KEY, &viewed).await {
        tracing::warn!(error = %e, "Failed to record viewed post");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn counts_each_post_once_per_session() {
        let session = session();
        assert!(first_view(&session, "p1").await);
        assert!(!first_view(&session, "p1").await);
        assert!(first_view(&session, "p2").await);
    }

    #[tokio::test]
    async fn visitor_id_is_stable() {
        let session = session();
        let first = visitor_id(&session).await.unwrap();
        assert_eq!(first.len(), VISITOR_ID_LEN);
        assert_eq!(visitor_id(&session).await.unwrap(), first);
    }
}
