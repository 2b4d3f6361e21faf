use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use isbot::Bots;
use std::sync::OnceLock;

/// Whether the request looks automated. Inserted as a request extension by
/// [`bot_detection_middleware`]; pages still render for bots, but side
/// effects such as view counting are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotVerdict {
    pub score: u32,
}

impl BotVerdict {
    pub const THRESHOLD: u32 = 100;

    pub fn is_bot(&self) -> bool {
        self.score >= Self::THRESHOLD
    }
}

fn bots() -> &'static Bots {
    static BOTS: OnceLock<Bots> = OnceLock::new();
    BOTS.get_or_init(Bots::default)
}

/// Score a request from its headers. 100 or more means "treat as a bot".
pub fn bot_score(headers: &HeaderMap) -> u32 {
    let user_agent = headers
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if user_agent.is_empty() {
        return 50;
    }

    let mut score = 0;
    if bots().is_bot(user_agent) {
        score += 100;
    }

    if user_agent.starts_with("Mozilla/") {
        let missing_headers = ["Accept", "Accept-Language", "Accept-Encoding"]
            .iter()
            .filter(|name| !headers.contains_key(**name))
            .count();

        if missing_headers >= 2 {
            score += 70;
        } else if missing_headers == 1 {
            score += 30;
        }
    }

    score
}

pub async fn bot_detection_middleware(mut request: Request, next: Next) -> Response {
    let verdict = BotVerdict {
        score: bot_score(request.headers()),
    };

    if verdict.is_bot() {
        tracing::debug!(
            score = verdict.score,
            path = %request.uri(),
            "Request classified as automated"
        );
    }

    request.extensions_mut().insert(verdict);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, v.parse().unwrap());
        }
        map
    }

    #[test]
    fn crawler_user_agents_are_bots() {
        let h = headers(&[(
            "User-Agent",
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        )]);
        assert!(BotVerdict { score: bot_score(&h) }.is_bot());
    }

    #[test]
    fn full_browser_request_is_not_a_bot() {
        let h = headers(&[
            (
                "User-Agent",
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36",
            ),
            ("Accept", "text/html"),
            ("Accept-Language", "en-KE,en;q=0.9"),
            ("Accept-Encoding", "gzip, br"),
        ]);
        assert_eq!(bot_score(&h), 0);
    }

    #[test]
    fn missing_user_agent_is_suspicious_but_not_blocked() {
        let score = bot_score(&HeaderMap::new());
        assert_eq!(score, 50);
        assert!(!BotVerdict { score }.is_bot());
    }
}
