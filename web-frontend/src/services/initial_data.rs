//! Server-prepared data handed to exactly one subsequent page render.
//!
//! After a save the handler stashes the saved record and redirects; the edit
//! page claims it instead of fetching the record again. A claim always clears
//! the slot, so a stale record can never be rendered twice.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::Session;

const SESSION_KEY: &str = "initial_data";

#[derive(Serialize, Deserialize)]
struct Stashed {
    key: String,
    value: Value,
}

/// One-shot value: the first `take` yields it, later ones yield `None`.
#[derive(Debug, Clone)]
pub struct InitialData<T>(Option<T>);

impl<T> InitialData<T> {
    pub fn new(value: T) -> Self {
        Self(Some(value))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn take(&mut self) -> Option<T> {
        self.0.take()
    }

    pub fn is_available(&self) -> bool {
        self.0.is_some()
    }
}

/// Stash `value` for the page identified by `key`, replacing anything pending.
pub async fn stash<T: Serialize>(session: &Session, key: &str, value: &T) {
    let value = match serde_json::to_value(value) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize initial data");
            return;
        }
    };
    let stashed = Stashed {
        key: key.to_string(),
        value,
    };
    if let Err(e) = session.insert(SESSION_KEY, stashed).await {
        tracing::warn!(error = %e, "Failed to stash initial data");
    }
}

/// Consume pending data. It is returned only when stashed for `key`, but the
/// slot is cleared either way.
pub async fn claim<T: DeserializeOwned>(session: &Session, key: &str) -> InitialData<T> {
    let stashed = match session.remove::<Stashed>(SESSION_KEY).await {
        Ok(Some(stashed)) => stashed,
        Ok(None) => return InitialData::empty(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read initial data");
            return InitialData::empty();
        }
    };

    if stashed.key != key {
        return InitialData::empty();
    }

    match serde_json::from_value(stashed.value) {
        Ok(value) => InitialData::new(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding unreadable initial data");
            InitialData::empty()
        }
    }
}
