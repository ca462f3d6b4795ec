//! # Session Ledgers
//!
//! One [`Ledger`] per client session, keyed by the `X-Session-Id` header.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request (X-Session-Id: till-2)                                         │
//! │       │                                                                 │
//! │       ├── read only (GET /cart) ──► SessionStore::view                  │
//! │       │        unknown session? → empty ledger, nothing stored          │
//! │       │                                                                 │
//! │       └── mutation ──► SessionStore::with_ledger                        │
//! │                first request? → evict idle sessions, enforce the cap,   │
//! │                                 then Ledger::new(settings)              │
//! │                                                                         │
//! │  Both touch last_seen. Sessions never see each other's lines,           │
//! │  discount or order counter.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use brew_core::{Ledger, LedgerSettings};

use crate::error::ApiError;

/// Header carrying the client session.
pub const SESSION_HEADER: &str = "x-session-id";

/// Longest accepted session id.
const MAX_SESSION_ID_LEN: usize = 128;

/// Bounds on how many ledgers the store keeps alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions untouched for this long are dropped when a new one opens.
    pub idle_timeout: Duration,
    /// Hard cap; the least recently seen session makes room for a new one.
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        SessionLimits {
            idle_timeout: Duration::from_secs(2 * 60 * 60),
            max_sessions: 10_000,
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    ledger: Ledger,
    last_seen: Instant,
}

/// Session-scoped ledgers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    ledgers: Arc<Mutex<HashMap<String, SessionEntry>>>,
    settings: LedgerSettings,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new(settings: LedgerSettings, limits: SessionLimits) -> Self {
        SessionStore {
            ledgers: Arc::new(Mutex::new(HashMap::new())),
            settings,
            limits,
        }
    }

    /// Runs `f` against the session's ledger, opening one if needed.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = sessions.with_ledger(&session, |ledger| ledger.totals()).await;
    /// ```
    pub async fn with_ledger<F, R>(&self, session: &SessionId, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        let now = Instant::now();
        let mut ledgers = self.ledgers.lock().await;

        if !ledgers.contains_key(session.as_str()) {
            self.make_room(&mut ledgers, now);
            debug!(session = %session, "Opening ledger");
        }

        let entry = ledgers
            .entry(session.0.clone())
            .or_insert_with(|| SessionEntry {
                ledger: Ledger::new(self.settings),
                last_seen: now,
            });
        entry.last_seen = now;
        f(&mut entry.ledger)
    }

    /// Runs `f` against the session's ledger without opening one.
    ///
    /// Unknown sessions see an empty ledger that is not stored.
    pub async fn view<F, R>(&self, session: &SessionId, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let mut ledgers = self.ledgers.lock().await;
        match ledgers.get_mut(session.as_str()) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                f(&entry.ledger)
            }
            None => f(&Ledger::new(self.settings)),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.ledgers.lock().await.len()
    }

    /// Drops idle sessions, then the least recently seen ones, until a new
    /// session fits under the cap.
    fn make_room(&self, ledgers: &mut HashMap<String, SessionEntry>, now: Instant) {
        let idle_timeout = self.limits.idle_timeout;
        let before = ledgers.len();
        ledgers.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < idle_timeout);
        if ledgers.len() < before {
            debug!(evicted = before - ledgers.len(), "Dropped idle sessions");
        }

        while !ledgers.is_empty() && ledgers.len() >= self.limits.max_sessions {
            let oldest = ledgers
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone());
            let Some(oldest) = oldest else { break };
            warn!(session = %oldest, "Session cap reached, dropping least recent ledger");
            ledgers.remove(&oldest);
        }
    }

    #[cfg(test)]
    async fn contains(&self, session: &SessionId) -> bool {
        self.ledgers.lock().await.contains_key(session.as_str())
    }
}

/// Validated value of the `X-Session-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ApiError::validation("X-Session-Id header is required"));
        }
        if raw.chars().count() > MAX_SESSION_ID_LEN {
            return Err(ApiError::validation(format!(
                "X-Session-Id must be at most {} characters",
                MAX_SESSION_ID_LEN
            )));
        }
        Ok(SessionId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| ApiError::validation("X-Session-Id header is required"))?;

        let raw = value
            .to_str()
            .map_err(|_| ApiError::validation("X-Session-Id must be visible ASCII"))?;

        SessionId::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::{Money, NewLineItem};

    fn session(id: &str) -> SessionId {
        SessionId::parse(id).unwrap()
    }

    fn store() -> SessionStore {
        SessionStore::new(LedgerSettings::default(), SessionLimits::default())
    }

    async fn add_latte(store: &SessionStore, id: &SessionId) {
        store
            .with_ledger(id, |ledger| {
                ledger
                    .add_item(NewLineItem::new("latte", "Latte", Money::from_cents(24000)))
                    .map(|_| ())
            })
            .await
            .unwrap();
    }

    #[test]
    fn test_session_id_parse() {
        assert_eq!(session("  till-1 ").as_str(), "till-1");
        assert!(SessionId::parse("").is_err());
        assert!(SessionId::parse(&"s".repeat(129)).is_err());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = store();
        let a = session("a");
        let b = session("b");

        add_latte(&store, &a).await;

        let b_empty = store.with_ledger(&b, |ledger| ledger.is_empty()).await;
        let a_count = store.with_ledger(&a, |ledger| ledger.item_count()).await;

        assert!(b_empty);
        assert_eq!(a_count, 1);
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_new_ledgers_use_store_settings() {
        let store = SessionStore::new(
            LedgerSettings {
                first_order_number: 42,
                ..LedgerSettings::default()
            },
            SessionLimits::default(),
        );

        let number = store
            .with_ledger(&session("a"), |ledger| ledger.next_order_number())
            .await;
        assert_eq!(number, 42);
    }

    #[tokio::test]
    async fn test_view_does_not_open_a_ledger() {
        let store = store();
        let a = session("a");

        let (empty, number) = store
            .view(&a, |ledger| (ledger.is_empty(), ledger.next_order_number()))
            .await;

        assert!(empty);
        assert_eq!(number, 1);
        assert_eq!(store.session_count().await, 0);

        add_latte(&store, &a).await;
        assert_eq!(store.view(&a, |ledger| ledger.item_count()).await, 1);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_dropped_when_a_new_one_opens() {
        let store = SessionStore::new(
            LedgerSettings::default(),
            SessionLimits {
                idle_timeout: Duration::ZERO,
                max_sessions: 100,
            },
        );
        let a = session("a");
        let b = session("b");

        add_latte(&store, &a).await;
        add_latte(&store, &b).await;

        assert!(!store.contains(&a).await);
        assert!(store.contains(&b).await);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_cap_drops_least_recent_session() {
        let store = SessionStore::new(
            LedgerSettings::default(),
            SessionLimits {
                max_sessions: 2,
                ..SessionLimits::default()
            },
        );
        let (a, b, c) = (session("a"), session("b"), session("c"));

        add_latte(&store, &a).await;
        add_latte(&store, &b).await;
        // touching a makes b the least recent
        store.view(&a, |_| ()).await;
        add_latte(&store, &c).await;

        assert_eq!(store.session_count().await, 2);
        assert!(store.contains(&a).await);
        assert!(!store.contains(&b).await);
        assert!(store.contains(&c).await);
    }
}
