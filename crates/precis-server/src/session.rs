//! Upload sessions.
//!
//! A session holds one uploaded document between the upload form and the
//! "Generate Summary" press, plus the latest report for downloads. Sessions
//! live in memory only. They expire after a fixed age, and when the store is
//! full the oldest is evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use precis_core::types::{SummaryMethod, SummaryReport};
use precis_extractors::DocumentKind;

/// Raw upload plus the declared document kind.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub kind: DocumentKind,
    pub filename: String,
}

impl UploadedDocument {
    pub fn new(bytes: Bytes, kind: DocumentKind, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            kind,
            filename: filename.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size in kilobytes with two decimals, e.g. `1.50 KB`.
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size() as f64 / 1024.0)
    }
}

/// One upload and its latest summary.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub document: UploadedDocument,
    pub method: SummaryMethod,
    pub report: Option<SummaryReport>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is older than `ttl` at `now`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        (now - self.created_at)
            .to_std()
            .map(|age| age > ttl)
            .unwrap_or(false)
    }
}

/// Shared in-memory session store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    max_sessions: usize,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
            ttl,
        }
    }

    /// Store a new upload, dropping expired sessions and evicting the oldest
    /// ones when full.
    pub async fn create(&self, document: UploadedDocument, method: SummaryMethod) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            document,
            method,
            report: None,
            created_at: Utc::now(),
        };

        let mut sessions = self.inner.write().await;
        let now = Utc::now();
        sessions.retain(|_, s| !s.is_expired(self.ttl, now));
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    debug!(session = %id, "Evicted oldest session");
                }
                None => break,
            }
        }
        sessions.insert(session.id, session.clone());
        session
    }

    /// Snapshot of a live session.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.inner
            .read()
            .await
            .get(&id)
            .filter(|s| !s.is_expired(self.ttl, Utc::now()))
            .cloned()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|_, s| !s.is_expired(self.ttl, now));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "Swept expired sessions");
        }
        removed
    }

    /// Replace the latest report and method; `None` clears a stale report.
    ///
    /// Returns `false` when the session no longer exists.
    pub async fn set_report(
        &self,
        id: Uuid,
        method: SummaryMethod,
        report: Option<SummaryReport>,
    ) -> bool {
        match self.inner.write().await.get_mut(&id) {
            Some(session) => {
                session.method = method;
                session.report = report;
                true
            }
            None => false,
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
