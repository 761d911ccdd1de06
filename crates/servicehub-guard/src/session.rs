//! Cached client session.
//!
//! The cache is populated on login, read by the guard and by display pages,
//! and cleared on logout or once the access token has expired. Only the
//! client auth service writes to it.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use servicehub_core::Role;

/// Synchronous view of the auth state, read at render time.
///
/// The guard only calls [`SessionSource::snapshot`]. Sources backed by shared
/// state override it so both inputs come from the same read.
pub trait SessionSource {
    fn is_authenticated(&self) -> bool;

    fn user_role(&self) -> Option<Role>;

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.is_authenticated(),
            role: self.user_role(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Both guard inputs captured under a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl SessionSource for SessionSnapshot {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn user_role(&self) -> Option<Role> {
        self.role
    }

    fn snapshot(&self) -> SessionSnapshot {
        *self
    }
}

/// Process-wide session cache. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, session: Session) {
        tracing::debug!(user_id = %session.user.id, role = %session.user.role, "Session stored");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Drops the session if its access token has expired. Returns whether it did.
    pub fn evict_expired(&self) -> bool {
        self.evict_expired_at(Utc::now())
    }

    pub fn evict_expired_at(&self, now: DateTime<Utc>) -> bool {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(session) if session.is_expired_at(now) => {
                tracing::debug!(user_id = %session.user.id, "Expired session evicted");
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session().map(|session| session.user)
    }

    pub fn access_token(&self) -> Option<String> {
        self.session().map(|session| session.access_token)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> SessionSnapshot {
        let slot = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(session) => SessionSnapshot {
                authenticated: !session.is_expired_at(now),
                role: Some(session.user.role),
            },
            None => SessionSnapshot::default(),
        }
    }
}

impl SessionSource for SessionCache {
    fn is_authenticated(&self) -> bool {
        self.snapshot_at(Utc::now()).authenticated
    }

    fn user_role(&self) -> Option<Role> {
        self.snapshot_at(Utc::now()).role
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_at(Utc::now())
    }
}
