//! # Configuration Sessions
//!
//! Each open "configure this product" view owns one `ProductConfigurator`,
//! keyed by a session id handed to the frontend.
//!
//! ```text
//! open_configuration ──► insert(id, configurator)   (evicts idle sessions)
//! select / deselect  ──► with_session_mut(id, ..)   (refreshes last_used)
//! commit (success)   ──► remove(id)
//! cancel             ──► remove(id)
//! ```
//!
//! Sessions are independent: two views of the same product never share a
//! selection. A view closed without cancelling is dropped once it has been
//! idle for longer than the idle timeout.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use menu_core::ProductConfigurator;

use crate::error::{ApiError, ErrorCode};

#[derive(Debug)]
struct Session {
    configurator: ProductConfigurator,
    last_used: DateTime<Utc>,
}

impl Session {
    fn is_idle(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now - self.last_used >= idle_timeout
    }
}

/// Open configuration sessions.
#[derive(Debug)]
pub struct SessionState {
    sessions: Mutex<HashMap<String, Session>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionState {
    pub fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        SessionState {
            sessions: Mutex::new(HashMap::new()),
            max_sessions,
            idle_timeout,
        }
    }

    /// Stores a configurator under a fresh session id.
    ///
    /// Idle sessions are evicted first; the limit only counts live ones.
    pub fn insert(&self, configurator: ProductConfigurator) -> Result<String, ApiError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle configuration sessions");
        }

        if sessions.len() >= self.max_sessions {
            return Err(ApiError::new(
                ErrorCode::SessionLimit,
                format!("At most {} products can be configured at once", self.max_sessions),
            ));
        }

        let session_id = Uuid::new_v4().to_string();
        debug!(session_id = %session_id, product_id = %configurator.product().id, "Session opened");
        sessions.insert(
            session_id.clone(),
            Session {
                configurator,
                last_used: now,
            },
        );
        Ok(session_id)
    }

    /// Runs `f` against one session and marks it as used.
    pub fn with_session_mut<F, R>(&self, session_id: &str, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut ProductConfigurator) -> R,
    {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| ApiError::not_found("Configuration session", session_id))?;

        session.last_used = Utc::now();
        Ok(f(&mut session.configurator))
    }

    /// Discards a session, returning its configurator.
    pub fn remove(&self, session_id: &str) -> Result<ProductConfigurator, ApiError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .remove(session_id)
            .ok_or_else(|| ApiError::not_found("Configuration session", session_id))?;

        debug!(session_id = %session_id, "Session closed");
        Ok(session.configurator)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use menu_core::{Catalog, MenuProduct, DEFAULT_TENANT_ID};

    fn configurator() -> ProductConfigurator {
        let product = MenuProduct {
            id: "p1".to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            name: "Soda".to_string(),
            description: None,
            price_cents: 600,
            promotional_price_cents: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        ProductConfigurator::new(product, Catalog::empty())
    }

    #[test]
    fn test_session_limit() {
        let sessions = SessionState::new(1, Duration::minutes(30));
        sessions.insert(configurator()).unwrap();

        let err = sessions.insert(configurator()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionLimit);
    }

    #[test]
    fn test_remove_unknown_session() {
        let sessions = SessionState::new(4, Duration::minutes(30));
        let id = sessions.insert(configurator()).unwrap();

        assert!(sessions.remove(&id).is_ok());
        assert!(sessions.is_empty());
        assert_eq!(sessions.remove(&id).unwrap_err().code, ErrorCode::NotFound);
        assert!(sessions.with_session_mut(&id, |_| ()).is_err());
    }

    #[test]
    fn test_idle_sessions_are_evicted_before_the_limit_applies() {
        let sessions = SessionState::new(2, Duration::zero());
        let abandoned = sessions.insert(configurator()).unwrap();
        let also_abandoned = sessions.insert(configurator()).unwrap();

        let fresh = sessions.insert(configurator()).unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(
            sessions.remove(&abandoned).unwrap_err().code,
            ErrorCode::NotFound
        );
        assert!(sessions.with_session_mut(&also_abandoned, |_| ()).is_err());
        assert!(sessions.with_session_mut(&fresh, |_| ()).is_ok());
    }

    #[test]
    fn test_active_sessions_survive_eviction() {
        let sessions = SessionState::new(2, Duration::minutes(30));
        let first = sessions.insert(configurator()).unwrap();
        sessions.insert(configurator()).unwrap();

        assert_eq!(
            sessions.insert(configurator()).unwrap_err().code,
            ErrorCode::SessionLimit
        );
        assert!(sessions.with_session_mut(&first, |c| c.selection().is_empty()).unwrap());
    }
}
