//! Session middleware configuration.
//!
//! Sessions live in [`CartSessionStore`], an in-process store. Carts are not
//! persisted anywhere else, so a restart empties every cart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};
use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store::{self, ExpiredDeletion},
};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "festify_session";

/// In-memory session store that drops expired sessions.
///
/// An expired record is removed as soon as it is loaded, and
/// [`ExpiredDeletion::delete_expired`] sweeps the ones nobody comes back for.
/// Run [`CartSessionStore::spawn_purge_task`] so abandoned carts do not
/// accumulate for the life of the process.
#[derive(Clone, Debug, Default)]
pub struct CartSessionStore(Arc<Mutex<HashMap<Id, Record>>>);

impl CartSessionStore {
    /// Number of sessions currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }

    /// Delete expired sessions every `period`, until the runtime shuts down.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    #[must_use]
    pub fn spawn_purge_task(self, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = self.delete_expired().await {
                    tracing::warn!(error = %e, "Failed to purge expired sessions");
                }
            }
        })
    }
}

fn is_active(record: &Record, now: OffsetDateTime) -> bool {
    record.expiry_date > now
}

#[async_trait]
impl SessionStore for CartSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut sessions = self.0.lock().await;
        while sessions.contains_key(&record.id) {
            record.id = Id::default();
        }
        sessions.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut sessions = self.0.lock().await;
        match sessions.get(session_id) {
            Some(record) if is_active(record, OffsetDateTime::now_utc()) => {
                Ok(Some(record.clone()))
            }
            Some(_) => {
                sessions.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for CartSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.0.lock().await;
        let before = sessions.len();
        sessions.retain(|_, record| is_active(record, now));

        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, remaining = sessions.len(), "Purged expired sessions");
        }
        Ok(())
    }
}

/// Create the session layer over `store`.
///
/// Sessions expire after `session_ttl_seconds` of inactivity. The store only
/// releases them once loaded again or purged.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
    store: CartSessionStore,
) -> SessionManagerLayer<CartSessionStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(config.session_ttl_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
