use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{LedgerError, Result};
use crate::round_trip::SessionIdentifiers;
use crate::session::{Session, SessionId};

type SessionHandle = Arc<Mutex<Session>>;

/// Exclusive access to one session for the duration of a tool call.
///
/// Dropping the guard releases the session, on every exit path.
pub type SessionGuard = OwnedMutexGuard<Session>;

/// Process-wide registry of live sessions.
///
/// The registry map is locked only long enough to look up or insert a handle; each
/// session then has its own lock, so calls on different sessions never wait on each
/// other while calls on the same session run one at a time.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_session(&self) -> SessionId {
        let mut sessions = self.sessions.lock().await;
        let mut id = SessionId::generate();
        while sessions.contains_key(&id) {
            id = SessionId::generate();
        }
        sessions.insert(id.clone(), Arc::new(Mutex::new(Session::new(id.clone()))));
        log::info!("Session created with ID {id}");
        id
    }

    /// Removes the session if present. A call already holding the session's guard keeps
    /// working on the detached session; later lookups report `SessionNotFound`.
    pub async fn delete_session(&self, id: &SessionId) {
        if self.sessions.lock().await.remove(id).is_some() {
            log::info!("Session deleted with ID {id}");
        }
    }

    pub async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.lock().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    async fn handle(&self, id: &SessionId) -> Result<SessionHandle> {
        self.sessions
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::SessionNotFound(id.clone()))
    }

    /// Waits for exclusive access to `id`.
    pub async fn lock(&self, id: &SessionId) -> Result<SessionGuard> {
        let handle = self.handle(id).await?;
        Ok(handle.lock_owned().await)
    }

    pub async fn get_session_identifiers(&self, id: &SessionId) -> Result<SessionIdentifiers> {
        Ok(self.lock(id).await?.identifiers())
    }

    pub async fn advance_round_trip(&self, id: &SessionId) -> Result<SessionIdentifiers> {
        Ok(self.lock(id).await?.advance_round_trip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_protocol::OrderAction;
    use std::time::Duration;

    #[tokio::test]
    async fn new_session_starts_empty_at_round_trip_zero() {
        let store = SessionStore::new();
        let id = store.create_session().await;

        let session = store.lock(&id).await.unwrap();
        assert!(session.ledger().is_empty());
        assert_eq!(session.summary().total, 0.0);
        assert_eq!(session.summary().final_total, 0.0);

        let ids = session.identifiers();
        assert_eq!(ids.round_trip_index, 0);
        assert!(ids.round_trip_token.ends_with("-0000"));
    }

    #[tokio::test]
    async fn advancing_twice_reaches_index_two() {
        let store = SessionStore::new();
        let id = store.create_session().await;
        let before = store.get_session_identifiers(&id).await.unwrap();

        store.advance_round_trip(&id).await.unwrap();
        let after = store.advance_round_trip(&id).await.unwrap();

        assert_eq!(after.round_trip_index, 2);
        assert!(after.round_trip_token.ends_with("-0002"));
        assert_eq!(after.session_token, before.session_token);
        assert_eq!(
            after.round_trip_token,
            format!("{}-0002", before.session_token)
        );
    }

    #[tokio::test]
    async fn sessions_get_distinct_ids_and_tokens() {
        let store = SessionStore::new();
        let first = store.create_session().await;
        let second = store.create_session().await;
        assert_ne!(first, second);

        let first_ids = store.get_session_identifiers(&first).await.unwrap();
        let second_ids = store.get_session_identifiers(&second).await.unwrap();
        assert_ne!(first_ids.session_token, second_ids.session_token);
        assert_ne!(first_ids.session_token, first.as_str());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = SessionStore::new();
        let id = SessionId::from("missing");

        assert_eq!(
            store.get_session_identifiers(&id).await.unwrap_err(),
            LedgerError::SessionNotFound(id.clone())
        );
        assert_eq!(
            store.advance_round_trip(&id).await.unwrap_err(),
            LedgerError::SessionNotFound(id.clone())
        );
        assert!(store.lock(&id).await.is_err());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = SessionStore::new();
        let id = store.create_session().await;
        assert_eq!(store.len().await, 1);

        store.delete_session(&id).await;
        store.delete_session(&id).await;

        assert!(store.is_empty().await);
        assert!(!store.contains(&id).await);
        assert!(store.lock(&id).await.is_err());
    }

    #[tokio::test]
    async fn same_session_calls_are_serialized() {
        let store = Arc::new(SessionStore::new());
        let id = store.create_session().await;

        let guard = store.lock(&id).await.unwrap();
        let waiter = {
            let store = store.clone();
            let id = id.clone();
            tokio::spawn(async move {
                let mut session = store.lock(&id).await.unwrap();
                session
                    .apply(OrderAction::Add, "Glazed Donut", "standard", 1, 1.49)
                    .unwrap();
                session.ledger().len()
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        assert!(guard.ledger().is_empty());
        drop(guard);

        assert_eq!(waiter.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn other_sessions_are_not_blocked() {
        let store = SessionStore::new();
        let busy = store.create_session().await;
        let idle = store.create_session().await;

        let _held = store.lock(&busy).await.unwrap();
        let ids = tokio::time::timeout(
            Duration::from_millis(200),
            store.advance_round_trip(&idle),
        )
        .await
        .expect("idle session must not wait on a busy one")
        .unwrap();
        assert_eq!(ids.round_trip_index, 1);
    }
}
