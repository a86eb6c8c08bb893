//! Active placement sessions, one per actor.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use homestead_domain::{ObjectId, SessionId};

use super::error::SessionError;
use super::session::PlacementSession;

/// Lookup from actor id to that actor's live session.
///
/// Deregistering is what "cancel" means for a session; it happens on every
/// terminal transition, successful or not.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<ObjectId, Arc<PlacementSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, session: Arc<PlacementSession>) -> Result<(), SessionError> {
        match self.sessions.entry(session.actor_id()) {
            Entry::Occupied(_) => Err(SessionError::AlreadyActive(session.actor_id())),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(())
            }
        }
    }

    pub fn get(&self, actor_id: ObjectId) -> Option<Arc<PlacementSession>> {
        self.sessions
            .get(&actor_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Removes the actor's session only if it is still `session_id`.
    pub fn deregister(&self, actor_id: ObjectId, session_id: SessionId) -> bool {
        self.sessions
            .remove_if(&actor_id, |_, session| session.id() == session_id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
