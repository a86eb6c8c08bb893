use std::sync::Arc;

use homestead_domain::{ObjectId, SessionId};

use super::registry::SessionRegistry;
use super::state::SessionStatus;
use crate::infrastructure::ports::ScheduledJob;

/// Delayed second phase of a placement.
///
/// Carries only ids: the session is looked up again when the job fires, and
/// a session that was cancelled or replaced in the meantime is left alone.
pub struct ConstructionCompleteTask {
    registry: Arc<SessionRegistry>,
    actor_id: ObjectId,
    session_id: SessionId,
}

impl ConstructionCompleteTask {
    pub const NAME: &'static str = "construction_complete";

    pub fn new(registry: Arc<SessionRegistry>, actor_id: ObjectId, session_id: SessionId) -> Self {
        Self {
            registry,
            actor_id,
            session_id,
        }
    }

    pub async fn run(self) -> Option<SessionStatus> {
        let Some(session) = self.registry.get(self.actor_id) else {
            tracing::debug!(actor_id = %self.actor_id, session_id = %self.session_id, "No session to complete");
            return None;
        };
        if session.id() != self.session_id {
            tracing::debug!(
                actor_id = %self.actor_id,
                session_id = %self.session_id,
                active_session = %session.id(),
                "Session replaced before construction finished"
            );
            return None;
        }
        Some(session.complete_construction().await)
    }

    pub fn into_job(self) -> ScheduledJob {
        let actor_id = self.actor_id;
        ScheduledJob::new(Self::NAME, actor_id, async move {
            self.run().await;
        })
    }
}
