//! Start placement use case.
//!
//! Opens a placement session for an actor holding a deed and, when asked,
//! begins construction straight away.

use std::sync::Arc;

use homestead_domain::{Actor, Coordinates, Deed};

use super::error::SessionError;
use super::registry::SessionRegistry;
use super::session::{PlacementServices, PlacementSession};
use super::state::SessionStatus;
use crate::infrastructure::handles::Shared;
use crate::infrastructure::ports::WorldPartition;

/// Where the player asked to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees; any integer, normalized by the session.
    pub angle: i32,
}

/// Start placement use case.
pub struct StartPlacement {
    services: PlacementServices,
    registry: Arc<SessionRegistry>,
}

impl StartPlacement {
    pub fn new(services: PlacementServices, registry: Arc<SessionRegistry>) -> Self {
        Self { services, registry }
    }

    /// Registers a new session for `actor`. Fails if the actor already has one.
    pub fn execute(
        &self,
        actor: &Shared<Actor>,
        deed: &Shared<Deed>,
        partition: &Arc<dyn WorldPartition>,
    ) -> Result<Arc<PlacementSession>, SessionError> {
        let session = PlacementSession::new(
            self.services.clone(),
            Arc::clone(&self.registry),
            deed,
            actor,
            partition,
        );
        self.registry.register(Arc::clone(&session))?;

        tracing::info!(
            session_id = %session.id(),
            actor_id = %actor.id(),
            deed_id = %deed.id(),
            partition = %partition.name(),
            "Placement session opened"
        );
        Ok(session)
    }

    /// Opens a session and begins construction at the requested spot.
    ///
    /// Refuses a spot covered by another placement's exclusion zone before any
    /// session is opened.
    pub async fn execute_and_begin(
        &self,
        actor: &Shared<Actor>,
        deed: &Shared<Deed>,
        partition: &Arc<dyn WorldPartition>,
        request: PlacementRequest,
    ) -> Result<(Arc<PlacementSession>, SessionStatus), SessionError> {
        let site = Coordinates::new(request.x, request.y);
        if partition.is_blocked(site).await {
            tracing::info!(actor_id = %actor.id(), %site, "Placement refused: site is staked");
            return Err(SessionError::SiteBlocked(site));
        }
        let session = self.execute(actor, deed, partition)?;
        let status = session
            .begin_construction(request.x, request.y, request.angle)
            .await;
        Ok((session, status))
    }
}
