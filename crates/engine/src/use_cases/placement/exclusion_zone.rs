//! Temporary exclusion zone manager.
//!
//! While a structure is under construction its footprint is covered by a
//! circular no-build zone so no concurrent placement can land on top of it.
//! The radius is fixed and deliberately larger than any footprint.

use std::sync::Weak;

use homestead_domain::placement_defaults::ANY_CONTAINER_SLOT;
use homestead_domain::{Coordinates, ExclusionZone, ObjectId};
use tokio::sync::Mutex;

use super::claim::WorldClaim;
use super::error::PlacementError;
use crate::infrastructure::handles::Shared;
use crate::infrastructure::ports::{WorldEntity, WorldPartition};

/// Owns at most one exclusion zone on behalf of a session.
pub struct ExclusionZoneManager {
    radius: f32,
    claim: Mutex<Option<WorldClaim<ExclusionZone>>>,
}

impl ExclusionZoneManager {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            claim: Mutex::new(None),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub async fn is_active(&self) -> bool {
        self.claim.lock().await.is_some()
    }

    pub async fn zone_id(&self) -> Option<ObjectId> {
        self.claim.lock().await.as_ref().map(|claim| claim.object().id())
    }

    /// Stakes a no-build zone centered on `center`.
    ///
    /// Returns `Ok(None)` without side effects if the partition is gone, and
    /// `ZoneConflict` if this manager already owns a zone. The zone is in the
    /// partition before this returns.
    pub async fn establish(
        &self,
        partition: &Weak<dyn WorldPartition>,
        center: Coordinates,
    ) -> Result<Option<ObjectId>, PlacementError> {
        let mut claim = self.claim.lock().await;
        if claim.is_some() {
            return Err(PlacementError::ZoneConflict);
        }

        let Some(world) = partition.upgrade() else {
            tracing::debug!(%center, "Partition gone, no exclusion zone staked");
            return Ok(None);
        };

        let zone = ExclusionZone::no_build(center, self.radius);
        let zone = Shared::new(zone.id(), zone);
        {
            let _locked = zone.lock().await;
            world
                .insert(WorldEntity::ExclusionZone(zone.clone()), ANY_CONTAINER_SLOT, true)
                .await;
        }

        tracing::debug!(zone_id = %zone.id(), %center, radius = self.radius, "Exclusion zone staked");
        let id = zone.id();
        *claim = Some(WorldClaim::new(zone, partition));
        Ok(Some(id))
    }

    /// Destroys the owned zone, if any. Returns whether there was one; calling
    /// again is a no-op.
    pub async fn remove(&self) -> bool {
        let Some(claim) = self.claim.lock().await.take() else {
            return false;
        };
        let zone_id = claim.object().id();
        claim.release().await;
        tracing::debug!(%zone_id, "Exclusion zone removed");
        true
    }
}
