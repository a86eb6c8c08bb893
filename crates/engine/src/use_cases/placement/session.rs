//! Structure placement session.
//!
//! A session walks one deed from "player asked to build here" to a finished
//! structure in two phases separated by a scheduled delay:
//!
//! 1. [`PlacementSession::begin_construction`] stakes an exclusion zone, puts
//!    a construction placeholder in the world and schedules completion.
//! 2. [`PlacementSession::complete_construction`] clears the placeholder and
//!    zone, asks the placement authority for the real structure, then either
//!    finalizes it (waypoint, mail, sign) or hands the deed back.
//!
//! Deed, actor and partition are held weakly and re-resolved at the start of
//! each phase. Every failure ends in the same terminal path, which releases
//! whatever the session still owns in the world and deregisters it.
//!
//! State moves are compare-and-set under the lifecycle lock. Phase 1 only
//! enters `Constructing` from `Initiated` and gives back what it staked if
//! the session ended meanwhile. Phase 2 claims the session by moving it to
//! `Completing`; from then on only that completion can end it.

use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};
use std::time::Duration;

use homestead_domain::placement_defaults::ANY_CONTAINER_SLOT;
use homestead_domain::{
    Actor, Angle, Coordinates, Deed, ObjectId, Position, SessionId, Structure, StructureTemplate,
    TemplatePath, Waypoint, WorldObject,
};

use super::claim::WorldClaim;
use super::construction::{construction_duration, placeholder_rotation};
use super::error::PlacementError;
use super::exclusion_zone::ExclusionZoneManager;
use super::naming::sign_name;
use super::registry::SessionRegistry;
use super::state::{SessionState, SessionStatus};
use super::task::ConstructionCompleteTask;
use crate::infrastructure::handles::{lock_both, Shared, WeakShared};
use crate::infrastructure::ports::{
    AuditEntry, AuditLog, ClockPort, MailMessage, Notifier, ObjectFactory, PlacementAuthority,
    Scheduler, StringIdMessage, TemplateResolver, TransactionCode, WorldEntity, WorldPartition,
};
use crate::infrastructure::settings::PlacementSettings;

/// Collaborators a session talks to.
#[derive(Clone)]
pub struct PlacementServices {
    pub templates: Arc<dyn TemplateResolver>,
    pub objects: Arc<dyn ObjectFactory>,
    pub authority: Arc<dyn PlacementAuthority>,
    pub scheduler: Arc<dyn Scheduler>,
    pub audit: Arc<dyn AuditLog>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn ClockPort>,
    pub settings: Arc<PlacementSettings>,
}

/// Where and how the structure was asked to stand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub at: Coordinates,
    pub angle: Angle,
}

struct Lifecycle {
    state: SessionState,
    reason: Option<PlacementError>,
}

impl Lifecycle {
    fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Initiated | SessionState::Constructing | SessionState::Completing => {
                SessionStatus::Constructing
            }
            SessionState::Completed => SessionStatus::Completed,
            SessionState::Cancelled => SessionStatus::Cancelled(self.reason.clone()),
        }
    }

    /// Moves `from -> to`. Changes nothing and returns `false` if the session
    /// is not in `from`.
    fn advance(&mut self, from: SessionState, to: SessionState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }

    fn close(&mut self, outcome: SessionState, reason: Option<PlacementError>) -> SessionStatus {
        self.state = outcome;
        self.reason = reason;
        self.status()
    }
}

/// Handles resolved for one phase.
struct Participants {
    deed: Shared<Deed>,
    actor: Shared<Actor>,
    partition: Arc<dyn WorldPartition>,
}

pub struct PlacementSession {
    id: SessionId,
    actor_id: ObjectId,
    deed: WeakShared<Deed>,
    actor: WeakShared<Actor>,
    partition: Weak<dyn WorldPartition>,
    placement: OnceLock<Placement>,
    zone: ExclusionZoneManager,
    placeholder: tokio::sync::Mutex<Option<WorldClaim<WorldObject>>>,
    lifecycle: Mutex<Lifecycle>,
    services: PlacementServices,
    registry: Arc<SessionRegistry>,
}

impl PlacementSession {
    pub fn new(
        services: PlacementServices,
        registry: Arc<SessionRegistry>,
        deed: &Shared<Deed>,
        actor: &Shared<Actor>,
        partition: &Arc<dyn WorldPartition>,
    ) -> Arc<Self> {
        let zone = ExclusionZoneManager::new(services.settings.exclusion_radius);
        Arc::new(Self {
            id: SessionId::new(),
            actor_id: actor.id(),
            deed: deed.downgrade(),
            actor: actor.downgrade(),
            partition: Arc::downgrade(partition),
            placement: OnceLock::new(),
            zone,
            placeholder: tokio::sync::Mutex::new(None),
            lifecycle: Mutex::new(Lifecycle {
                state: SessionState::Initiated,
                reason: None,
            }),
            services,
            registry,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn actor_id(&self) -> ObjectId {
        self.actor_id
    }

    pub fn deed_id(&self) -> ObjectId {
        self.deed.id()
    }

    pub fn state(&self) -> SessionState {
        self.lifecycle().state
    }

    /// The requested placement, once construction has begun.
    pub fn placement(&self) -> Option<Placement> {
        self.placement.get().copied()
    }

    pub fn exclusion_zone(&self) -> &ExclusionZoneManager {
        &self.zone
    }

    pub async fn placeholder_id(&self) -> Option<ObjectId> {
        self.placeholder
            .lock()
            .await
            .as_ref()
            .map(|claim| claim.object().id())
    }

    // =========================================================================
    // Phase 1
    // =========================================================================

    /// Starts construction at `(x, y)` facing `angle` degrees.
    ///
    /// On success the session is `Constructing` and exactly one completion job
    /// has been scheduled.
    pub async fn begin_construction(&self, x: f32, y: f32, angle: i32) -> SessionStatus {
        if let Some(status) = self.terminal_status() {
            return status;
        }

        let requested = Placement {
            at: Coordinates::new(x, y),
            angle: Angle::degrees(angle),
        };
        match self.construct(requested).await {
            Ok(Some(delay)) => {
                tracing::info!(
                    session_id = %self.id,
                    actor_id = %self.actor_id,
                    deed_id = %self.deed.id(),
                    x,
                    y,
                    angle,
                    duration_ms = delay.as_millis() as u64,
                    "Construction started"
                );
                SessionStatus::Constructing
            }
            Ok(None) => self.abandon().await,
            Err(reason) => self.terminate(SessionState::Cancelled, Some(reason)).await,
        }
    }

    /// Stakes the site and schedules completion. `Ok(None)` means the session
    /// ended while this was running and nothing was scheduled.
    async fn construct(&self, requested: Placement) -> Result<Option<Duration>, PlacementError> {
        let participants = self.resolve()?;
        let placement = *self.placement.get_or_init(|| requested);

        let template_path = participants.deed.lock().await.generated_template().clone();
        let template = self.services.templates.resolve(template_path.id()).await;
        if self.state() != SessionState::Initiated || self.zone.is_active().await {
            return Err(PlacementError::ZoneConflict);
        }
        let template = template.ok_or(PlacementError::TemplateUnresolved(template_path.id()))?;

        self.zone.establish(&self.partition, placement.at).await?;
        if self.has_ended() {
            return Ok(None);
        }

        let delay = self
            .raise_placeholder(&template, &participants.partition, placement)
            .await;

        if !self
            .lifecycle()
            .advance(SessionState::Initiated, SessionState::Constructing)
        {
            return Ok(None);
        }
        let task =
            ConstructionCompleteTask::new(Arc::clone(&self.registry), self.actor_id, self.id);
        self.services.scheduler.schedule(task.into_job(), delay);
        Ok(Some(delay))
    }

    /// Phase 1 lost the race against the session ending. Whatever it staked
    /// after the terminal sweep ran is released here.
    async fn abandon(&self) -> SessionStatus {
        let Some(status) = self.terminal_status() else {
            return self.lifecycle().status();
        };
        let placeholder = self.tear_down_placeholder().await;
        let zone = self.zone.remove().await;
        tracing::debug!(
            session_id = %self.id,
            placeholder,
            zone,
            "Session ended during construction start, site released"
        );
        status
    }

    /// Puts the construction placeholder in the world and returns how long
    /// construction takes.
    async fn raise_placeholder(
        &self,
        template: &StructureTemplate,
        partition: &Arc<dyn WorldPartition>,
        placement: Placement,
    ) -> Duration {
        let settings = &self.services.settings;
        let Some(marker) = template.construction_marker.as_ref() else {
            return settings.fallback_duration();
        };
        let Some(placeholder) = self.services.objects.create(marker.id(), 0).await else {
            tracing::warn!(session_id = %self.id, marker = %marker, "Placeholder could not be created");
            return settings.fallback_duration();
        };

        {
            let mut object = placeholder.lock().await;
            object.initialize_position(Position::on_ground(placement.at));
            object.rotate(placeholder_rotation(placement.angle, template.footprint.as_ref()));
            object.mark_in_world();
            partition
                .insert(
                    WorldEntity::Placeholder(placeholder.clone()),
                    ANY_CONTAINER_SLOT,
                    true,
                )
                .await;
        }
        tracing::debug!(session_id = %self.id, placeholder_id = %placeholder.id(), "Placeholder raised");
        *self.placeholder.lock().await = Some(WorldClaim::new(placeholder, &self.partition));

        let policy = partition.regional_policy();
        construction_duration(template, policy.as_deref(), settings)
    }

    // =========================================================================
    // Phase 2
    // =========================================================================

    /// Finishes construction. Runs from the scheduled job.
    ///
    /// Only the first caller on a `Constructing` session does the work; a
    /// concurrent caller gets the in-progress status back untouched.
    pub async fn complete_construction(&self) -> SessionStatus {
        let blocked = {
            let mut lifecycle = self.lifecycle();
            if lifecycle.advance(SessionState::Constructing, SessionState::Completing) {
                None
            } else {
                Some(lifecycle.state)
            }
        };
        match blocked {
            None => {}
            Some(SessionState::Initiated) => {
                return self.terminate(SessionState::Cancelled, None).await;
            }
            Some(_) => return self.lifecycle().status(),
        }

        match self.finish().await {
            Ok(structure_id) => {
                tracing::info!(
                    session_id = %self.id,
                    actor_id = %self.actor_id,
                    deed_id = %self.deed.id(),
                    %structure_id,
                    "Construction complete"
                );
                self.settle(SessionState::Completed, None).await
            }
            Err(reason) => self.settle(SessionState::Cancelled, Some(reason)).await,
        }
    }

    async fn finish(&self) -> Result<ObjectId, PlacementError> {
        self.tear_down_placeholder().await;

        let participants = match self.resolve() {
            Ok(participants) => participants,
            Err(reason) => {
                self.zone.remove().await;
                return Err(reason);
            }
        };
        let placement = self
            .placement()
            .ok_or_else(|| PlacementError::expired("placement"))?;
        let template = participants.deed.lock().await.generated_template().clone();

        let structure = self
            .services
            .authority
            .place(
                &participants.actor,
                &template,
                placement.at.x,
                placement.at.y,
                placement.angle,
            )
            .await;

        self.zone.remove().await;
        self.record_transaction(&participants, &template, structure.as_ref().map(Shared::id))
            .await;

        let Some(structure) = structure else {
            self.return_deed(&participants).await;
            return Err(PlacementError::PlacementRejected);
        };

        self.finalize(&participants, &structure, placement).await;
        Ok(structure.id())
    }

    async fn record_transaction(
        &self,
        participants: &Participants,
        template: &TemplatePath,
        result: Option<ObjectId>,
    ) {
        let entry = AuditEntry::new(
            participants.deed.id(),
            participants.actor.id(),
            result,
            TransactionCode::StructureDeed,
            self.services.clock.now(),
        )
        .tag("subjectTemplate", template.as_str());
        self.services.audit.record(entry).await;
    }

    async fn return_deed(&self, participants: &Participants) {
        let deed_id = participants.deed.id();
        let returned = participants
            .actor
            .lock()
            .await
            .inventory_mut()
            .transfer_in(deed_id);
        tracing::debug!(session_id = %self.id, %deed_id, returned, "Deed handed back");
    }

    /// Links the structure to its deed and actor. Structure and actor are
    /// locked together for the whole step.
    async fn finalize(
        &self,
        participants: &Participants,
        structure: &Shared<Structure>,
        placement: Placement,
    ) {
        let deed_id = participants.deed.id();
        let mut mail = None;
        {
            let (mut building, mut owner) = lock_both(structure, &participants.actor).await;
            building.set_deed_id(deed_id);
            if let Err(e) = participants
                .deed
                .lock()
                .await
                .notify_structure_placed(owner.id(), building.id())
            {
                tracing::warn!(session_id = %self.id, %deed_id, error = %e, "Deed bookkeeping failed");
            }
            owner.inventory_mut().remove(deed_id);

            let first_name = owner.first_name().clone();
            if let Some(profile) = owner.profile_mut() {
                let waypoint = self
                    .create_waypoint(&building, placement, &participants.partition)
                    .await;
                if let Some(waypoint) = &waypoint {
                    building.set_waypoint_id(waypoint.id());
                    profile.add_waypoint(waypoint.clone());
                }
                mail = Some(self.completion_mail(
                    &building,
                    profile.lots_remaining(),
                    first_name.as_str(),
                    waypoint,
                ));
                if let Some(name) = sign_name(&building, &first_name) {
                    building.set_custom_name(name);
                }
            }
        }

        if let Some(mail) = mail {
            self.services.notifier.send_mail(mail).await;
        }
    }

    async fn create_waypoint(
        &self,
        structure: &Structure,
        placement: Placement,
        partition: &Arc<dyn WorldPartition>,
    ) -> Option<Waypoint> {
        let template = self.services.settings.waypoint_template.id();
        let Some(handle) = self.services.objects.create_waypoint(template).await else {
            tracing::warn!(session_id = %self.id, "Waypoint could not be created");
            return None;
        };
        let mut waypoint = handle.lock().await;
        waypoint.set_name(structure.displayed_name());
        waypoint.set_active(true);
        waypoint.set_position(Position::on_ground(placement.at));
        waypoint.set_partition(partition.name());
        Some(waypoint.clone())
    }

    fn completion_mail(
        &self,
        structure: &Structure,
        lots_remaining: u32,
        recipient: &str,
        waypoint: Option<Waypoint>,
    ) -> MailMessage {
        let labels = &self.services.settings.completion_mail;
        MailMessage {
            sender: labels.sender.clone(),
            subject: labels.subject.clone(),
            body: StringIdMessage::new(labels.body.clone())
                .with_to(structure.object_name())
                .with_di(i64::from(lots_remaining)),
            recipient: recipient.to_string(),
            attachment: waypoint,
        }
    }

    // =========================================================================
    // Termination
    // =========================================================================

    /// Ends the session on request. Once completion is running it has no
    /// effect and the in-progress status is returned.
    pub async fn cancel(&self) -> SessionStatus {
        self.terminate(SessionState::Cancelled, None).await
    }

    /// Records the outcome unless the session is already over or a completion
    /// owns it, then winds the session down.
    async fn terminate(
        &self,
        outcome: SessionState,
        reason: Option<PlacementError>,
    ) -> SessionStatus {
        let status = {
            let mut lifecycle = self.lifecycle();
            if lifecycle.state.is_terminal() || lifecycle.state == SessionState::Completing {
                return lifecycle.status();
            }
            lifecycle.close(outcome, reason)
        };
        self.wind_down(outcome, status).await
    }

    /// Ends a session whose completion this caller owns.
    async fn settle(&self, outcome: SessionState, reason: Option<PlacementError>) -> SessionStatus {
        let status = self.lifecycle().close(outcome, reason);
        self.wind_down(outcome, status).await
    }

    /// The single terminal path: releases anything still standing in the
    /// world and deregisters the session.
    async fn wind_down(&self, outcome: SessionState, status: SessionStatus) -> SessionStatus {
        if self.tear_down_placeholder().await {
            tracing::debug!(session_id = %self.id, "Placeholder released on termination");
        }
        if self.zone.remove().await {
            tracing::debug!(session_id = %self.id, "Exclusion zone released on termination");
        }
        self.registry.deregister(self.actor_id, self.id);

        match status.reason() {
            Some(reason) => tracing::warn!(
                session_id = %self.id,
                actor_id = %self.actor_id,
                status = status.code(),
                reason = %reason,
                "Placement cancelled"
            ),
            None => tracing::debug!(
                session_id = %self.id,
                actor_id = %self.actor_id,
                status = status.code(),
                state = %outcome,
                "Placement session closed"
            ),
        }
        status
    }

    async fn tear_down_placeholder(&self) -> bool {
        let claim = self.placeholder.lock().await.take();
        match claim {
            Some(claim) => {
                claim.release().await;
                true
            }
            None => false,
        }
    }

    fn resolve(&self) -> Result<Participants, PlacementError> {
        let deed = self
            .deed
            .upgrade()
            .ok_or_else(|| PlacementError::expired("deed"))?;
        let partition = self
            .partition
            .upgrade()
            .ok_or_else(|| PlacementError::expired("partition"))?;
        let actor = self
            .actor
            .upgrade()
            .ok_or_else(|| PlacementError::expired("actor"))?;
        Ok(Participants {
            deed,
            actor,
            partition,
        })
    }

    fn terminal_status(&self) -> Option<SessionStatus> {
        let lifecycle = self.lifecycle();
        lifecycle.state.is_terminal().then(|| lifecycle.status())
    }

    fn has_ended(&self) -> bool {
        self.lifecycle().state.is_terminal()
    }

    fn lifecycle(&self) -> std::sync::MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
