//! Shared fixture for placement tests: a small in-memory world with one
//! player holding one deed.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use homestead_domain::{
    Actor, ActorName, BuildingUse, Deed, Footprint, PlayerProfile, StructureKind,
    StructureTemplate, TemplateId,
};

use super::registry::SessionRegistry;
use super::session::{PlacementServices, PlacementSession};
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::handles::Shared;
use crate::infrastructure::in_memory::{
    FixedRegionalPolicy, FootprintAuthority, InMemoryObjectFactory, InMemoryPartition,
    MailOutbox, TemplateCatalog, TracingAuditLog,
};
use crate::infrastructure::ports::{
    AuditLog, ObjectFactory, PlacementAuthority, Scheduler, WorldPartition,
};
use crate::infrastructure::scheduler::ManualScheduler;
use crate::infrastructure::settings::PlacementSettings;

pub(crate) const HOUSE: &str = "object/building/player/player_house_tatooine_small_style_01.iff";
pub(crate) const HOUSE_MARKER: &str =
    "object/building/player/construction/construction_player_house_tatooine_small_style_01.iff";
pub(crate) const HOUSE_NAME: &str = "@building_name:housing_tatt_small";
pub(crate) const LONG_HOUSE: &str = "object/building/player/player_house_tatooine_large_style_01.iff";
pub(crate) const PERK: &str = "object/building/faction_perk/hq/hq_s01_rebel.iff";
pub(crate) const CITY_HALL: &str = "object/building/player/city/cityhall_tatooine.iff";
pub(crate) const HALL_NAME: &str = "@building_name:cityhall";
pub(crate) const SPRAWLING_HALL: &str = "object/building/player/city/garden_tatooine_lrg_01.iff";
pub(crate) const GENERATOR: &str = "object/installation/generators/power_generator_wind_style_1.iff";

pub(crate) const STARTING_LOTS: u32 = 10;

fn residential() -> StructureKind {
    StructureKind::Building {
        has_sign: true,
        usage: BuildingUse::Residential,
    }
}

fn civic() -> StructureKind {
    StructureKind::Building {
        has_sign: true,
        usage: BuildingUse::Civic,
    }
}

pub(crate) fn catalog() -> TemplateCatalog {
    TemplateCatalog::new()
        .with_template(
            StructureTemplate::new(HOUSE, 1)
                .with_footprint(Footprint::new(2, 2))
                .with_construction_marker(HOUSE_MARKER)
                .with_object_name(HOUSE_NAME)
                .with_kind(residential()),
        )
        .with_template(
            StructureTemplate::new(LONG_HOUSE, 2)
                .with_footprint(Footprint::new(4, 2))
                .with_construction_marker(HOUSE_MARKER)
                .with_kind(residential()),
        )
        .with_template(
            StructureTemplate::new(PERK, 5)
                .with_footprint(Footprint::new(3, 3))
                .with_construction_marker(
                    "object/building/faction_perk/construction/construction_hq_s01.iff",
                )
                .with_kind(StructureKind::Building {
                    has_sign: false,
                    usage: BuildingUse::Civic,
                }),
        )
        .with_template(
            StructureTemplate::new(CITY_HALL, 1)
                .with_footprint(Footprint::new(3, 3))
                .with_construction_marker(HOUSE_MARKER)
                .with_object_name(HALL_NAME)
                .with_kind(civic()),
        )
        .with_template(
            StructureTemplate::new(SPRAWLING_HALL, 5)
                .with_footprint(Footprint::new(12, 12))
                .with_construction_marker(HOUSE_MARKER)
                .with_kind(civic()),
        )
        .with_template(StructureTemplate::new(GENERATOR, 1))
}

pub(crate) struct TestWorld {
    pub partition: Arc<InMemoryPartition>,
    pub scheduler: Arc<ManualScheduler>,
    pub audit: Arc<TracingAuditLog>,
    pub outbox: Arc<MailOutbox>,
    pub registry: Arc<SessionRegistry>,
    pub services: PlacementServices,
    pub actor: Shared<Actor>,
    pub deed: Shared<Deed>,
    pub now: DateTime<Utc>,
}

impl TestWorld {
    pub fn house() -> Self {
        Self::with_deed(HOUSE)
    }

    pub fn with_deed(template: &str) -> Self {
        Self::build(InMemoryPartition::new("tatooine"), template, player())
    }

    pub fn with_deed_and_policy(template: &str, base_delay: u32) -> Self {
        let partition = InMemoryPartition::new("tatooine")
            .with_policy(Arc::new(FixedRegionalPolicy::new(base_delay)));
        Self::build(partition, template, player())
    }

    pub fn house_for(actor: Actor) -> Self {
        Self::build(InMemoryPartition::new("tatooine"), HOUSE, actor)
    }

    fn build(partition: InMemoryPartition, template: &str, actor: Actor) -> Self {
        let partition = Arc::new(partition);
        let catalog = Arc::new(catalog());
        let scheduler = Arc::new(ManualScheduler::new());
        let audit = Arc::new(TracingAuditLog::new());
        let outbox = Arc::new(MailOutbox::new());
        let now = Utc
            .with_ymd_and_hms(2024, 5, 4, 12, 0, 0)
            .single()
            .expect("valid timestamp");

        let services = PlacementServices {
            templates: catalog.clone(),
            objects: Arc::new(InMemoryObjectFactory::new()),
            authority: Arc::new(FootprintAuthority::new(catalog, partition.clone())),
            scheduler: scheduler.clone(),
            audit: audit.clone(),
            notifier: outbox.clone(),
            clock: Arc::new(FixedClock(now)),
            settings: Arc::new(PlacementSettings::default()),
        };

        let deed = Deed::new(template);
        let deed = Shared::new(deed.id(), deed);
        let mut actor = actor;
        actor.inventory_mut().transfer_in(deed.id());
        let actor = Shared::new(actor.id(), actor);

        Self {
            partition,
            scheduler,
            audit,
            outbox,
            registry: Arc::new(SessionRegistry::new()),
            services,
            actor,
            deed,
            now,
        }
    }

    pub fn with_authority(mut self, authority: Arc<dyn PlacementAuthority>) -> Self {
        self.services.authority = authority;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.services.scheduler = scheduler;
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.services.audit = audit;
        self
    }

    pub fn with_objects(mut self, objects: Arc<dyn ObjectFactory>) -> Self {
        self.services.objects = objects;
        self
    }

    /// Object factory that cannot build construction markers.
    pub fn without_marker_objects(mut self) -> Self {
        self.services.objects =
            Arc::new(InMemoryObjectFactory::new().without(TemplateId::of(HOUSE_MARKER)));
        self
    }

    pub fn world(&self) -> Arc<dyn WorldPartition> {
        self.partition.clone()
    }

    /// A session for the fixture's actor and deed, not yet registered.
    pub fn session(&self) -> Arc<PlacementSession> {
        PlacementSession::new(
            self.services.clone(),
            self.registry.clone(),
            &self.deed,
            &self.actor,
            &self.world(),
        )
    }

    /// A registered session for the fixture's actor and deed.
    pub fn start(&self) -> Arc<PlacementSession> {
        self.start_for(&self.actor, &self.deed)
    }

    pub fn start_for(&self, actor: &Shared<Actor>, deed: &Shared<Deed>) -> Arc<PlacementSession> {
        let session = PlacementSession::new(
            self.services.clone(),
            self.registry.clone(),
            deed,
            actor,
            &self.world(),
        );
        if let Err(e) = self.registry.register(session.clone()) {
            panic!("fixture session should register: {e}");
        }
        session
    }
}

fn player() -> Actor {
    Actor::new(ActorName::new("Ana").expect("valid name"))
        .with_profile(PlayerProfile::new(STARTING_LOTS))
}
