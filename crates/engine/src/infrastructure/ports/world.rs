//! World-side port traits: partitions, templates, and object creation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use homestead_domain::{
    Coordinates, ExclusionZone, ObjectId, Structure, StructureTemplate, TemplateId, Waypoint,
    WorldObject,
};

use crate::infrastructure::handles::Shared;

// =============================================================================
// World Entities
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Placeholder,
    ExclusionZone,
    Structure,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "placeholder"),
            Self::ExclusionZone => write!(f, "exclusion_zone"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// Addresses one entity inside a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: ObjectId,
}

impl EntityKey {
    pub fn new(kind: EntityKind, id: ObjectId) -> Self {
        Self { kind, id }
    }
}

/// An object handed to a partition for spatial containment.
#[derive(Debug, Clone)]
pub enum WorldEntity {
    Placeholder(Shared<WorldObject>),
    ExclusionZone(Shared<ExclusionZone>),
    Structure(Shared<Structure>),
}

impl WorldEntity {
    pub fn key(&self) -> EntityKey {
        match self {
            Self::Placeholder(obj) => EntityKey::new(EntityKind::Placeholder, obj.id()),
            Self::ExclusionZone(zone) => EntityKey::new(EntityKind::ExclusionZone, zone.id()),
            Self::Structure(structure) => EntityKey::new(EntityKind::Structure, structure.id()),
        }
    }
}

// =============================================================================
// World Partition
// =============================================================================

/// Region-specific placement policy exposed by a partition.
#[cfg_attr(test, mockall::automock)]
pub trait RegionalPolicy: Send + Sync {
    /// Base delay for regulated structures, in policy units (seconds).
    fn base_placement_delay(&self) -> u32;
}

/// A shared region of the world that owns spatial containment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorldPartition: Send + Sync {
    fn name(&self) -> String;

    /// Adds `entity` to the partition. `container_hint` of -1 means no slot.
    async fn insert(&self, entity: WorldEntity, container_hint: i32, persist: bool);

    /// Removes an entity. Returns `false` if it was not present.
    async fn remove(&self, key: EntityKey) -> bool;

    /// Whether a no-build zone in the partition covers `point`.
    async fn is_blocked(&self, point: Coordinates) -> bool;

    fn regional_policy(&self) -> Option<Arc<dyn RegionalPolicy>>;
}

// =============================================================================
// Templates and Object Creation
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateResolver: Send + Sync {
    async fn resolve(&self, id: TemplateId) -> Option<StructureTemplate>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectFactory: Send + Sync {
    async fn create(&self, template: TemplateId, variant: u32) -> Option<Shared<WorldObject>>;

    async fn create_waypoint(&self, template: TemplateId) -> Option<Shared<Waypoint>>;
}
