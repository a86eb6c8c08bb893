extern crate self as homestead_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod placement_defaults;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Actor, BuildingUse, CircularArea, Container, Deed, ExclusionZone, Footprint, PlayerProfile,
    Structure, StructureKind, StructureTemplate, Waypoint, WorldObject,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{ObjectId, SessionId};

// Re-export value objects
pub use value_objects::{Angle, ActorName, Coordinates, Position, TemplateId, TemplatePath};
