//! Domain entities

mod actor;
mod deed;
mod exclusion_zone;
mod structure;
mod template;
mod waypoint;
mod world_object;

pub use actor::{Actor, Container, PlayerProfile};
pub use deed::Deed;
pub use exclusion_zone::{CircularArea, ExclusionZone};
pub use structure::{BuildingUse, Structure, StructureKind};
pub use template::{Footprint, StructureTemplate};
pub use waypoint::Waypoint;
pub use world_object::WorldObject;
