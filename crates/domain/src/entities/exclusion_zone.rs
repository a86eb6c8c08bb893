//! Temporary no-build areas.

use serde::{Deserialize, Serialize};

use crate::{Coordinates, ObjectId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularArea {
    pub center: Coordinates,
    pub radius: f32,
}

impl CircularArea {
    pub fn new(center: Coordinates, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}

/// A circular area that blocks other placements while it stands in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionZone {
    id: ObjectId,
    position: Position,
    area: CircularArea,
    no_build: bool,
    in_world: bool,
}

impl ExclusionZone {
    /// A no-build circle centered on `center`, positioned on the ground.
    pub fn no_build(center: Coordinates, radius: f32) -> Self {
        Self {
            id: ObjectId::new(),
            position: Position::on_ground(center),
            area: CircularArea::new(center, radius),
            no_build: true,
            in_world: true,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn area(&self) -> CircularArea {
        self.area
    }

    pub fn is_no_build(&self) -> bool {
        self.no_build
    }

    pub fn is_in_world(&self) -> bool {
        self.in_world
    }

    /// Whether this zone currently blocks building at `point`.
    pub fn blocks(&self, point: Coordinates) -> bool {
        self.in_world && self.no_build && self.area.contains(point)
    }

    pub fn destroy_from_world(&mut self) {
        self.in_world = false;
    }
}
