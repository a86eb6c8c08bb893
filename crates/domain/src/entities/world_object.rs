//! Generic world object, used for construction markers.

use serde::{Deserialize, Serialize};

use crate::{Angle, ObjectId, Position, TemplateId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    id: ObjectId,
    template: TemplateId,
    position: Position,
    direction: Angle,
    in_world: bool,
}

impl WorldObject {
    pub fn new(template: TemplateId) -> Self {
        Self {
            id: ObjectId::new(),
            template,
            position: Position::default(),
            direction: Angle::default(),
            in_world: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Angle {
        self.direction
    }

    pub fn is_in_world(&self) -> bool {
        self.in_world
    }

    pub fn initialize_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Turns the object by `angle` relative to its current heading.
    pub fn rotate(&mut self, angle: Angle) {
        self.direction = Angle::degrees(self.direction.as_degrees() + angle.as_degrees());
    }

    pub fn mark_in_world(&mut self) {
        self.in_world = true;
    }

    pub fn destroy_from_world(&mut self) {
        self.in_world = false;
    }
}
