//! Waypoint entity - a named map marker owned by a player.

use serde::{Deserialize, Serialize};

use crate::{ObjectId, Position, TemplateId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    id: ObjectId,
    template: TemplateId,
    name: String,
    active: bool,
    position: Position,
    partition: String,
}

impl Waypoint {
    pub fn new(template: TemplateId) -> Self {
        Self {
            id: ObjectId::new(),
            template,
            name: String::new(),
            active: false,
            position: Position::default(),
            partition: String::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Name of the world partition the waypoint points into.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_partition(&mut self, partition: impl Into<String>) {
        self.partition = partition.into();
    }
}
