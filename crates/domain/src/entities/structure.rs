//! Structure entity - a permanent, owned building or installation.

use serde::{Deserialize, Serialize};

use crate::{Angle, Coordinates, ObjectId, TemplateId};

/// What a building is used for. Drives how its sign is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingUse {
    Residential,
    Civic,
    Commercial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    Building { has_sign: bool, usage: BuildingUse },
    Installation,
}

impl StructureKind {
    pub fn is_building(&self) -> bool {
        matches!(self, Self::Building { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    id: ObjectId,
    template: TemplateId,
    owner: ObjectId,
    object_name: String,
    custom_name: Option<String>,
    kind: StructureKind,
    location: Coordinates,
    direction: Angle,
    deed_id: Option<ObjectId>,
    waypoint_id: Option<ObjectId>,
}

impl Structure {
    pub fn new(
        template: TemplateId,
        owner: ObjectId,
        object_name: impl Into<String>,
        kind: StructureKind,
        location: Coordinates,
        direction: Angle,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            template,
            owner,
            object_name: object_name.into(),
            custom_name: None,
            kind,
            location,
            direction,
            deed_id: None,
            waypoint_id: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    pub fn direction(&self) -> Angle {
        self.direction
    }

    /// Custom name when one is set, otherwise the template's object name.
    pub fn displayed_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.object_name)
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn set_custom_name(&mut self, name: impl Into<String>) {
        self.custom_name = Some(name.into());
    }

    pub fn deed_id(&self) -> Option<ObjectId> {
        self.deed_id
    }

    pub fn set_deed_id(&mut self, deed_id: ObjectId) {
        self.deed_id = Some(deed_id);
    }

    pub fn waypoint_id(&self) -> Option<ObjectId> {
        self.waypoint_id
    }

    pub fn set_waypoint_id(&mut self, waypoint_id: ObjectId) {
        self.waypoint_id = Some(waypoint_id);
    }
}
