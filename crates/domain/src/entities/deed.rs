//! Structure deed - the consumable right to place one structure.

use serde::{Deserialize, Serialize};

use crate::{DomainError, ObjectId, TemplatePath};

/// A deed names the structure template it generates. It is single-use:
/// once a structure is placed from it, it is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deed {
    id: ObjectId,
    generated_template: TemplatePath,
    placed_structure: Option<ObjectId>,
    placed_by: Option<ObjectId>,
}

impl Deed {
    pub fn new(generated_template: impl Into<TemplatePath>) -> Self {
        Self {
            id: ObjectId::new(),
            generated_template: generated_template.into(),
            placed_structure: None,
            placed_by: None,
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn generated_template(&self) -> &TemplatePath {
        &self.generated_template
    }

    pub fn is_consumed(&self) -> bool {
        self.placed_structure.is_some()
    }

    pub fn placed_structure(&self) -> Option<ObjectId> {
        self.placed_structure
    }

    pub fn placed_by(&self) -> Option<ObjectId> {
        self.placed_by
    }

    /// Records that `structure` now stands on this deed.
    pub fn notify_structure_placed(
        &mut self,
        owner: ObjectId,
        structure: ObjectId,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.placed_structure {
            return Err(DomainError::invalid_state_transition(format!(
                "deed {} already placed structure {}",
                self.id, existing
            )));
        }
        self.placed_structure = Some(structure);
        self.placed_by = Some(owner);
        Ok(())
    }
}
