use std::collections::HashSet;

use async_trait::async_trait;
use homestead_domain::{TemplateId, Waypoint, WorldObject};

use crate::infrastructure::handles::Shared;
use crate::infrastructure::ports::ObjectFactory;

/// Creates fresh in-memory objects for any template not marked unavailable.
#[derive(Default)]
pub struct InMemoryObjectFactory {
    unavailable: HashSet<TemplateId>,
}

impl InMemoryObjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create` fail for `template`, as if its asset failed to load.
    pub fn without(mut self, template: TemplateId) -> Self {
        self.unavailable.insert(template);
        self
    }
}

#[async_trait]
impl ObjectFactory for InMemoryObjectFactory {
    async fn create(&self, template: TemplateId, _variant: u32) -> Option<Shared<WorldObject>> {
        if self.unavailable.contains(&template) {
            tracing::warn!(template = %template, "Template unavailable, no object created");
            return None;
        }
        let object = WorldObject::new(template);
        Some(Shared::new(object.id(), object))
    }

    async fn create_waypoint(&self, template: TemplateId) -> Option<Shared<Waypoint>> {
        if self.unavailable.contains(&template) {
            return None;
        }
        let waypoint = Waypoint::new(template);
        Some(Shared::new(waypoint.id(), waypoint))
    }
}
