use std::collections::HashMap;

use async_trait::async_trait;
use homestead_domain::{StructureTemplate, TemplateId};

use crate::infrastructure::ports::TemplateResolver;

/// Fixed set of structure templates, keyed by template id.
#[derive(Default)]
pub struct TemplateCatalog {
    templates: HashMap<TemplateId, StructureTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: StructureTemplate) -> Self {
        self.templates.insert(template.path.id(), template);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl TemplateResolver for TemplateCatalog {
    async fn resolve(&self, id: TemplateId) -> Option<StructureTemplate> {
        self.templates.get(&id).cloned()
    }
}
