use std::sync::Arc;

use async_trait::async_trait;
use homestead_domain::{Actor, Angle, Coordinates, Structure, TemplatePath};
use tokio::sync::Mutex;

use crate::infrastructure::handles::Shared;
use crate::infrastructure::in_memory::InMemoryPartition;
use crate::infrastructure::ports::{PlacementAuthority, TemplateResolver, WorldEntity, WorldPartition};

/// Default minimum distance between two structures, in meters.
pub const DEFAULT_STRUCTURE_SPACING: f32 = 16.0;

/// In-memory placement authority.
///
/// Rejects a placement when another structure stands within `spacing` of the
/// point or the actor lacks the lots for it; otherwise builds the structure,
/// debits the lots, and puts it in the partition. The check and the insert run
/// under one gate so two sessions cannot both pass the spacing check.
pub struct FootprintAuthority {
    templates: Arc<dyn TemplateResolver>,
    partition: Arc<InMemoryPartition>,
    spacing: f32,
    gate: Mutex<()>,
}

impl FootprintAuthority {
    pub fn new(templates: Arc<dyn TemplateResolver>, partition: Arc<InMemoryPartition>) -> Self {
        Self {
            templates,
            partition,
            spacing: DEFAULT_STRUCTURE_SPACING,
            gate: Mutex::new(()),
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    async fn is_crowded(&self, point: Coordinates) -> bool {
        for structure in self.partition.structures().await {
            if structure.lock().await.location().distance_to(point) < self.spacing {
                return true;
            }
        }
        false
    }
}

#[async_trait]
impl PlacementAuthority for FootprintAuthority {
    async fn place(
        &self,
        actor: &Shared<Actor>,
        template: &TemplatePath,
        x: f32,
        y: f32,
        angle: Angle,
    ) -> Option<Shared<Structure>> {
        let Some(structure_template) = self.templates.resolve(template.id()).await else {
            tracing::warn!(template = %template, "Placement rejected: unknown template");
            return None;
        };

        let point = Coordinates::new(x, y);
        let _gate = self.gate.lock().await;

        if self.is_crowded(point).await {
            tracing::info!(template = %template, %point, "Placement rejected: too close to another structure");
            return None;
        }

        let structure = {
            let mut owner = actor.lock().await;
            if let Some(profile) = owner.profile_mut() {
                if let Err(e) = profile.debit_lots(structure_template.lot_size) {
                    tracing::info!(actor_id = %actor.id(), error = %e, "Placement rejected");
                    return None;
                }
            }
            Structure::new(
                structure_template.path.id(),
                owner.id(),
                structure_template.object_name.clone(),
                structure_template.kind,
                point,
                angle,
            )
        };

        let structure = Shared::new(structure.id(), structure);
        self.partition
            .insert(WorldEntity::Structure(structure.clone()), -1, true)
            .await;
        Some(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::TemplateCatalog;
    use crate::infrastructure::ports::EntityKind;
    use homestead_domain::{ActorName, PlayerProfile, StructureTemplate};

    const HOUSE: &str = "object/building/player/player_house_small.iff";

    fn setup() -> (FootprintAuthority, Arc<InMemoryPartition>) {
        let catalog = Arc::new(
            TemplateCatalog::new()
                .with_template(StructureTemplate::new(HOUSE, 2).with_object_name("@house")),
        );
        let partition = Arc::new(InMemoryPartition::new("tatooine"));
        (FootprintAuthority::new(catalog, partition.clone()), partition)
    }

    fn player(lots: u32) -> Shared<Actor> {
        let actor = Actor::new(ActorName::new("Ana").expect("valid name"))
            .with_profile(PlayerProfile::new(lots));
        Shared::new(actor.id(), actor)
    }

    #[tokio::test]
    async fn places_structure_and_debits_lots() {
        let (authority, partition) = setup();
        let actor = player(10);

        let structure = authority
            .place(&actor, &TemplatePath::new(HOUSE), 10.0, 20.0, Angle::degrees(90))
            .await
            .expect("placement accepted");

        let placed = structure.lock().await;
        assert_eq!(placed.owner(), actor.id());
        assert_eq!(placed.location(), Coordinates::new(10.0, 20.0));
        assert_eq!(placed.object_name(), "@house");
        drop(placed);

        assert_eq!(partition.count(EntityKind::Structure).await, 1);
        let lots = actor.lock().await.profile().map(|p| p.lots_remaining());
        assert_eq!(lots, Some(8));
    }

    #[tokio::test]
    async fn rejects_when_lots_run_out() {
        let (authority, partition) = setup();
        let actor = player(1);

        let result = authority
            .place(&actor, &TemplatePath::new(HOUSE), 0.0, 0.0, Angle::default())
            .await;

        assert!(result.is_none());
        assert_eq!(partition.count(EntityKind::Structure).await, 0);
    }

    #[tokio::test]
    async fn rejects_crowded_points() {
        let (authority, _partition) = setup();
        let actor = player(10);
        let template = TemplatePath::new(HOUSE);

        assert!(authority
            .place(&actor, &template, 0.0, 0.0, Angle::default())
            .await
            .is_some());
        assert!(authority
            .place(&actor, &template, 5.0, 5.0, Angle::default())
            .await
            .is_none());
        assert!(authority
            .place(&actor, &template, 100.0, 0.0, Angle::default())
            .await
            .is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_templates() {
        let (authority, _partition) = setup();
        let actor = player(10);
        let result = authority
            .place(
                &actor,
                &TemplatePath::new("object/building/player/unknown.iff"),
                0.0,
                0.0,
                Angle::default(),
            )
            .await;
        assert!(result.is_none());
    }
}
