use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use homestead_domain::{Coordinates, ExclusionZone, Structure, WorldObject};
use tokio::sync::RwLock;

use crate::infrastructure::handles::Shared;
use crate::infrastructure::ports::{
    EntityKey, EntityKind, RegionalPolicy, WorldEntity, WorldPartition,
};

/// Region policy with a fixed base placement delay.
pub struct FixedRegionalPolicy {
    base_delay: u32,
}

impl FixedRegionalPolicy {
    pub fn new(base_delay: u32) -> Self {
        Self { base_delay }
    }
}

impl RegionalPolicy for FixedRegionalPolicy {
    fn base_placement_delay(&self) -> u32 {
        self.base_delay
    }
}

/// A world partition held entirely in memory.
///
/// Never locks the objects it is handed on insert/remove; callers may hold
/// those locks while calling in.
pub struct InMemoryPartition {
    name: String,
    entities: RwLock<HashMap<EntityKey, WorldEntity>>,
    removed: RwLock<HashMap<EntityKind, usize>>,
    policy: Option<Arc<dyn RegionalPolicy>>,
}

impl InMemoryPartition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: RwLock::new(HashMap::new()),
            removed: RwLock::new(HashMap::new()),
            policy: None,
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn RegionalPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub async fn contains(&self, key: EntityKey) -> bool {
        self.entities.read().await.contains_key(&key)
    }

    pub async fn count(&self, kind: EntityKind) -> usize {
        self.entities
            .read()
            .await
            .keys()
            .filter(|key| key.kind == kind)
            .count()
    }

    /// How many entities of `kind` have been removed so far.
    pub async fn removed_count(&self, kind: EntityKind) -> usize {
        self.removed.read().await.get(&kind).copied().unwrap_or(0)
    }

    pub async fn zones(&self) -> Vec<Shared<ExclusionZone>> {
        self.entities
            .read()
            .await
            .values()
            .filter_map(|entity| match entity {
                WorldEntity::ExclusionZone(zone) => Some(zone.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn placeholders(&self) -> Vec<Shared<WorldObject>> {
        self.entities
            .read()
            .await
            .values()
            .filter_map(|entity| match entity {
                WorldEntity::Placeholder(obj) => Some(obj.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn structures(&self) -> Vec<Shared<Structure>> {
        self.entities
            .read()
            .await
            .values()
            .filter_map(|entity| match entity {
                WorldEntity::Structure(structure) => Some(structure.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl WorldPartition for InMemoryPartition {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn insert(&self, entity: WorldEntity, container_hint: i32, persist: bool) {
        let key = entity.key();
        tracing::debug!(
            partition = %self.name,
            kind = %key.kind,
            id = %key.id,
            container_hint,
            persist,
            "Inserting entity"
        );
        self.entities.write().await.insert(key, entity);
    }

    async fn remove(&self, key: EntityKey) -> bool {
        let removed = self.entities.write().await.remove(&key).is_some();
        if removed {
            *self.removed.write().await.entry(key.kind).or_insert(0) += 1;
            tracing::debug!(partition = %self.name, kind = %key.kind, id = %key.id, "Removed entity");
        }
        removed
    }

    async fn is_blocked(&self, point: Coordinates) -> bool {
        // Snapshot first so no zone lock is taken under the map lock.
        for zone in self.zones().await {
            if zone.lock().await.blocks(point) {
                return true;
            }
        }
        false
    }

    fn regional_policy(&self) -> Option<Arc<dyn RegionalPolicy>> {
        self.policy.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_domain::TemplateId;

    #[tokio::test]
    async fn insert_and_remove_track_entities() {
        let partition = InMemoryPartition::new("tatooine");
        let marker = WorldObject::new(TemplateId::of("object/construction_marker.iff"));
        let entity = WorldEntity::Placeholder(Shared::new(marker.id(), marker));
        let key = entity.key();

        partition.insert(entity, -1, true).await;
        assert!(partition.contains(key).await);
        assert_eq!(partition.count(EntityKind::Placeholder).await, 1);

        assert!(partition.remove(key).await);
        assert!(!partition.remove(key).await);
        assert_eq!(partition.removed_count(EntityKind::Placeholder).await, 1);
        assert_eq!(partition.removed_count(EntityKind::ExclusionZone).await, 0);
        assert_eq!(partition.count(EntityKind::Placeholder).await, 0);
    }

    #[tokio::test]
    async fn removals_are_counted_per_kind() {
        let partition = InMemoryPartition::new("lok");
        for _ in 0..3 {
            let marker = WorldObject::new(TemplateId::of("object/construction_marker.iff"));
            let entity = WorldEntity::Placeholder(Shared::new(marker.id(), marker));
            let key = entity.key();
            partition.insert(entity, -1, true).await;
            partition.remove(key).await;
        }
        let zone = ExclusionZone::no_build(Coordinates::new(0.0, 0.0), 64.0);
        let entity = WorldEntity::ExclusionZone(Shared::new(zone.id(), zone));
        let key = entity.key();
        partition.insert(entity, -1, true).await;
        partition.remove(key).await;

        assert_eq!(partition.removed_count(EntityKind::Placeholder).await, 3);
        assert_eq!(partition.removed_count(EntityKind::ExclusionZone).await, 1);
        assert_eq!(partition.removed.read().await.len(), 2);
    }

    #[tokio::test]
    async fn blocked_only_inside_a_zone() {
        let partition = InMemoryPartition::new("naboo");
        let zone = ExclusionZone::no_build(Coordinates::new(100.0, 100.0), 64.0);
        partition
            .insert(WorldEntity::ExclusionZone(Shared::new(zone.id(), zone)), -1, true)
            .await;

        assert!(partition.is_blocked(Coordinates::new(120.0, 90.0)).await);
        assert!(!partition.is_blocked(Coordinates::new(300.0, 300.0)).await);
    }

    #[test]
    fn policy_is_exposed_when_configured() {
        let plain = InMemoryPartition::new("corellia");
        assert!(plain.regional_policy().is_none());

        let regulated =
            InMemoryPartition::new("dantooine").with_policy(Arc::new(FixedRegionalPolicy::new(30)));
        let delay = regulated
            .regional_policy()
            .map(|policy| policy.base_placement_delay());
        assert_eq!(delay, Some(30));
    }
}
