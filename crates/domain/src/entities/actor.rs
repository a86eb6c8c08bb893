//! Actor entity - the player-controlled creature that places structures.
//!
//! An actor always has a holding container (its inventory). Player-driven
//! actors additionally carry a [`PlayerProfile`] with their waypoints and
//! remaining lot allowance.

use serde::{Deserialize, Serialize};

use crate::{ActorName, DomainError, ObjectId, Waypoint};

/// An unordered holding container. An object is held at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    items: Vec<ObjectId>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `item` into the container. Returns `false` if it was already held.
    pub fn transfer_in(&mut self, item: ObjectId) -> bool {
        if self.contains(item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Takes `item` out of the container. Returns `false` if it was not held.
    pub fn remove(&mut self, item: ObjectId) -> bool {
        match self.items.iter().position(|held| *held == item) {
            Some(index) => {
                self.items.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: ObjectId) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }
}

/// Player-only state attached to an actor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    lots_remaining: u32,
    waypoints: Vec<Waypoint>,
}

impl PlayerProfile {
    pub fn new(lots_remaining: u32) -> Self {
        Self {
            lots_remaining,
            waypoints: Vec::new(),
        }
    }

    pub fn lots_remaining(&self) -> u32 {
        self.lots_remaining
    }

    /// Spends `lots` of the allowance.
    pub fn debit_lots(&mut self, lots: u32) -> Result<(), DomainError> {
        if lots > self.lots_remaining {
            return Err(DomainError::insufficient_lots(lots, self.lots_remaining));
        }
        self.lots_remaining -= lots;
        Ok(())
    }

    pub fn add_waypoint(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    id: ObjectId,
    first_name: ActorName,
    inventory: Container,
    profile: Option<PlayerProfile>,
}

impl Actor {
    pub fn new(first_name: ActorName) -> Self {
        Self {
            id: ObjectId::new(),
            first_name,
            inventory: Container::new(),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: PlayerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn first_name(&self) -> &ActorName {
        &self.first_name
    }

    pub fn inventory(&self) -> &Container {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Container {
        &mut self.inventory
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    pub fn profile_mut(&mut self) -> Option<&mut PlayerProfile> {
        self.profile.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_holds_each_item_once() {
        let mut container = Container::new();
        let deed = ObjectId::new();
        assert!(container.transfer_in(deed));
        assert!(!container.transfer_in(deed));
        assert_eq!(container.len(), 1);
        assert!(container.remove(deed));
        assert!(!container.remove(deed));
        assert!(container.is_empty());
    }

    #[test]
    fn debit_lots_refuses_overdraft() {
        let mut profile = PlayerProfile::new(3);
        profile.debit_lots(2).expect("enough lots");
        assert_eq!(profile.lots_remaining(), 1);
        let err = profile.debit_lots(2);
        assert!(matches!(
            err,
            Err(DomainError::InsufficientLots {
                required: 2,
                remaining: 1
            })
        ));
        assert_eq!(profile.lots_remaining(), 1);
    }

    #[test]
    fn actors_without_profile_are_not_players() {
        let actor = Actor::new(ActorName::new("Ana").expect("valid name"));
        assert!(actor.profile().is_none());
        let player = actor.with_profile(PlayerProfile::new(10));
        assert_eq!(player.profile().map(|p| p.lots_remaining()), Some(10));
    }
}
