//! Session-owned objects standing in a world partition.

use std::sync::Weak;

use homestead_domain::{ExclusionZone, WorldObject};

use crate::infrastructure::handles::Shared;
use crate::infrastructure::ports::{WorldEntity, WorldPartition};

/// An object that can be put into and taken out of a partition.
pub(crate) trait Resident: Send + Sized {
    fn leave_world(&mut self);
    fn entity(handle: &Shared<Self>) -> WorldEntity;
}

impl Resident for WorldObject {
    fn leave_world(&mut self) {
        self.destroy_from_world();
    }

    fn entity(handle: &Shared<Self>) -> WorldEntity {
        WorldEntity::Placeholder(handle.clone())
    }
}

impl Resident for ExclusionZone {
    fn leave_world(&mut self) {
        self.destroy_from_world();
    }

    fn entity(handle: &Shared<Self>) -> WorldEntity {
        WorldEntity::ExclusionZone(handle.clone())
    }
}

/// Exclusive ownership of an object the session put into a partition.
pub(crate) struct WorldClaim<T: Resident> {
    object: Shared<T>,
    partition: Weak<dyn WorldPartition>,
}

impl<T: Resident> WorldClaim<T> {
    pub(crate) fn new(object: Shared<T>, partition: &Weak<dyn WorldPartition>) -> Self {
        Self {
            object,
            partition: Weak::clone(partition),
        }
    }

    pub(crate) fn object(&self) -> &Shared<T> {
        &self.object
    }

    /// Destroys the object from the world under its own lock. A partition
    /// that no longer exists took the object with it.
    pub(crate) async fn release(self) {
        let mut object = self.object.lock().await;
        object.leave_world();
        if let Some(partition) = self.partition.upgrade() {
            let key = T::entity(&self.object).key();
            if !partition.remove(key).await {
                tracing::debug!(kind = %key.kind, id = %key.id, "Claimed object was already gone");
            }
        }
    }
}
