//! Structure placement use cases.

mod claim;
mod construction;
mod error;
mod exclusion_zone;
mod naming;
mod registry;
mod session;
mod start_placement;
mod state;
mod task;

#[cfg(test)]
pub(crate) mod test_support;

pub use construction::{construction_duration, placeholder_rotation};
pub use error::{PlacementError, SessionError};
pub use exclusion_zone::ExclusionZoneManager;
pub use naming::sign_name;
pub use registry::SessionRegistry;
pub use session::{Placement, PlacementServices, PlacementSession};
pub use start_placement::{PlacementRequest, StartPlacement};
pub use state::{SessionState, SessionStatus};
pub use task::ConstructionCompleteTask;

use std::sync::Arc;

/// Container for placement use cases.
pub struct PlacementUseCases {
    pub start: Arc<StartPlacement>,
    pub sessions: Arc<SessionRegistry>,
}

impl PlacementUseCases {
    pub fn new(start: Arc<StartPlacement>, sessions: Arc<SessionRegistry>) -> Self {
        Self { start, sessions }
    }
}
