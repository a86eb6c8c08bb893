//! Application state and composition.

use std::sync::Arc;

use crate::use_cases::placement::{PlacementServices, SessionRegistry, StartPlacement};
use crate::use_cases::PlacementUseCases;

/// Main application state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub placement: PlacementUseCases,
}

impl App {
    /// Wires the use cases over an already-built set of collaborators.
    pub fn new(services: PlacementServices) -> Self {
        let sessions = Arc::new(SessionRegistry::new());
        let start = Arc::new(StartPlacement::new(services, Arc::clone(&sessions)));

        Self {
            use_cases: UseCases {
                placement: PlacementUseCases::new(start, sessions),
            },
        }
    }
}
