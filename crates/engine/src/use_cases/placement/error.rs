//! Placement errors.

use homestead_domain::{Coordinates, ObjectId, TemplateId};

/// Why a placement session was cancelled.
///
/// These never cross the session boundary as errors: every one of them ends in
/// the session's cancellation path, and callers only see a [`SessionStatus`].
///
/// [`SessionStatus`]: super::SessionStatus
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("{handle} reference expired")]
    ReferenceExpired { handle: &'static str },
    #[error("Structure template unresolved: {0}")]
    TemplateUnresolved(TemplateId),
    #[error("Exclusion zone already active for this session")]
    ZoneConflict,
    #[error("Placement rejected by authority")]
    PlacementRejected,
}

impl PlacementError {
    pub fn expired(handle: &'static str) -> Self {
        Self::ReferenceExpired { handle }
    }

    /// Nonzero status code reported for this cancellation.
    pub fn code(&self) -> i32 {
        match self {
            Self::ReferenceExpired { .. } => 2,
            Self::TemplateUnresolved(_) => 3,
            Self::ZoneConflict => 4,
            Self::PlacementRejected => 5,
        }
    }
}

/// Errors from opening a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Actor {0} already has an active placement session")]
    AlreadyActive(ObjectId),
    #[error("Site at {0} is inside another placement's exclusion zone")]
    SiteBlocked(Coordinates),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_nonzero_code() {
        let codes = [
            PlacementError::expired("deed").code(),
            PlacementError::TemplateUnresolved(TemplateId::of("x")).code(),
            PlacementError::ZoneConflict.code(),
            PlacementError::PlacementRejected.code(),
        ];
        assert!(codes.iter().all(|code| *code != 0));
        let mut unique = codes.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            PlacementError::expired("actor").to_string(),
            "actor reference expired"
        );
    }
}
