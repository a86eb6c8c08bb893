//! Session lifecycle states and the status codes reported to callers.

use std::fmt;

use super::error::PlacementError;

/// `Initiated -> Constructing -> Completing -> {Completed | Cancelled}`.
///
/// `Completing` is held by exactly one running completion; nothing else can
/// end the session while it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initiated,
    Constructing,
    Completing,
    Completed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiated => write!(f, "initiated"),
            Self::Constructing => write!(f, "constructing"),
            Self::Completing => write!(f, "completing"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Construction started; completion is scheduled.
    Constructing,
    Completed,
    /// `None` when cancelled on request rather than by a failure.
    Cancelled(Option<PlacementError>),
}

impl SessionStatus {
    pub const OK: i32 = 0;
    pub const CANCELLED: i32 = 1;

    /// Zero for success, nonzero for any cancellation.
    pub fn code(&self) -> i32 {
        match self {
            Self::Constructing | Self::Completed => Self::OK,
            Self::Cancelled(None) => Self::CANCELLED,
            Self::Cancelled(Some(reason)) => reason.code(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() == Self::OK
    }

    pub fn reason(&self) -> Option<&PlacementError> {
        match self {
            Self::Cancelled(reason) => reason.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        assert!(!SessionState::Initiated.is_terminal());
        assert!(!SessionState::Constructing.is_terminal());
        assert!(!SessionState::Completing.is_terminal());
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Cancelled.is_terminal());
    }

    #[test]
    fn status_codes() {
        assert_eq!(SessionStatus::Constructing.code(), 0);
        assert_eq!(SessionStatus::Completed.code(), 0);
        assert_eq!(SessionStatus::Cancelled(None).code(), 1);
        let rejected = SessionStatus::Cancelled(Some(PlacementError::PlacementRejected));
        assert_eq!(rejected.code(), 5);
        assert!(!rejected.is_success());
        assert_eq!(rejected.reason(), Some(&PlacementError::PlacementRejected));
    }
}
