//! Error types for Hangar core.

use std::{error::Error, fmt};

use crate::domain::ShipId;

/// Error type for Hangar core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HangarError {
    /// No ship exists with the given identifier.
    NotFound(ShipId),
    /// The caller passed input that boundary validation should have rejected.
    PreconditionViolation(String),
    /// The underlying ship store failed.
    Store(String),
}

impl HangarError {
    /// Build a precondition violation from a message.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation(message.into())
    }

    /// Build a store failure from any displayable error.
    pub fn store(err: impl fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}

impl fmt::Display for HangarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::PreconditionViolation(message) => write!(f, "precondition violated: {message}"),
            Self::Store(message) => write!(f, "store error: {message}"),
        }
    }
}

impl Error for HangarError {}

/// Convenience result type for Hangar core.
pub type Result<T> = std::result::Result<T, HangarError>;

#[cfg(test)]
mod tests {
    use super::HangarError;

    #[test]
    fn not_found_formats_identifier() {
        let error = HangarError::NotFound(42);
        assert_eq!(format!("{error}"), "ship 42 not found");
    }

    #[test]
    fn precondition_formats_message() {
        let error = HangarError::precondition("speed must be positive");
        assert_eq!(
            format!("{error}"),
            "precondition violated: speed must be positive"
        );
    }

    #[test]
    fn store_wraps_display_output() {
        let error = HangarError::store(std::io::Error::other("disk full"));
        match error {
            HangarError::Store(message) => assert_eq!(message, "disk full"),
            other => panic!("expected Store variant, got {other:?}"),
        }
    }
}
