//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Roster is empty")]
    EmptyRoster,

    #[error("No stages configured")]
    NoStages,

    #[error("Malformed recommendation list: {0}")]
    MalformedRecommendations(String),

    #[error("Invalid quorum rule: {0}")]
    InvalidRule(String),
}

impl DomainError {
    /// Check if this error came from an unparseable collaborator payload
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, DomainError::MalformedRecommendations(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyRoster.to_string(), "Roster is empty");
        assert_eq!(
            DomainError::MalformedRecommendations("eof".to_string()).to_string(),
            "Malformed recommendation list: eof"
        );
    }

    #[test]
    fn test_is_malformed_payload() {
        assert!(DomainError::MalformedRecommendations(String::new()).is_malformed_payload());
        assert!(!DomainError::NoStages.is_malformed_payload());
    }
}
