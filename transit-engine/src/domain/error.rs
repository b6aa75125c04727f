//! Domain error types.
//!
//! Validation failures in the domain layer, distinct from catalog-loading
//! and query errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Consecutive legs don't meet at a common stop
    #[error("legs do not connect: alight at {0}, next board at {1}")]
    LegsNotConnected(String, String),

    /// A leg's walking or riding distance is not a finite non-negative number
    #[error("invalid distance: {0}")]
    InvalidDistance(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::EmptyItinerary.to_string(),
            "itinerary must have at least one leg"
        );

        let err = DomainError::LegsNotConnected("El Crucero".into(), "Av. Kabah".into());
        assert_eq!(
            err.to_string(),
            "legs do not connect: alight at El Crucero, next board at Av. Kabah"
        );
    }
}
