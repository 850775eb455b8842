//! Crate-wide error type.

/// Errors surfaced by the register and the ingestion boundary.
///
/// The scoring engine itself is total and never returns one of these;
/// malformed values there degrade to documented defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error represents rejected input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let err = AppError::NotFound("risk 42".into());
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn parse_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(parse);
        assert!(matches!(err, AppError::Parse(_)));
    }
}
