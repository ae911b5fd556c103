use thiserror::Error;

/// Planner error types
///
/// The computation core is infallible by construction: every formula is a
/// pure function over pre-validated numeric inputs. Errors only arise at the
/// edges, when loading a price table or resolving user input against it.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Price table file could not be read
    #[error("failed to read price table: {0}")]
    Io(#[from] std::io::Error),

    /// Price table content is not valid TOML
    #[error("failed to parse price table: {0}")]
    Parse(#[from] toml::de::Error),

    /// Requested model has no catalog entry
    #[error("model not found in price table: {0}")]
    ModelNotFound(String),

    /// Workload parameters outside their valid domain
    #[error("invalid workload: {0}")]
    InvalidWorkload(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PlannerError::ModelNotFound("gpt-5".to_string());
        assert_eq!(error.to_string(), "model not found in price table: gpt-5");
    }
}
