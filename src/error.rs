use thiserror::Error;

/// Errors produced while loading samples or running the estimator.
#[derive(Debug, Error)]
pub enum EmError {
    #[error("at least 3 samples are required, got {found}")]
    InsufficientSamples { found: usize },

    /// `position` is 1-based, like `InvalidToken::position`.
    #[error("sample {position} is not a finite number: {value}")]
    NonFiniteSample { position: usize, value: f64 },

    #[error("input is empty: expected a sample count")]
    MissingCount,

    #[error("sample count must be a non-negative integer, got {token:?}")]
    InvalidCount { token: String },

    #[error("expected {expected} samples, found only {found}")]
    MissingSamples { expected: usize, found: usize },

    #[error("token {position} is not a real number: {token:?}")]
    InvalidToken { position: usize, token: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// `sample` is the 0-based row in ascending sample order.
    #[error(
        "iteration {iteration}: kernel sum for sample {sample} is {value}, responsibilities are undefined"
    )]
    DegenerateResponsibility {
        iteration: usize,
        sample: usize,
        value: f64,
    },

    #[error("iteration {iteration}: component {component} collapsed (total responsibility {total})")]
    CollapsedComponent {
        iteration: usize,
        component: usize,
        total: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = EmError::InvalidToken {
            position: 4,
            token: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "token 4 is not a real number: \"abc\"");

        let err = EmError::CollapsedComponent {
            iteration: 3,
            component: 2,
            total: 0.0,
        };
        assert!(err.to_string().contains("component 2 collapsed"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: EmError = io.into();
        assert!(matches!(err, EmError::Io(_)));
    }
}
