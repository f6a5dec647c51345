//! Pool and factory error types

use thiserror::Error;

/// Errors that can occur while validating, constructing, or pooling agent runtimes
#[derive(Error, Debug)]
pub enum PoolError {
    /// Agent definition failed one or more structural/policy checks.
    ///
    /// Carries the complete list of violations, not just the first one found,
    /// so a caller can fix every field in a single round trip.
    #[error("Agent definition invalid: {}", .errors.join("; "))]
    Validation {
        /// All violations found by validation
        errors: Vec<String>,
    },

    /// Credential resolution failed after validation had passed
    #[error("No credential available for provider: {0}")]
    Configuration(String),

    /// The runtime construction adapter failed to build a runtime object
    #[error("Runtime construction failed for agent {agent}")]
    Construction {
        /// Agent the runtime was being built for
        agent: String,
        /// Underlying adapter error
        #[source]
        source: anyhow::Error,
    },

    /// The constructed runtime failed to initialize
    #[error("Runtime initialization failed for agent {agent}")]
    Initialization {
        /// Agent the runtime was being built for
        agent: String,
        /// Underlying initialization error
        #[source]
        source: anyhow::Error,
    },
}

impl PoolError {
    /// Create a validation error from a list of violations
    pub fn validation(errors: Vec<String>) -> Self {
        PoolError::Validation { errors }
    }
}

/// Result type alias for pool and factory operations
pub type PoolResult<T> = Result<T, PoolError>;
