// weir/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeirError {
    #[error("Middleware expected a carried value of type {expected_type}")]
    ValueTypeMismatch { expected_type: &'static str },

    #[error("Pipeline result could not be read as {expected_type}")]
    ResultTypeMismatch { expected_type: &'static str },

    #[error("Error in user-provided middleware. Source: {source}")]
    Middleware {
        #[source]
        source: AnyhowError,
    },

    #[error("Internal weir error: {0}")]
    Internal(String),
}

// The conversion weir provides for external errors: anything a middleware
// surfaces through anyhow becomes a Middleware-sourced WeirError.
impl From<AnyhowError> for WeirError {
    fn from(err: AnyhowError) -> Self {
        WeirError::Middleware { source: err }
    }
}

pub type WeirResult<T, E = WeirError> = std::result::Result<T, E>;
