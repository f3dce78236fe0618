/// Convenience result type used across hookreel.
pub type HookreelResult<T> = Result<T, HookreelError>;

/// Top-level error taxonomy used by the planning APIs.
#[derive(thiserror::Error, Debug)]
pub enum HookreelError {
    /// Malformed input: negative durations, zero fps, empty background lists and the like.
    #[error("validation error: {0}")]
    Validation(String),

    /// Inconsistent frame arithmetic detected while laying out the timeline.
    #[error("timing error: {0}")]
    Timing(String),

    /// Errors while evaluating the composition tree at a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing requests and trees.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HookreelError {
    /// Build a [`HookreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HookreelError::Timing`] value.
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    /// Build a [`HookreelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`HookreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HookreelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
