/// Convenience result type used across calamity.
pub type CalamityResult<T> = Result<T, CalamityError>;

/// Top-level error taxonomy used by timeline and channel APIs.
#[derive(thiserror::Error, Debug)]
pub enum CalamityError {
    /// Invalid duration, subject binding, or target values.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// API called out of order (tick before setup, setup twice).
    #[error("usage error: {0}")]
    Usage(String),

    /// A bound subject went away or could not be borrowed after setup.
    #[error("subject error: {0}")]
    Subject(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CalamityError {
    /// Build a [`CalamityError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CalamityError::Usage`] value.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`CalamityError::Subject`] value.
    pub fn subject(msg: impl Into<String>) -> Self {
        Self::Subject(msg.into())
    }

    /// Build a [`CalamityError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CalamityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
