/// Crate-wide result alias.
pub type PlaylineResult<T> = Result<T, PlaylineError>;

/// Crate-wide error type.
///
/// Normal editing operations (append/remove/seek/play/pause) never construct
/// one of these; they are reserved for rejected inputs and collaborator
/// failures.
#[derive(thiserror::Error, Debug)]
pub enum PlaylineError {
    /// Structurally invalid input (bad clip extents, empty locators, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Placement rejected before any store mutation.
    #[error("placement error: {0}")]
    Placement(String),

    /// A generation backend failed to produce an artifact.
    #[error("generation error: {0}")]
    Generation(String),

    /// A feature is locked for the requesting identity.
    #[error("entitlement error: {0}")]
    Entitlement(String),

    /// Timeline document or manifest (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped external error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaylineError {
    /// Build a [`PlaylineError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlaylineError::Placement`].
    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    /// Build a [`PlaylineError::Generation`].
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`PlaylineError::Entitlement`].
    pub fn entitlement(msg: impl Into<String>) -> Self {
        Self::Entitlement(msg.into())
    }

    /// Build a [`PlaylineError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
