/// Crate-wide result alias.
pub type EditorResult<T> = Result<T, EditorError>;

/// Error taxonomy of the editing core.
///
/// `InvalidInput` and `Precondition` are recoverable by design: the session
/// maps them to placeholder/no-op outcomes instead of surfacing them.
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    /// A payload from the outside (e.g. dropped file bytes) was not usable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation was requested before its required state existed.
    #[error("precondition violation: {0}")]
    Precondition(String),

    /// A target format could not be serialized.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// An internal invariant does not hold (buffer shapes, degenerate geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EditorError {
    /// Construct an `InvalidInput` error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Construct a `Precondition` error.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Construct an `Encoding` error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Construct a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
