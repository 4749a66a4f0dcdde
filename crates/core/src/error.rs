/// Domain errors raised by the configuration engine and the operation proxy.
///
/// Not-found conditions are deliberately absent: they are returned as
/// [`crate::lookup::Lookup::Missing`] values so callers can branch on them
/// without error handling.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Identificador inválido: {0}")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DuplicateName(String),

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    ConcurrentModification(String),

    /// A store write failed. The message is fixed per operation; the
    /// underlying store error is logged where it happens and dropped.
    #[error("{0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
