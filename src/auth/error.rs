use thiserror::Error;

/// Failures of the credential operations. Everything the storage layer can
/// throw at us is folded into `Storage`; the first three are recoverable by
/// the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password too weak: {0}")]
    WeakPassword(&'static str),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}
