use thiserror::Error;

/// Faults raised while admitting a request.
///
/// None of these are caused by the caller: they signal that the router or an
/// upstream middleware layer did not uphold its contract. Callers are expected
/// to surface them as internal errors and never as authorization denials.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// A path template variable that a gate depends on was not bound.
    #[error("Path variable '{0}' is not bound for this route")]
    MissingPathVariable(&'static str),

    /// No capability-query object was attached to the request before the
    /// permission gate ran.
    #[error("Token permissions were not resolved before the permission gate")]
    MissingTokenPermissions,
}

/// Errors returned by a [`TransactionService`](crate::TransactionService).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionServiceError {
    /// The transaction does not exist.
    #[error("Transaction '{0}' not found")]
    NotFound(String),

    /// The transaction service answered with an unexpected status.
    #[error("Transaction service responded with status {0}")]
    Status(u16),

    /// The transaction service could not be reached.
    #[error("Transaction service request failed: {0}")]
    Transport(String),

    /// The transaction service response could not be decoded.
    #[error("Failed to decode transaction: {0}")]
    Decode(String),
}

/// Errors returned by a [`FilingStore`](crate::FilingStore).
#[derive(Error, Debug)]
pub enum FilingStoreError {
    /// The underlying store failed.
    #[error("Filing store error: {0}")]
    Backend(String),
}
