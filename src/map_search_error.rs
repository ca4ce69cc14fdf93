//! Error type shared by the stores, the session and the FFI layer.

use thiserror::Error;

/// Failures surfaced by the keyword and last-position stores.
///
/// Absence (no keywords, no saved marker) is never an error; it is
/// reported through empty collections or `None`.
#[derive(Debug, Error)]
pub enum MapSearchError {
    /// A required string field was empty or a coordinate was not finite.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The persistence collaborator failed to read or write.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// The place-search collaborator failed (network or parse error).
    #[error("search failure: {0}")]
    SearchFailure(String),
}

impl From<lmdb::Error> for MapSearchError {
    fn from(err: lmdb::Error) -> Self {
        MapSearchError::StorageFailure(format!("LMDB error: {err}"))
    }
}

impl From<serde_json::Error> for MapSearchError {
    fn from(err: serde_json::Error) -> Self {
        MapSearchError::StorageFailure(format!("malformed stored JSON: {err}"))
    }
}

impl From<std::io::Error> for MapSearchError {
    fn from(err: std::io::Error) -> Self {
        MapSearchError::StorageFailure(format!("IO error: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, MapSearchError>;
