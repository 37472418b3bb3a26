// File: crates/coinchart-state/src/error.rs
// Summary: Network error kinds surfaced to the user, and the fetch outcome wrapping them.

use thiserror::Error;

/// Failure kinds a data source can report. Display text is user facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("The request timed out.")]
    RequestTimeout,
    #[error("Too many requests, please try again in a moment.")]
    TooManyRequests,
    #[error("Couldn't reach the server, please check your internet connection.")]
    NoInternet,
    #[error("Couldn't read the server response.")]
    Serialization,
    #[error("Oops, something went wrong.")]
    ServerError,
    #[error("Oops, something went wrong.")]
    Unknown,
}

impl NetworkError {
    /// Classify an HTTP status code the way a REST data source would.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            408 => Some(Self::RequestTimeout),
            429 => Some(Self::TooManyRequests),
            500..=599 => Some(Self::ServerError),
            _ => Some(Self::Unknown),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("operation cancelled")]
    Cancelled,
}
