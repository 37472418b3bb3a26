// File: crates/coinchart-core/src/error.rs
// Summary: Error type for layout validation.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ChartError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
