//! Caller-facing precondition failures. Raised synchronously, never corrected.

use thiserror::Error;

use crate::ids::MovieCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no movies selected")]
    NoMoviesSelected,

    #[error("limit must be positive (got {0})")]
    NonPositiveLimit(i64),

    #[error("invalid day code: {0:?}")]
    BadDayCode(String),

    #[error("invalid identifier: {0}")]
    BadId(String),

    #[error("unknown movie code: {0}")]
    UnknownMovie(MovieCode),
}
