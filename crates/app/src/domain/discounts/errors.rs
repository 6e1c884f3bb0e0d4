//! Discounts service errors.

use std::error::Error as StdError;

use rebate::{fixtures::FixtureError, rejection::Rejection};
use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscountRepositoryError {
    #[error("invalid record in column {column}: {source}")]
    InvalidRecord {
        column: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("storage error: {0}")]
    Sql(#[source] Error),

    #[error("catalog error: {0}")]
    Catalog(#[from] FixtureError),
}

impl From<Error> for DiscountRepositoryError {
    fn from(error: Error) -> Self {
        match error {
            Error::ColumnDecode { index, source } => Self::InvalidRecord {
                column: index,
                source,
            },
            other => Self::Sql(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("discount lookup failed")]
    Repository(#[from] DiscountRepositoryError),
}

impl ResolveError {
    /// Whether retrying the same request could succeed. Business rejections
    /// are final; storage failures are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(_))
    }

    /// The business rejection, if this is one.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Repository(_) => None,
        }
    }
}
