use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::domain::price::PriceIntegrityError;

pub mod prices;

/// Result type returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer.
///
/// Each variant maps to a distinct outward status so an expected absence of
/// pricing is never confused with corrupt data or an unavailable store.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No price rule applies to the request.
    #[error("no applicable price found")]
    NotFound,
    /// The winning rule violates the resolved price invariants.
    #[error("price data integrity violation: {0}")]
    DataIntegrity(#[from] PriceIntegrityError),
    /// The price store failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
