use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::price::{PriceQuery, PriceRule};

pub mod cache;
pub mod price;

#[cfg(test)]
pub mod mock;

pub use cache::CachedPriceRuleReader;

/// Store used by the HTTP layer: the Diesel repository behind a lookup cache.
pub type PriceStore = CachedPriceRuleReader<DieselRepository>;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only lookup of price rules.
pub trait PriceRuleReader {
    /// Return the rules for the query's brand and product whose closed
    /// validity interval contains the query instant.
    ///
    /// Implementations may return a superset; callers re-check candidacy.
    fn find_applicable_price_rules(&self, query: &PriceQuery) -> RepositoryResult<Vec<PriceRule>>;
}
