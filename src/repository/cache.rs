//! Read-through cache for price rule lookups.
//!
//! Entries are keyed by brand, product and the exact query instant, so a
//! cached candidate set is only ever reused for the very same instant and
//! can never leak across a rule validity boundary.

use dashmap::DashMap;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::price::{PriceQuery, PriceRule};
use crate::repository::PriceRuleReader;

/// Caches candidate sets returned by an inner [`PriceRuleReader`].
pub struct CachedPriceRuleReader<R> {
    inner: R,
    entries: DashMap<PriceQuery, Vec<PriceRule>>,
    capacity: usize,
}

impl<R> CachedPriceRuleReader<R> {
    /// Wrap `inner`, keeping at most `capacity` lookups. A capacity of zero
    /// disables caching.
    pub fn new(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached lookup.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<R> PriceRuleReader for CachedPriceRuleReader<R>
where
    R: PriceRuleReader,
{
    fn find_applicable_price_rules(&self, query: &PriceQuery) -> RepositoryResult<Vec<PriceRule>> {
        if self.capacity == 0 {
            return self.inner.find_applicable_price_rules(query);
        }

        if let Some(cached) = self.entries.get(query) {
            log::trace!(
                "Price cache hit for brand {} product {} at {}",
                query.brand_id,
                query.product_id,
                query.instant
            );
            return Ok(cached.value().clone());
        }

        let rules = self.inner.find_applicable_price_rules(query)?;

        if self.entries.len() >= self.capacity {
            log::debug!("Price cache reached {} entries, clearing", self.capacity);
            self.entries.clear();
        }
        self.entries.insert(*query, rules.clone());

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::RepositoryError;
    use rust_decimal_macros::dec;

    use crate::repository::mock::MockPriceRuleReader;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, 14)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid datetime")
    }

    fn sample_rule() -> PriceRule {
        PriceRule {
            id: 1,
            brand_id: 1,
            product_id: 35455,
            price_list_id: 1,
            start_date: at(0),
            end_date: at(23),
            priority: 0,
            price: dec!(35.50),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn repeated_lookup_hits_store_once() {
        let mut inner = MockPriceRuleReader::new();
        inner
            .expect_find_applicable_price_rules()
            .times(1)
            .returning(|_| Ok(vec![sample_rule()]));
        let cache = CachedPriceRuleReader::new(inner, 8);
        let query = PriceQuery::new(1, 35455, at(10));

        let first = cache.find_applicable_price_rules(&query).expect("lookup");
        let second = cache.find_applicable_price_rules(&query).expect("lookup");

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_instants_are_cached_separately() {
        let mut inner = MockPriceRuleReader::new();
        inner
            .expect_find_applicable_price_rules()
            .times(2)
            .returning(|_| Ok(vec![sample_rule()]));
        let cache = CachedPriceRuleReader::new(inner, 8);

        cache
            .find_applicable_price_rules(&PriceQuery::new(1, 35455, at(10)))
            .expect("lookup");
        cache
            .find_applicable_price_rules(&PriceQuery::new(1, 35455, at(11)))
            .expect("lookup");

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_always_delegates() {
        let mut inner = MockPriceRuleReader::new();
        inner
            .expect_find_applicable_price_rules()
            .times(3)
            .returning(|_| Ok(Vec::new()));
        let cache = CachedPriceRuleReader::new(inner, 0);
        let query = PriceQuery::new(1, 35455, at(10));

        for _ in 0..3 {
            cache.find_applicable_price_rules(&query).expect("lookup");
        }

        assert!(cache.is_empty());
    }

    #[test]
    fn store_errors_are_not_cached() {
        let mut inner = MockPriceRuleReader::new();
        inner
            .expect_find_applicable_price_rules()
            .times(2)
            .returning(|_| Err(RepositoryError::NotFound));
        let cache = CachedPriceRuleReader::new(inner, 8);
        let query = PriceQuery::new(1, 35455, at(10));

        assert!(cache.find_applicable_price_rules(&query).is_err());
        assert!(cache.find_applicable_price_rules(&query).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_is_cleared_before_insert() {
        let mut inner = MockPriceRuleReader::new();
        inner
            .expect_find_applicable_price_rules()
            .returning(|_| Ok(Vec::new()));
        let cache = CachedPriceRuleReader::new(inner, 2);

        for hour in 1..=3 {
            cache
                .find_applicable_price_rules(&PriceQuery::new(1, 35455, at(hour)))
                .expect("lookup");
        }

        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
