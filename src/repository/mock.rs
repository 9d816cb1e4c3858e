use mockall::mock;

use super::PriceRuleReader;
use crate::domain::price::{PriceQuery, PriceRule};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub PriceRuleReader {}

    impl PriceRuleReader for PriceRuleReader {
        fn find_applicable_price_rules(&self, query: &PriceQuery) -> RepositoryResult<Vec<PriceRule>>;
    }
}
