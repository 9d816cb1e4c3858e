use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::{
    domain::price::{PriceQuery, PriceRule as DomainPriceRule},
    models::price::Price as DbPrice,
    repository::{DieselRepository, PriceRuleReader},
};

impl PriceRuleReader for DieselRepository {
    fn find_applicable_price_rules(
        &self,
        query: &PriceQuery,
    ) -> RepositoryResult<Vec<DomainPriceRule>> {
        use crate::schema::prices;

        let mut conn = self.conn()?;

        // Same precedence as `resolver::compare_precedence`, best rule first.
        let rows = prices::table
            .filter(prices::brand_id.eq(query.brand_id))
            .filter(prices::product_id.eq(query.product_id))
            .filter(prices::start_date.le(query.instant))
            .filter(prices::end_date.ge(query.instant))
            .order((
                prices::priority.desc(),
                prices::price_cents.desc(),
                prices::price_list_id.asc(),
                prices::id.asc(),
            ))
            .load::<DbPrice>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
