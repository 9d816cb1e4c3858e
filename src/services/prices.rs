use crate::domain::price::{PriceQuery, ResolvedPrice};
use crate::domain::resolver;
use crate::repository::PriceRuleReader;
use crate::services::{ServiceError, ServiceResult};

/// Resolves the price that applies to `query`.
///
/// Fetches the candidate rules from the store, picks the winner and converts
/// it into a [`ResolvedPrice`]. Returns [`ServiceError::NotFound`] when no rule
/// applies. Malformed rules never win, so [`ServiceError::DataIntegrity`] is
/// only returned if the winner still fails the [`ResolvedPrice`] invariants.
pub fn get_applicable_price<R>(repo: &R, query: &PriceQuery) -> ServiceResult<ResolvedPrice>
where
    R: PriceRuleReader + ?Sized,
{
    let candidates = repo
        .find_applicable_price_rules(query)
        .map_err(ServiceError::from)?;

    log::debug!(
        "Found {} candidate price rule(s) for brand {} product {} at {}",
        candidates.len(),
        query.brand_id,
        query.product_id,
        query.instant
    );

    let malformed = candidates
        .iter()
        .filter(|rule| !rule.is_well_formed())
        .count();
    if malformed > 0 {
        log::warn!(
            "Ignoring {malformed} malformed price rule(s) for brand {} product {}",
            query.brand_id,
            query.product_id
        );
    }

    let Some(winner) = resolver::resolve(query, &candidates) else {
        log::info!(
            "No applicable price for brand {} product {} at {}",
            query.brand_id,
            query.product_id,
            query.instant
        );
        return Err(ServiceError::NotFound);
    };

    ResolvedPrice::try_from(winner).map_err(|err| {
        log::error!(
            "Price rule {} (price list {}) for brand {} product {} is corrupt: {err}",
            winner.id,
            winner.price_list_id,
            query.brand_id,
            query.product_id
        );
        ServiceError::DataIntegrity(err)
    })
}
