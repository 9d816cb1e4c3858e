//! Selection of the single price rule that applies to a query.
//!
//! The store may pre-filter and pre-sort candidates, but the ordering defined
//! here is the one that decides the winner.

use std::cmp::Ordering;

use crate::domain::price::{PriceQuery, PriceRule};

/// Orders two rules by precedence; `Ordering::Greater` means `a` wins over `b`.
///
/// Higher priority wins, then the higher price. Remaining ties go to the lower
/// price list id and finally the lower record id, so the order is total.
pub fn compare_precedence(a: &PriceRule, b: &PriceRule) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.price.cmp(&b.price))
        .then_with(|| b.price_list_id.cmp(&a.price_list_id))
        .then_with(|| b.id.cmp(&a.id))
}

/// Picks the applicable rule for `query` out of `candidates`.
///
/// Rules for another brand or product, rules whose closed interval does not
/// contain the instant, and malformed rules are ignored. Returns `None` when
/// nothing applies.
pub fn resolve<'a>(query: &PriceQuery, candidates: &'a [PriceRule]) -> Option<&'a PriceRule> {
    candidates
        .iter()
        .filter(|rule| rule.matches(query) && rule.is_well_formed())
        .max_by(|a, b| compare_precedence(a, b))
}
