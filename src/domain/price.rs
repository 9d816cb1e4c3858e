use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Domain representation of a time-bounded price rule for a brand and product.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRule {
    /// Unique identifier of the price rule record.
    pub id: i32,
    /// Identifier of the brand selling the product.
    pub brand_id: i64,
    /// Identifier of the product the rule prices.
    pub product_id: i64,
    /// Identifier of the price list (tariff) the rule belongs to.
    pub price_list_id: i64,
    /// First instant the rule applies, inclusive.
    pub start_date: NaiveDateTime,
    /// Last instant the rule applies, inclusive.
    pub end_date: NaiveDateTime,
    /// Precedence among overlapping rules; higher wins.
    pub priority: i32,
    /// Final price amount.
    pub price: Decimal,
    /// ISO 4217 currency code associated with the price.
    pub currency: String,
}

impl PriceRule {
    /// Whether `instant` falls inside the closed validity interval.
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }

    /// Whether the rule is a candidate for `query`.
    pub fn matches(&self, query: &PriceQuery) -> bool {
        self.brand_id == query.brand_id
            && self.product_id == query.product_id
            && self.covers(query.instant)
    }

    /// Whether the rule satisfies the data invariants of a resolvable price:
    /// a non-empty interval and a non-negative amount.
    pub fn is_well_formed(&self) -> bool {
        self.start_date < self.end_date && self.price >= Decimal::ZERO
    }
}

/// Validated lookup for the price of a product at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceQuery {
    /// Identifier of the brand selling the product.
    pub brand_id: i64,
    /// Identifier of the product to price.
    pub product_id: i64,
    /// Instant the price must be valid at.
    pub instant: NaiveDateTime,
}

impl PriceQuery {
    /// Construct a query for `product_id` of `brand_id` at `instant`.
    pub fn new(brand_id: i64, product_id: i64, instant: NaiveDateTime) -> Self {
        Self {
            brand_id,
            product_id,
            instant,
        }
    }
}

/// Invariant violations detected while building a [`ResolvedPrice`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceIntegrityError {
    #[error("price {0} is negative")]
    NegativePrice(Decimal),
    #[error("start date {start} is not before end date {end}")]
    InvalidDateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Price selected for a product, as returned to API clients.
///
/// Instances can only be built through [`ResolvedPrice::new`], which rejects
/// negative prices and empty or inverted validity intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    product_id: i64,
    brand_id: i64,
    price_list_id: i64,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    price: Decimal,
    currency: String,
}

impl ResolvedPrice {
    pub fn new(
        product_id: i64,
        brand_id: i64,
        price_list_id: i64,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        price: Decimal,
        currency: impl Into<String>,
    ) -> Result<Self, PriceIntegrityError> {
        if start_date >= end_date {
            return Err(PriceIntegrityError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        if price < Decimal::ZERO {
            return Err(PriceIntegrityError::NegativePrice(price));
        }

        Ok(Self {
            product_id,
            brand_id,
            price_list_id,
            start_date,
            end_date,
            price,
            currency: currency.into(),
        })
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn brand_id(&self) -> i64 {
        self.brand_id
    }

    pub fn price_list_id(&self) -> i64 {
        self.price_list_id
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDateTime {
        self.end_date
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl TryFrom<&PriceRule> for ResolvedPrice {
    type Error = PriceIntegrityError;

    fn try_from(rule: &PriceRule) -> Result<Self, Self::Error> {
        Self::new(
            rule.product_id,
            rule.brand_id,
            rule.price_list_id,
            rule.start_date,
            rule.end_date,
            rule.price,
            rule.currency.as_str(),
        )
    }
}
