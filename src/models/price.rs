use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::price::PriceRule as DomainPriceRule;

/// Number of decimal places stored in `price_cents`.
const PRICE_SCALE: u32 = 2;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::prices)]
pub struct Price {
    pub id: i32,
    pub brand_id: i64,
    pub product_id: i64,
    pub price_list_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub priority: i32,
    pub price_cents: i64,
    pub currency: String,
}

impl From<Price> for DomainPriceRule {
    fn from(value: Price) -> Self {
        Self {
            id: value.id,
            brand_id: value.brand_id,
            product_id: value.product_id,
            price_list_id: value.price_list_id,
            start_date: value.start_date,
            end_date: value.end_date,
            priority: value.priority,
            price: Decimal::new(value.price_cents, PRICE_SCALE),
            currency: value.currency,
        }
    }
}
