use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::price::PriceQuery;

/// Result type returned by the price query form helpers.
pub type PriceQueryFormResult<T> = Result<T, PriceQueryFormError>;

/// Errors that can occur while validating a price query.
#[derive(Debug, Error)]
pub enum PriceQueryFormError {
    /// Validation failures from the `validator` crate.
    #[error("{}", validation_messages(.0))]
    Validation(#[from] ValidationErrors),
    /// A required parameter was not supplied.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
    /// The application date is not an ISO-8601 local date-time.
    #[error("invalid application date `{0}`, expected yyyy-MM-ddTHH:mm:ss")]
    InvalidApplicationDate(String),
}

/// Query string accepted by the price lookup endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PriceQueryForm {
    /// Brand identifier, must be non-negative.
    #[validate(range(min = 0, message = "brandId must be greater than or equal to 0"))]
    pub brand_id: Option<i64>,
    /// Product identifier, must be non-negative.
    #[validate(range(min = 0, message = "productId must be greater than or equal to 0"))]
    pub product_id: Option<i64>,
    /// Instant to price, for example `2020-06-14T10:00:00`.
    pub application_date: Option<String>,
}

impl PriceQueryForm {
    /// Validates the parameters and converts them into a domain [`PriceQuery`].
    pub fn into_price_query(self) -> PriceQueryFormResult<PriceQuery> {
        self.validate()?;

        let brand_id = self
            .brand_id
            .ok_or(PriceQueryFormError::MissingParameter("brandId"))?;
        let product_id = self
            .product_id
            .ok_or(PriceQueryFormError::MissingParameter("productId"))?;
        let raw_date = self
            .application_date
            .ok_or(PriceQueryFormError::MissingParameter("applicationDate"))?;

        let instant = parse_application_date(&raw_date)?;

        Ok(PriceQuery::new(brand_id, product_id, instant))
    }
}

/// Joins the configured messages of every failed rule, sorted for stable output.
fn validation_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

fn parse_application_date(input: &str) -> PriceQueryFormResult<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PriceQueryFormError::MissingParameter("applicationDate"));
    }

    trimmed
        .parse::<NaiveDateTime>()
        .map_err(|_| PriceQueryFormError::InvalidApplicationDate(trimmed.to_string()))
}
