use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::prices::PriceQueryForm;
use crate::repository::PriceStore;
use crate::services::{ServiceError, prices as price_service};

/// JSON body returned for every failed API request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Random identifier to correlate the response with server logs.
    pub error_id: Uuid,
    /// Server local time the error was produced.
    pub timestamp: NaiveDateTime,
    /// HTTP status code.
    pub status: u16,
    /// Short error title.
    pub error: String,
    /// Human readable description.
    pub message: String,
    /// Request path that failed.
    pub path: String,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: &str, path: &str) -> Self {
        Self {
            error_id: Uuid::new_v4(),
            timestamp: chrono::Local::now().naive_local(),
            status: status.as_u16(),
            error: error.to_string(),
            message: message.to_string(),
            path: path.to_string(),
        }
    }
}

fn error_response(status: StatusCode, error: &str, message: &str, path: &str) -> HttpResponse {
    let body = ApiErrorResponse::new(status, error, message, path);
    HttpResponse::build(status).json(body)
}

/// Query extractor configuration turning malformed parameters into JSON `400`s.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("Invalid price query parameters: {err}");
        let response = error_response(
            StatusCode::BAD_REQUEST,
            "Invalid Parameter",
            "Invalid parameter format",
            req.path(),
        );
        InternalError::from_response(err, response).into()
    })
}

#[get("/api/v1/prices")]
/// Return the price that applies to a product of a brand at a given date.
///
/// Responds with `400` for invalid parameters, `404` when no price applies and
/// `500` when the stored price data is corrupt or the store is unavailable.
pub async fn api_v1_prices(
    req: HttpRequest,
    params: web::Query<PriceQueryForm>,
    repo: web::Data<PriceStore>,
) -> impl Responder {
    let query = match params.into_inner().into_price_query() {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected price query: {err}");
            return error_response(
                StatusCode::BAD_REQUEST,
                "Validation Error",
                &err.to_string(),
                req.path(),
            );
        }
    };

    log::info!(
        "Requesting price for brand {} product {} at {}",
        query.brand_id,
        query.product_id,
        query.instant
    );

    match price_service::get_applicable_price(repo.get_ref(), &query) {
        Ok(price) => HttpResponse::Ok().json(price),
        Err(ServiceError::NotFound) => error_response(
            StatusCode::NOT_FOUND,
            "Not Found",
            "Requested price information not found",
            req.path(),
        ),
        Err(ServiceError::DataIntegrity(err)) => {
            log::error!("Price data integrity failure: {err}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Data Integrity Error",
                "Stored price data is inconsistent",
                req.path(),
            )
        }
        Err(err) => {
            log::error!("Failed to resolve price: {err}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Error",
                "An unexpected error occurred",
                req.path(),
            )
        }
    }
}

#[get("/health")]
/// Liveness check.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
