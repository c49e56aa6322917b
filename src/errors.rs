use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::external::price_provider::PriceProviderError;
use crate::models::CatalogError;
use crate::services::signal_service::SignalError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
    #[error("Rate limited by external provider")]
    RateLimited,
    #[error("External error: {0}")]
    External(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::External(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// The single message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::InsufficientData(msg)
            | AppError::DataUnavailable(msg)
            | AppError::External(msg) => msg.clone(),
            AppError::RateLimited => "Market data provider is busy, try again shortly.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.user_message() }));

        match self {
            AppError::RateLimited => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (status, headers, body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::NotFound(name) => AppError::NotFound(format!("Unknown company: {}", name)),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<SignalError> for AppError {
    fn from(value: SignalError) -> Self {
        match value {
            SignalError::InvalidWindow => AppError::Validation("Window must be at least 1.".to_string()),
            SignalError::InsufficientData { required, available } => AppError::InsufficientData(format!(
                "Not enough price history: need {} trading days, got {}.",
                required, available
            )),
            SignalError::InvalidPrice { .. } | SignalError::DivisionByZero(_) => {
                AppError::DataUnavailable(format!("Unable to fetch stock data ({}).", value))
            }
        }
    }
}

impl From<PriceProviderError> for AppError {
    fn from(value: PriceProviderError) -> Self {
        match value {
            PriceProviderError::RateLimited => AppError::RateLimited,
            PriceProviderError::NotFound => AppError::DataUnavailable("Unable to fetch stock data.".to_string()),
            other => AppError::External(other.to_string()),
        }
    }
}
