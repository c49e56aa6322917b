use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::PricePoint;

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalPricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("symbol not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited,
}

impl From<reqwest::Error> for PriceProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PriceProviderError::Timeout
        } else if e.is_decode() {
            PriceProviderError::Parse(e.to_string())
        } else {
            PriceProviderError::Network(e.to_string())
        }
    }
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Daily closes covering roughly the last `days` calendar days.
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError>;
}

/// Turns provider rows into the series the calculator expects: ascending by
/// date with one close per date (the last row for a date wins).
///
/// Close values are passed through untouched so that bad data is rejected
/// by the calculator rather than silently dropped here.
pub fn normalize_series(mut points: Vec<ExternalPricePoint>) -> Vec<PricePoint> {
    // Stable sort keeps provider order among rows sharing a date.
    points.sort_by_key(|p| p.date);

    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for p in points {
        match out.last_mut() {
            Some(last) if last.date == p.date => last.close = p.close,
            _ => out.push(PricePoint::new(p.date, p.close)),
        }
    }
    out
}
