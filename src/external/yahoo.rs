use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart API. No API key required and it covers NSE
/// listings (`*.NS`).
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Result<Self, PriceProviderError> {
        Self::with_base_url(CHART_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, PriceProviderError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; SmartTradeNet/0.1)")
            .timeout(timeout)
            .build()
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    // Absent when the range holds no trading days.
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Maps a day count onto the ranges the chart API accepts.
pub fn range_for_days(days: u32) -> &'static str {
    match days {
        0..=5 => "5d",
        6..=30 => "1mo",
        31..=90 => "3mo",
        91..=180 => "6mo",
        181..=365 => "1y",
        366..=730 => "2y",
        _ => "5y",
    }
}

/// Flattens a chart response into (date, close) rows, skipping days the API
/// reports without a close (holidays, halted sessions).
pub(crate) fn parse_chart_body(body: &str) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
    let body: YahooChartResponse =
        serde_json::from_str(body).map_err(|e| PriceProviderError::Parse(e.to_string()))?;

    if let Some(error) = body.chart.error {
        if error.description.contains("No data found") {
            return Err(PriceProviderError::NotFound);
        }
        return Err(PriceProviderError::BadResponse(error.description));
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| r.pop())
        .ok_or_else(|| PriceProviderError::BadResponse("missing result".into()))?;

    let closes = &result
        .indicators
        .quote
        .first()
        .ok_or_else(|| PriceProviderError::BadResponse("missing quote".into()))?
        .close;

    if result.timestamp.len() != closes.len() {
        return Err(PriceProviderError::Parse(
            "timestamp and close arrays have different lengths".into(),
        ));
    }

    result
        .timestamp
        .iter()
        .zip(closes.iter())
        .filter_map(|(ts, close)| close.map(|c| (*ts, c)))
        .map(|(ts, close)| {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| PriceProviderError::Parse(format!("bad timestamp {ts}")))?;
            Ok(ExternalPricePoint { date, close })
        })
        .collect()
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let url = format!("{}/{}", self.base_url, symbol);
        let range = range_for_days(days);
        debug!("Fetching {} daily history for {} from Yahoo", range, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", range)])
            .send()
            .await?;

        match resp.status() {
            reqwest::StatusCode::TOO_MANY_REQUESTS => return Err(PriceProviderError::RateLimited),
            reqwest::StatusCode::NOT_FOUND => return Err(PriceProviderError::NotFound),
            s if !s.is_success() => {
                return Err(PriceProviderError::BadResponse(format!("HTTP {}", s)));
            }
            _ => {}
        }

        let body = resp.text().await?;
        parse_chart_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_range_for_days() {
        assert_eq!(range_for_days(5), "5d");
        assert_eq!(range_for_days(30), "1mo");
        assert_eq!(range_for_days(180), "6mo");
        assert_eq!(range_for_days(181), "1y");
        assert_eq!(range_for_days(5000), "5y");
    }

    #[test]
    fn test_parse_skips_null_closes() {
        // 2025-01-02, 2025-01-03, 2025-01-06 at 03:45 UTC (NSE open)
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "TCS.NS"},
                    "timestamp": [1735789500, 1735875900, 1736135100],
                    "indicators": {"quote": [{"close": [4100.5, null, 4152.25]}]}
                }],
                "error": null
            }
        }"#;

        let points = parse_chart_body(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(points[1].close, 4152.25);
    }

    #[test]
    fn test_parse_no_data_is_not_found() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        assert!(matches!(parse_chart_body(body), Err(PriceProviderError::NotFound)));
    }

    #[test]
    fn test_parse_missing_result() {
        let body = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(matches!(parse_chart_body(body), Err(PriceProviderError::BadResponse(_))));
    }

    #[test]
    fn test_parse_mismatched_lengths() {
        let body = r#"{"chart": {"result": [{"timestamp": [1735789500], "indicators": {"quote": [{"close": []}]}}], "error": null}}"#;
        assert!(matches!(parse_chart_body(body), Err(PriceProviderError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_range() {
        let body = r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#;
        assert!(parse_chart_body(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_chart_body("<html>"), Err(PriceProviderError::Parse(_))));
    }
}
