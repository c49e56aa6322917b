use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::AnalysisConfig;
use crate::errors::AppError;
use crate::external::price_provider::{normalize_series, PriceProvider, PriceProviderError};
use crate::models::{AnalysisResponse, Catalog, PricePoint};
use crate::services::signal_service;

/// Fetches and normalizes the daily series for `symbol`, retrying when the
/// provider rate-limits us.
pub async fn fetch_history(
    provider: &dyn PriceProvider,
    symbol: &str,
    config: &AnalysisConfig,
) -> Result<Vec<PricePoint>, AppError> {
    let mut attempt = 0;

    loop {
        match provider.fetch_daily_history(symbol, config.history_days).await {
            Ok(points) => {
                let series = normalize_series(points);
                info!("Fetched {} daily closes for {}", series.len(), symbol);
                return Ok(series);
            }
            Err(PriceProviderError::RateLimited) if attempt < config.max_retries => {
                attempt += 1;
                let delay = config.retry_backoff * attempt;
                warn!(
                    "Rate limited for {}, retrying in {}ms (attempt {}/{})",
                    symbol,
                    delay.as_millis(),
                    attempt,
                    config.max_retries
                );
                sleep(delay).await;
            }
            Err(e) => {
                error!("Failed to fetch price data for {}: {}", symbol, e);
                return Err(e.into());
            }
        }
    }
}

/// Runs one dashboard analysis: resolve the company, pull its history and
/// compute the trend signal plus chart series.
pub async fn analyze(
    catalog: &Catalog,
    provider: &dyn PriceProvider,
    config: &AnalysisConfig,
    company: &str,
    window: usize,
) -> Result<AnalysisResponse, AppError> {
    let symbol = catalog.lookup(company).map_err(|e| {
        warn!("Analysis requested for unknown company {:?}", company);
        AppError::from(e)
    })?;

    let prices = fetch_history(provider, symbol, config).await?;

    if prices.is_empty() {
        error!("Provider returned no data for {}", symbol);
        return Err(AppError::DataUnavailable("Unable to fetch stock data.".to_string()));
    }

    let result = signal_service::compute_signal(&prices, window).map_err(|e| {
        warn!("Signal calculation failed for {}: {}", symbol, e);
        AppError::from(e)
    })?;
    let chart = signal_service::chart_series(&prices, window);

    info!(
        "{} ({}): price={:.2} ma{}={:.2} change={:.2}% -> {}",
        company,
        symbol,
        result.current_price,
        window,
        result.moving_average,
        result.change_percent,
        result.classification
    );

    Ok(AnalysisResponse::build(company, symbol, window, &result, chart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::price_provider::ExternalPricePoint;
    use crate::models::Classification;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Replays a fixed series, optionally rate-limiting the first calls.
    struct StubProvider {
        closes: Vec<f64>,
        rate_limited_calls: u32,
        calls: AtomicU32,
    }

    impl StubProvider {
        fn new(closes: Vec<f64>) -> Self {
            Self { closes, rate_limited_calls: 0, calls: AtomicU32::new(0) }
        }
    }

    #[async_trait]
    impl PriceProvider for StubProvider {
        async fn fetch_daily_history(
            &self,
            _symbol: &str,
            _days: u32,
        ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.rate_limited_calls {
                return Err(PriceProviderError::RateLimited);
            }
            let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            // Newest first, the way some providers return rows.
            Ok(self
                .closes
                .iter()
                .enumerate()
                .rev()
                .map(|(i, &close)| ExternalPricePoint {
                    date: start + ChronoDuration::days(i as i64),
                    close,
                })
                .collect())
        }
    }

    fn fast_config() -> AnalysisConfig {
        AnalysisConfig {
            retry_backoff: Duration::from_millis(1),
            ..AnalysisConfig::default()
        }
    }

    #[tokio::test]
    async fn test_analyze_buy() {
        let mut closes = vec![10.0; 19];
        closes.push(20.0);
        let provider = StubProvider::new(closes);
        let catalog = Catalog::nse_default();

        let response = analyze(&catalog, &provider, &fast_config(), "TCS", 20).await.unwrap();

        assert_eq!(response.symbol, "TCS.NS");
        assert_eq!(response.moving_average, 10.5);
        assert_eq!(response.current_price, 20.0);
        assert_eq!(response.signal, Classification::Buy);
        assert_eq!(response.chart.len(), 20);
        assert_eq!(response.chart[19].moving_average, Some(10.5));
    }

    #[tokio::test]
    async fn test_analyze_unknown_company() {
        let provider = StubProvider::new(vec![10.0; 30]);
        let catalog = Catalog::nse_default();

        let err = analyze(&catalog, &provider, &fast_config(), "Nope Ltd", 20).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_empty_series_is_unavailable() {
        let provider = StubProvider::new(Vec::new());
        let catalog = Catalog::nse_default();

        let err = analyze(&catalog, &provider, &fast_config(), "ITC", 20).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_analyze_short_history() {
        let provider = StubProvider::new(vec![10.0; 12]);
        let catalog = Catalog::nse_default();

        let err = analyze(&catalog, &provider, &fast_config(), "ITC", 20).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }

    #[tokio::test]
    async fn test_fetch_retries_rate_limits() {
        let mut provider = StubProvider::new(vec![5.0; 25]);
        provider.rate_limited_calls = 2;

        let series = fetch_history(&provider, "SBIN.NS", &fast_config()).await.unwrap();
        assert_eq!(series.len(), 25);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_gives_up_after_max_retries() {
        let mut provider = StubProvider::new(vec![5.0; 25]);
        provider.rate_limited_calls = 10;
        let config = AnalysisConfig { max_retries: 2, ..fast_config() };

        let err = fetch_history(&provider, "SBIN.NS", &config).await.unwrap_err();
        assert!(matches!(err, AppError::RateLimited));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }
}
