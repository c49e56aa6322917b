use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};

/// Offline provider producing a random walk of weekday closes.
///
/// The walk is seeded from the symbol, so a symbol always yields the same
/// shape for a given end date.
pub struct MockProvider {
    end_date: Option<NaiveDate>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self { end_date: None }
    }

    /// Pins the last generated day instead of using today.
    pub fn ending_on(end_date: NaiveDate) -> Self {
        Self { end_date: Some(end_date) }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_for(symbol: &str) -> u64 {
    // FNV-1a
    symbol
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ b as u64).wrapping_mul(0x0100_0000_01b3))
}

#[async_trait]
impl PriceProvider for MockProvider {
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let end = self.end_date.unwrap_or_else(|| Utc::now().date_naive());
        let start = end - Duration::days(days as i64);

        let mut rng = StdRng::seed_from_u64(seed_for(symbol));
        let mut current = rng.random_range(100.0..3000.0_f64);

        let mut points = Vec::new();
        let mut date = start;
        while date <= end {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                current *= 1.0 + (rng.random::<f64>() - 0.5) * 0.04;
                points.push(ExternalPricePoint { date, close: current });
            }
            date += Duration::days(1);
        }

        Ok(points)
    }
}
