use thiserror::Error;

use crate::models::{ChartPoint, Classification, PricePoint, SignalResult};
use crate::services::indicators;

/// Lookback used by the dashboard for both the moving average and the change baseline.
pub const DEFAULT_WINDOW: usize = 20;

#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("window must be at least 1")]
    InvalidWindow,

    #[error("insufficient data: need {required} closes, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid close {close} on {date}")]
    InvalidPrice { date: chrono::NaiveDate, close: f64 },

    #[error("reference close on {0} is zero")]
    DivisionByZero(chrono::NaiveDate),
}

/// Trend signal over the last `window` closes of an ascending daily series.
///
/// - `moving_average` is the simple mean of the last `window` closes,
///   today included.
/// - `change_percent` is measured against `prices[n - window]`, which is
///   the first close inside that same window rather than a point before it.
/// - classification compares the latest close to the average exactly.
pub fn compute_signal(prices: &[PricePoint], window: usize) -> Result<SignalResult, SignalError> {
    if window == 0 {
        return Err(SignalError::InvalidWindow);
    }

    let n = prices.len();
    if n == 0 || n < window {
        return Err(SignalError::InsufficientData {
            required: window,
            available: n,
        });
    }

    let reference = &prices[n - window];
    if reference.close == 0.0 {
        return Err(SignalError::DivisionByZero(reference.date));
    }

    validate_closes(prices)?;

    let current_price = prices[n - 1].close;
    let moving_average = prices[n - window..]
        .iter()
        .map(|p| p.close)
        .sum::<f64>()
        / window as f64;

    let reference_price = reference.close;
    let change_percent = (current_price - reference_price) / reference_price * 100.0;

    Ok(SignalResult {
        current_price,
        moving_average,
        change_percent,
        classification: Classification::from_prices(current_price, moving_average),
    })
}

/// Close and moving-average series for the price chart, aligned with `prices`.
pub fn chart_series(prices: &[PricePoint], window: usize) -> Vec<ChartPoint> {
    let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
    let averages = indicators::sma(&closes, window);

    prices
        .iter()
        .zip(averages)
        .map(|(p, moving_average)| ChartPoint {
            date: p.date,
            close: p.close,
            moving_average,
        })
        .collect()
}

fn validate_closes(prices: &[PricePoint]) -> Result<(), SignalError> {
    match prices.iter().find(|p| !p.close.is_finite() || p.close <= 0.0) {
        Some(bad) => Err(SignalError::InvalidPrice {
            date: bad.date,
            close: bad.close,
        }),
        None => Ok(()),
    }
}
