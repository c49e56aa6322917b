use serde::{Deserialize, Serialize};

use crate::models::{CatalogEntry, ChartPoint, Classification, SignalResult};

pub const DISCLAIMER: &str = "Educational tool only. Not financial advice.";

/// How the dashboard should render a classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalTone {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warning")]
    Warning,
}

/// Display label and tone for a classification.
pub fn signal_display(classification: Classification) -> (&'static str, SignalTone) {
    match classification {
        Classification::Buy => ("BUY SIGNAL: Positive Momentum Detected", SignalTone::Success),
        Classification::Sell => ("SELL SIGNAL: Downward Trend Detected", SignalTone::Error),
        Classification::Hold => ("HOLD: Market Consolidation Phase", SignalTone::Warning),
    }
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Response body of `GET /api/analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub company: String,
    pub symbol: String,
    pub window: usize,
    pub current_price: f64,
    pub moving_average: f64,
    pub change_percent: f64,
    pub signal: Classification,
    pub label: String,
    pub tone: SignalTone,
    pub disclaimer: String,
    pub chart: Vec<ChartPoint>,
}

impl AnalysisResponse {
    pub fn build(
        company: &str,
        symbol: &str,
        window: usize,
        result: &SignalResult,
        chart: Vec<ChartPoint>,
    ) -> Self {
        let (label, tone) = signal_display(result.classification);

        Self {
            company: company.to_string(),
            symbol: symbol.to_string(),
            window,
            current_price: round2(result.current_price),
            moving_average: round2(result.moving_average),
            change_percent: round2(result.change_percent),
            signal: result.classification,
            label: label.to_string(),
            tone,
            disclaimer: DISCLAIMER.to_string(),
            chart,
        }
    }
}

/// One row of `GET /api/stocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockListItem {
    pub display_name: String,
    pub symbol: String,
}

impl From<&CatalogEntry> for StockListItem {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            display_name: entry.display_name.clone(),
            symbol: entry.symbol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.456), 10.46);
        assert_eq!(round2(-3.333), -3.33);
        assert_eq!(round2(20.0), 20.0);
    }

    #[test]
    fn test_build_rounds_only_display_values() {
        let result = SignalResult {
            current_price: 2845.6789,
            moving_average: 2801.12345,
            change_percent: 1.98765,
            classification: Classification::Buy,
        };

        let response = AnalysisResponse::build("Reliance Industries", "RELIANCE.NS", 20, &result, Vec::new());

        assert_eq!(response.current_price, 2845.68);
        assert_eq!(response.moving_average, 2801.12);
        assert_eq!(response.change_percent, 1.99);
        assert_eq!(response.signal, Classification::Buy);
        assert_eq!(response.tone, SignalTone::Success);
        assert!(response.label.starts_with("BUY"));
        // The calculator result itself is untouched.
        assert_eq!(result.current_price, 2845.6789);
    }

    #[test]
    fn test_signal_display_mapping() {
        assert_eq!(signal_display(Classification::Sell).1, SignalTone::Error);
        assert_eq!(signal_display(Classification::Hold).0, "HOLD: Market Consolidation Phase");
    }
}
