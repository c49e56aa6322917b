use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discrete trend call derived from the latest close versus its moving average.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Latest close above the moving average
    #[serde(rename = "BUY")]
    Buy,

    /// Latest close below the moving average
    #[serde(rename = "SELL")]
    Sell,

    /// Latest close exactly on the moving average
    #[serde(rename = "HOLD")]
    Hold,
}

impl Classification {
    /// Exact comparison, no tolerance band.
    pub fn from_prices(current_price: f64, moving_average: f64) -> Self {
        if current_price > moving_average {
            Classification::Buy
        } else if current_price < moving_average {
            Classification::Sell
        } else {
            Classification::Hold
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Buy => write!(f, "BUY"),
            Classification::Sell => write!(f, "SELL"),
            Classification::Hold => write!(f, "HOLD"),
        }
    }
}

/// Output of one trend calculation. Values are full precision; rounding is
/// left to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub current_price: f64,
    pub moving_average: f64,
    pub change_percent: f64,
    pub classification: Classification,
}

/// One point of the price chart: the close and, once enough history
/// exists, the moving average ending on that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub moving_average: Option<f64>,
}
