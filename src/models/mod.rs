mod analysis;
mod catalog;
mod price_point;
mod signal;

pub use analysis::{round2, signal_display, AnalysisResponse, SignalTone, StockListItem, DISCLAIMER};
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use price_point::PricePoint;
pub use signal::{ChartPoint, Classification, SignalResult};
