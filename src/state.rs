use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::external::price_provider::PriceProvider;
use crate::models::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub price_provider: Arc<dyn PriceProvider>,
    pub analysis: Arc<AnalysisConfig>,
}
