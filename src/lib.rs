//! Backend for the SmartTradeNet dashboard: a fixed catalog of NSE listings,
//! daily history from a market-data provider and a 20-day moving-average
//! trend signal.

pub mod app;
pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
