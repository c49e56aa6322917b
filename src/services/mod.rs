pub mod analysis_service;
pub mod indicators;
pub mod signal_service;
