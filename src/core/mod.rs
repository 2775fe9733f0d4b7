//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod log;
pub mod rates;
pub mod series;

// Re-export main types for cleaner imports
pub use rates::{Conversion, LatestRates, LiveRateProvider};
pub use series::{HistoricalRateProvider, RatePoint, RateSeries, SeriesStats};
