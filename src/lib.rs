//! Technical-indicator engine over OHLCV bar tables.
//!
//! Takes an ordered table of bars, computes a fixed battery of derived
//! indicator columns (moving averages, RSI, MACD, historical volatility,
//! Bollinger bands, ATR, OBV, VWAP, divergence) and returns an augmented
//! copy; the input is never mutated. Tables mixing several sampling
//! resolutions are partitioned by their resolution tag and processed per
//! partition so no rolling or recursive state crosses a boundary.

pub mod application;
pub mod domain;

pub use application::market_data::aggregator::apply_by_resolution;
pub use application::market_data::pipeline::apply_technical_indicators;
pub use domain::errors::IndicatorError;
pub use domain::market::bar::Bar;
pub use domain::market::resolution::Resolution;
pub use domain::market::table::{BarTable, Column};
