// Indicator computation over bar tables
pub mod market_data;
