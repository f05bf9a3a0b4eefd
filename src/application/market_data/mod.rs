// Multi-resolution partitioning
pub mod aggregator;

// Full indicator battery over a single-resolution table
pub mod pipeline;

// Trailing-window statistics
pub mod rolling;

// Recursive exponential filters
pub mod smoothing;

// Per-indicator formulas
pub mod technical_indicators;
