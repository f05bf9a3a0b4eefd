// Market data domain
pub mod market;

// Domain-specific error types
pub mod errors;
