// Market data domain
pub mod bar;
pub mod fields;
pub mod resolution;
pub mod table;
