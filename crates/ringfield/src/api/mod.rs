pub mod config;
pub mod error;
pub mod field;
pub mod host;
