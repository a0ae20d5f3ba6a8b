pub mod config;
pub mod convert;
pub mod days;
pub mod error;
pub mod types;
