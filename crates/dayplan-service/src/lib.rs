pub mod calendar;
pub mod error;
pub mod schedule;
pub mod sync;
pub mod user;
