pub mod alert;
pub mod category;
pub mod event;
pub mod participant;
pub mod routine;
pub mod task;
pub mod user;
