pub mod alert;
pub mod category;
pub mod convert;
pub mod event;
pub mod routine;
pub mod task;
