//! Offline-batch reconciliation.
//!
//! A batch is an ordered list of client-originated create/update/delete
//! operations, possibly referencing client-chosen temporary ids for rows
//! that do not exist server-side yet. The applier walks the batch in array
//! order, rewriting temp ids through the resolver as creates assign real
//! ids, and returns the accumulated temp-to-server mapping.

pub mod applier;
pub mod payload;
pub mod resolver;

pub use applier::apply_batch;
pub use payload::BatchRequest;
pub use resolver::{IdMap, MappingEntry};
