//! Service layer holding the in-memory payload slot.
//! - Owns the one piece of mutable state in the system.
//! - Keeps the lookup-and-compare semantics out of the HTTP layer.

pub mod store;
