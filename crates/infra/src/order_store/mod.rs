//! Order persistence boundary.
//!
//! The store owns order records and the concurrency discipline around them;
//! the domain only decides transitions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryOrderStore;
pub use r#trait::{OrderStore, OrderStoreError};
