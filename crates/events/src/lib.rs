//! Domain events and their distribution.
//!
//! Events are facts emitted by aggregates; the bus fans them out to
//! best-effort consumers such as customer notifications.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::InMemoryEventBus;
