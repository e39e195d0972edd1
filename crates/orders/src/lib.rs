//! Orders domain module.
//!
//! Business rules for the order lifecycle, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Storage and
//! notification dispatch live in `glowcart-infra`.

pub mod order;
pub mod status;

pub use order::{
    ChangeOrderStatus, Order, OrderStatusChanged, PaymentStatus, StatusHistoryEntry,
    apply_transition,
};
pub use status::{InvalidTransition, OrderStatus, TRANSITIONS};
