//! Background workers.
//!
//! Workers consume bus subscriptions on their own threads so that request
//! handling never waits on side effects like customer email.

pub mod notification_worker;
