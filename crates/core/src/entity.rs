//! Identity-bearing records.

/// A record whose identity is its id, not its field values.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Two snapshots describe the same entity when their ids match,
    /// whatever their other fields say.
    fn is_same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
