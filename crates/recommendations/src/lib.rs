//! Routine-aware product recommendations.
//!
//! Given one reference product and the active catalog snapshot, rank the
//! products that make a sensible next (or previous) step in a skincare
//! routine and explain each pick. Everything here is pure and deterministic:
//! the caller owns catalog I/O.

pub mod engine;
pub mod reasons;
pub mod routine;
pub mod scoring;

pub use engine::{
    DEFAULT_LIMIT, MAX_LIMIT, Recommendation, RecommendationEngine, get_recommendations,
};
pub use reasons::reason;
pub use routine::RoutineStep;
pub use scoring::score;
