//! Exact hypothesis-space belief tracking.
//!
//! This module is composed of:
//! - `hypothesis`: one candidate assignment of surviving units to cells.
//! - `space`: the consistent-hypothesis set for one side and the filtering
//!   primitives that narrow it.
//! - `filter`: the observation-driven filters (move, attack origin, attack
//!   result, unit loss) composed from those primitives.
//! - `summary`: derived probability, score, and threat maps for the
//!   decision layer.

pub mod filter;
mod hypothesis;
mod space;
mod summary;

pub use hypothesis::Hypothesis;
pub use space::{BeliefError, HypothesisSpace};
pub use summary::{BeliefSummary, SummarySnapshot, UnitGrid, ValueGrid};
