#![deny(warnings)]
//! Exact belief tracking for a turn-based, hidden-position grid duel.
//!
//! Two fleets of three units each sit hidden on a 5x5 board. Every turn
//! leaks partial information: a move vector, an attack cell, whether the
//! attack hit, and which other units were near the attacked cell. This
//! crate maintains, for each side, the exact set of unit placements still
//! consistent with everything observed so far, and derives the probability
//! and threat maps a decision layer needs.
//!
//! The transport that talks to the game server and the policy that picks
//! actions are external; they feed [`model::observation::ObservationRecord`]
//! values in and read [`belief::BeliefSummary`] snapshots out.

pub mod belief;
pub mod model;
pub mod placement;
