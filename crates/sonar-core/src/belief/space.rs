use crate::belief::hypothesis::Hypothesis;
use crate::model::cell::Cell;
use crate::model::health::HealthTable;
use crate::model::side::Side;
use crate::model::unit::{UnitKind, UnitSet};
use core::fmt;
use std::collections::HashSet;
use tracing::{debug, warn};

/// All unit placements for one side still consistent with observed
/// evidence, plus that side's health table.
///
/// Hypotheses live in a dense arena and are narrowed in place; the set
/// shrinks monotonically and must never be emptied by a consistent
/// observation stream. Emptying it is a protocol or logic fault and is
/// surfaced as [`BeliefError::Contradiction`].
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    side: Side,
    hypotheses: Vec<Hypothesis>,
    tracked: UnitSet,
    health: HealthTable,
}

impl HypothesisSpace {
    /// Seeds a space from `universe`, restricted to `tracked` units, with
    /// health at each kind's maximum.
    pub fn new(
        side: Side,
        tracked: UnitSet,
        universe: impl IntoIterator<Item = Hypothesis>,
    ) -> Result<Self, BeliefError> {
        let mut seen = HashSet::new();
        let mut hypotheses = Vec::new();
        for hypothesis in universe {
            let restricted = hypothesis.restricted_to(tracked);
            if seen.insert(restricted) {
                hypotheses.push(restricted);
            }
        }
        if hypotheses.is_empty() {
            return Err(BeliefError::EmptyUniverse);
        }
        debug!(%side, hypotheses = hypotheses.len(), "seeded hypothesis space");
        Ok(Self {
            side,
            hypotheses,
            tracked,
            health: HealthTable::new_full(),
        })
    }

    /// Seeds a space with the full three-unit placement universe.
    pub fn new_full(side: Side) -> Result<Self, BeliefError> {
        Self::new(
            side,
            UnitSet::FULL,
            crate::placement::board_placements(&UnitKind::ALL),
        )
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    pub fn tracked(&self) -> UnitSet {
        self.tracked
    }

    pub fn health(&self) -> &HealthTable {
        &self.health
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Removes every hypothesis the predicate rejects. The single
    /// primitive every observation filter composes from.
    pub fn retain(
        &mut self,
        mut predicate: impl FnMut(&Hypothesis) -> bool,
    ) -> Result<usize, BeliefError> {
        self.rewrite(|hypothesis| predicate(hypothesis))
    }

    /// Map-and-filter in one pass: the closure may rewrite the hypothesis
    /// before deciding whether it survives. The Move filter needs this,
    /// since the translated position is itself what must be re-validated.
    pub fn rewrite(
        &mut self,
        mut f: impl FnMut(&mut Hypothesis) -> bool,
    ) -> Result<usize, BeliefError> {
        let before = self.hypotheses.len();
        self.hypotheses.retain_mut(|hypothesis| f(hypothesis));
        let removed = before - self.hypotheses.len();
        if before > 0 && self.hypotheses.is_empty() {
            warn!(
                side = %self.side,
                survivors_before = before,
                "observation eliminated every hypothesis"
            );
            return Err(BeliefError::Contradiction {
                side: self.side,
                survivors_before: before,
            });
        }
        if removed > 0 {
            debug!(
                side = %self.side,
                removed,
                remaining = self.hypotheses.len(),
                "hypothesis space narrowed"
            );
        }
        Ok(removed)
    }

    /// Drops a confirmed-dead unit's dimension from every hypothesis and
    /// deduplicates the survivors. Called exactly once per unit death.
    pub fn project_out(&mut self, unit: UnitKind) -> Result<(), BeliefError> {
        if !self.tracked.contains(unit) {
            return Err(BeliefError::StaleUnit { unit });
        }
        self.tracked = self.tracked.without(unit);
        let mut seen = HashSet::with_capacity(self.hypotheses.len());
        self.hypotheses.retain_mut(|hypothesis| {
            hypothesis.clear(unit);
            seen.insert(*hypothesis)
        });
        debug!(
            side = %self.side,
            unit = %unit,
            remaining = self.hypotheses.len(),
            "projected out dead unit"
        );
        Ok(())
    }

    /// Records one point of damage on `unit`, projecting it out when its
    /// health reaches zero.
    pub fn damage(&mut self, unit: UnitKind) -> Result<(), BeliefError> {
        if !self.tracked.contains(unit) {
            return Err(BeliefError::StaleUnit { unit });
        }
        self.health.decrement(unit);
        if !self.health.is_alive(unit) {
            self.project_out(unit)?;
        }
        Ok(())
    }

    /// Records a death reported without position evidence.
    pub fn mark_lost(&mut self, unit: UnitKind) -> Result<(), BeliefError> {
        if !self.tracked.contains(unit) {
            return Err(BeliefError::StaleUnit { unit });
        }
        self.health.zero(unit);
        self.project_out(unit)
    }

    /// Applies the per-turn health report from the transport, projecting
    /// out any unit it newly declares dead.
    pub fn sync_health(&mut self, reported: &[(UnitKind, u8)]) -> Result<(), BeliefError> {
        let newly_dead = self.health.sync(reported);
        for unit in newly_dead.iter() {
            self.project_out(unit)?;
        }
        Ok(())
    }

    /// The unit's cell if every remaining hypothesis agrees on it.
    pub fn confirmed_cell(&self, unit: UnitKind) -> Option<Cell> {
        let first = self.hypotheses.first()?.cell(unit)?;
        self.hypotheses[1..]
            .iter()
            .all(|hypothesis| hypothesis.cell(unit) == Some(first))
            .then_some(first)
    }
}

/// Faults in belief maintenance. None are retryable: filtering is
/// deterministic, so recovery belongs to the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeliefError {
    /// Construction was handed an empty placement universe.
    EmptyUniverse,
    /// A filter would empty a non-empty space: the observation stream is
    /// inconsistent with prior state.
    Contradiction { side: Side, survivors_before: usize },
    /// A filter referenced a unit that was already projected out.
    StaleUnit { unit: UnitKind },
}

impl fmt::Display for BeliefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeliefError::EmptyUniverse => write!(f, "placement universe is empty"),
            BeliefError::Contradiction {
                side,
                survivors_before,
            } => write!(
                f,
                "observation contradicts all {survivors_before} hypotheses for side {side}"
            ),
            BeliefError::StaleUnit { unit } => {
                write!(f, "filter references dead unit {unit}")
            }
        }
    }
}

impl std::error::Error for BeliefError {}
