//! Observation filters: pure transformations narrowing a side's
//! hypothesis space, each expressed through [`HypothesisSpace::retain`],
//! [`HypothesisSpace::rewrite`], or a projection.

use crate::belief::space::{BeliefError, HypothesisSpace};
use crate::model::cell::{Cell, Delta};
use crate::model::observation::ObservationRecord;
use crate::model::unit::{UnitKind, UnitSet};

/// Applies one observation record to the space of the side it concerns.
pub fn apply(
    space: &mut HypothesisSpace,
    record: &ObservationRecord,
) -> Result<(), BeliefError> {
    match record {
        ObservationRecord::Moved { unit, delta } => observe_move(space, *unit, *delta),
        ObservationRecord::AttackOrigin { cell } => observe_attack_origin(space, *cell),
        ObservationRecord::AttackResult { cell, hit, near } => {
            observe_attack_result(space, *cell, *hit, near)
        }
        ObservationRecord::UnitLost { unit } => observe_unit_lost(space, *unit),
    }
}

/// The side moved `unit` by `delta`: translate it in every hypothesis and
/// keep only hypotheses where the translated cell is on the board and
/// collides with none of that hypothesis's other units.
pub fn observe_move(
    space: &mut HypothesisSpace,
    unit: UnitKind,
    delta: Delta,
) -> Result<(), BeliefError> {
    if !space.tracked().contains(unit) {
        return Err(BeliefError::StaleUnit { unit });
    }
    space.rewrite(|hypothesis| {
        let from = match hypothesis.cell(unit) {
            Some(cell) => cell,
            None => return false,
        };
        let to = from.offset(delta);
        if !to.in_bounds() {
            return false;
        }
        let collides = hypothesis
            .iter()
            .any(|(other, cell)| other != unit && cell == to);
        if collides {
            return false;
        }
        hypothesis.set_cell(unit, to);
        true
    })?;
    Ok(())
}

/// The side attacked `cell`: an attack must come from a unit on or
/// adjacent to the target, so some tracked unit sits in its neighborhood.
pub fn observe_attack_origin(
    space: &mut HypothesisSpace,
    cell: Cell,
) -> Result<(), BeliefError> {
    let range = cell.neighborhood(true);
    space.retain(|hypothesis| hypothesis.iter().any(|(_, pos)| range.contains(pos)))?;
    Ok(())
}

/// The side was attacked at `cell`.
///
/// On a hit, the struck unit is pinned to the attacked cell and takes a
/// point of damage (projection happens if that kills it). On a miss, no
/// tracked unit may occupy the cell and every tracked unit must agree with
/// the `near` report in both directions: listed iff adjacent.
pub fn observe_attack_result(
    space: &mut HypothesisSpace,
    cell: Cell,
    hit: Option<UnitKind>,
    near: &[UnitKind],
) -> Result<(), BeliefError> {
    match hit {
        Some(unit) => {
            if !space.tracked().contains(unit) {
                return Err(BeliefError::StaleUnit { unit });
            }
            space.retain(|hypothesis| hypothesis.cell(unit) == Some(cell))?;
            space.damage(unit)
        }
        None => {
            for unit in near {
                if !space.tracked().contains(*unit) {
                    return Err(BeliefError::StaleUnit { unit: *unit });
                }
            }
            let near_set: UnitSet = near.iter().copied().collect();
            space.retain(|hypothesis| {
                if hypothesis.occupies(cell) {
                    return false;
                }
                hypothesis
                    .iter()
                    .all(|(unit, pos)| near_set.contains(unit) == pos.is_near(cell))
            })?;
            Ok(())
        }
    }
}

/// The server reported `unit` dead without position evidence.
pub fn observe_unit_lost(
    space: &mut HypothesisSpace,
    unit: UnitKind,
) -> Result<(), BeliefError> {
    space.mark_lost(unit)
}
