//! Enumeration of legal initial placements.
//!
//! The full injective universe seeds a [`crate::belief::HypothesisSpace`];
//! the separated subset is what one's own fleet may actually start from.

use crate::belief::Hypothesis;
use crate::model::cell::{Cell, CellSet, all_cells};
use crate::model::unit::UnitKind;
use core::fmt;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Lazy enumeration of every injective assignment of units to cells.
/// Cloning restarts the sequence from wherever the clone was taken.
#[derive(Debug, Clone)]
pub struct Placements {
    cells: Vec<Cell>,
    units: Vec<UnitKind>,
    indices: Vec<usize>,
    done: bool,
}

impl Placements {
    fn new(cells: Vec<Cell>, units: &[UnitKind]) -> Self {
        let done = units.len() > cells.len();
        Self {
            indices: vec![0; units.len()],
            units: units.to_vec(),
            cells,
            done,
        }
    }

    fn current_is_injective(&self) -> bool {
        for (i, a) in self.indices.iter().enumerate() {
            if self.indices[i + 1..].contains(a) {
                return false;
            }
        }
        true
    }

    /// Odometer increment over the index vector; false once exhausted.
    fn advance(&mut self) -> bool {
        for index in self.indices.iter_mut().rev() {
            *index += 1;
            if *index < self.cells.len() {
                return true;
            }
            *index = 0;
        }
        false
    }

    fn build(&self) -> Hypothesis {
        let mut hypothesis = Hypothesis::new();
        for (unit, index) in self.units.iter().zip(&self.indices) {
            hypothesis.set_cell(*unit, self.cells[*index]);
        }
        hypothesis
    }
}

impl Iterator for Placements {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        if self.done {
            return None;
        }
        if self.units.is_empty() {
            self.done = true;
            return Some(Hypothesis::new());
        }
        loop {
            if self.current_is_injective() {
                let hypothesis = self.build();
                if !self.advance() {
                    self.done = true;
                }
                return Some(hypothesis);
            }
            if !self.advance() {
                self.done = true;
                return None;
            }
        }
    }
}

/// All injective assignments of `units` to distinct cells drawn from
/// `cells`: the falling factorial |cells| x (|cells|-1) x ...
pub fn all_placements(cells: &[Cell], units: &[UnitKind]) -> Placements {
    Placements::new(cells.to_vec(), units)
}

/// All injective assignments over the whole board, 25 x 24 x 23 = 13800
/// for the three-unit fleet.
pub fn board_placements(units: &[UnitKind]) -> Placements {
    Placements::new(all_cells().collect(), units)
}

/// The placements legal as one's own starting layout: every pair of units
/// strictly farther apart than `min_separation` (Chebyshev), and no board
/// cell inside two different units' attack neighborhoods, so a single
/// enemy attack can ever reveal at most one unit.
#[derive(Debug, Clone)]
pub struct SeparatedPlacements {
    inner: Placements,
    min_separation: u8,
}

impl Iterator for SeparatedPlacements {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        let min_separation = self.min_separation;
        self.inner
            .by_ref()
            .find(|hypothesis| is_separated(hypothesis, min_separation))
    }
}

pub fn separated_placements(units: &[UnitKind], min_separation: u8) -> SeparatedPlacements {
    SeparatedPlacements {
        inner: board_placements(units),
        min_separation,
    }
}

fn is_separated(hypothesis: &Hypothesis, min_separation: u8) -> bool {
    let placed: Vec<Cell> = hypothesis.iter().map(|(_, cell)| cell).collect();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            if a.chebyshev(*b) <= min_separation {
                return false;
            }
        }
    }
    single_coverage(hypothesis)
}

/// No board cell may be near two different units.
fn single_coverage(hypothesis: &Hypothesis) -> bool {
    let mut covered = CellSet::EMPTY;
    for (_, cell) in hypothesis.iter() {
        let zone = cell.neighborhood(true);
        if !covered.intersection(zone).is_empty() {
            return false;
        }
        covered = covered.union(zone);
    }
    true
}

/// Picks a uniformly random legal starting layout.
pub fn random_layout<R: Rng + ?Sized>(
    units: &[UnitKind],
    min_separation: u8,
    rng: &mut R,
) -> Result<Hypothesis, LayoutError> {
    let legal: Vec<Hypothesis> = separated_placements(units, min_separation).collect();
    legal
        .choose(rng)
        .copied()
        .ok_or(LayoutError::NoLegalLayout { min_separation })
}

pub fn random_layout_with_seed(
    units: &[UnitKind],
    min_separation: u8,
    seed: u64,
) -> Result<Hypothesis, LayoutError> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_layout(units, min_separation, &mut rng)
}

/// The separation constraint admitted no layout at all; fatal at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    NoLegalLayout { min_separation: u8 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoLegalLayout { min_separation } => write!(
                f,
                "no placement satisfies minimum separation {min_separation} on this board"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::{
        LayoutError, all_placements, board_placements, random_layout_with_seed,
        separated_placements,
    };
    use crate::model::cell::Cell;
    use crate::model::unit::UnitKind;

    #[test]
    fn full_universe_is_the_falling_factorial() {
        assert_eq!(board_placements(&UnitKind::ALL).count(), 25 * 24 * 23);
        assert_eq!(board_placements(&[UnitKind::Warship]).count(), 25);
    }

    #[test]
    fn placements_are_injective_and_in_bounds() {
        for hypothesis in board_placements(&UnitKind::ALL) {
            assert!(hypothesis.cells_distinct());
            assert_eq!(hypothesis.iter().count(), 3);
            assert!(hypothesis.iter().all(|(_, cell)| cell.in_bounds()));
        }
    }

    #[test]
    fn too_few_cells_yield_nothing() {
        let cells = [Cell::new(0, 0), Cell::new(1, 1)];
        assert_eq!(all_placements(&cells, &UnitKind::ALL).count(), 0);
    }

    #[test]
    fn sequence_is_restartable() {
        let placements = separated_placements(&UnitKind::ALL, 2);
        let first_pass: Vec<_> = placements.clone().collect();
        let second_pass: Vec<_> = placements.collect();
        assert!(!first_pass.is_empty());
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn separated_placements_respect_both_rules() {
        let mut count = 0;
        for hypothesis in separated_placements(&UnitKind::ALL, 2) {
            count += 1;
            let cells: Vec<Cell> = hypothesis.iter().map(|(_, cell)| cell).collect();
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert!(a.chebyshev(*b) > 2);
                }
            }
            // Dispersion: no board cell near two units.
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    let shared = a
                        .neighborhood(true)
                        .intersection(b.neighborhood(true));
                    assert!(shared.is_empty());
                }
            }
        }
        assert!(count > 0);
    }

    #[test]
    fn random_layout_is_seed_deterministic_and_legal() {
        let a = random_layout_with_seed(&UnitKind::ALL, 2, 42).expect("legal layouts exist");
        let b = random_layout_with_seed(&UnitKind::ALL, 2, 42).expect("legal layouts exist");
        assert_eq!(a, b);
        assert!(a.cells_distinct());
        assert_eq!(a.iter().count(), 3);
    }

    #[test]
    fn impossible_separation_is_a_layout_error() {
        let err = random_layout_with_seed(&UnitKind::ALL, 4, 7).expect_err("board too small");
        assert_eq!(err, LayoutError::NoLegalLayout { min_separation: 4 });
    }
}
