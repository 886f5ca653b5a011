use crate::model::cell::Cell;
use crate::model::unit::{UnitKind, UnitSet};

/// One fully specified candidate assignment of surviving units to cells.
///
/// The domain is the set of units still believed alive; assigned cells are
/// pairwise distinct in every hypothesis a space holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hypothesis {
    cells: [Option<Cell>; UnitKind::COUNT],
}

impl Hypothesis {
    pub const fn new() -> Self {
        Self {
            cells: [None; UnitKind::COUNT],
        }
    }

    pub fn with_cells(assignments: &[(UnitKind, Cell)]) -> Self {
        let mut hypothesis = Self::new();
        for (unit, cell) in assignments {
            hypothesis.set_cell(*unit, *cell);
        }
        hypothesis
    }

    pub const fn cell(&self, unit: UnitKind) -> Option<Cell> {
        self.cells[unit.index()]
    }

    pub fn set_cell(&mut self, unit: UnitKind, cell: Cell) {
        self.cells[unit.index()] = Some(cell);
    }

    /// Drops the unit's dimension, used when it is confirmed dead.
    pub fn clear(&mut self, unit: UnitKind) {
        self.cells[unit.index()] = None;
    }

    /// Units this hypothesis assigns a cell to.
    pub fn units(&self) -> UnitSet {
        UnitKind::ALL
            .into_iter()
            .filter(|unit| self.cells[unit.index()].is_some())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitKind, Cell)> + '_ {
        UnitKind::ALL
            .into_iter()
            .filter_map(|unit| self.cell(unit).map(|cell| (unit, cell)))
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.iter().any(|(_, pos)| pos == cell)
    }

    pub fn cells_distinct(&self) -> bool {
        let assigned: Vec<Cell> = self.iter().map(|(_, cell)| cell).collect();
        for (i, a) in assigned.iter().enumerate() {
            if assigned[i + 1..].contains(a) {
                return false;
            }
        }
        true
    }

    /// Copy of this hypothesis with only the `tracked` dimensions kept.
    pub fn restricted_to(&self, tracked: UnitSet) -> Hypothesis {
        let mut restricted = Self::new();
        for (unit, cell) in self.iter() {
            if tracked.contains(unit) {
                restricted.set_cell(unit, cell);
            }
        }
        restricted
    }
}

#[cfg(test)]
mod tests {
    use super::Hypothesis;
    use crate::model::cell::Cell;
    use crate::model::unit::{UnitKind, UnitSet};

    #[test]
    fn assignment_and_clear() {
        let mut hypothesis = Hypothesis::with_cells(&[
            (UnitKind::Warship, Cell::new(0, 0)),
            (UnitKind::Submarine, Cell::new(3, 3)),
        ]);
        assert_eq!(hypothesis.cell(UnitKind::Warship), Some(Cell::new(0, 0)));
        assert_eq!(hypothesis.cell(UnitKind::Cruiser), None);
        assert!(hypothesis.occupies(Cell::new(3, 3)));

        hypothesis.clear(UnitKind::Submarine);
        assert_eq!(hypothesis.cell(UnitKind::Submarine), None);
        assert_eq!(
            hypothesis.units(),
            UnitSet::EMPTY.with(UnitKind::Warship)
        );
    }

    #[test]
    fn distinctness_detects_collisions() {
        let valid = Hypothesis::with_cells(&[
            (UnitKind::Warship, Cell::new(0, 0)),
            (UnitKind::Cruiser, Cell::new(4, 4)),
        ]);
        assert!(valid.cells_distinct());

        let collided = Hypothesis::with_cells(&[
            (UnitKind::Warship, Cell::new(2, 2)),
            (UnitKind::Cruiser, Cell::new(2, 2)),
        ]);
        assert!(!collided.cells_distinct());
    }

    #[test]
    fn restriction_drops_untracked_dimensions() {
        let hypothesis = Hypothesis::with_cells(&[
            (UnitKind::Warship, Cell::new(1, 1)),
            (UnitKind::Cruiser, Cell::new(3, 0)),
            (UnitKind::Submarine, Cell::new(0, 4)),
        ]);
        let tracked = UnitSet::EMPTY
            .with(UnitKind::Warship)
            .with(UnitKind::Submarine);
        let restricted = hypothesis.restricted_to(tracked);
        assert_eq!(restricted.units(), tracked);
        assert_eq!(restricted.cell(UnitKind::Cruiser), None);
        assert_eq!(restricted.cell(UnitKind::Warship), Some(Cell::new(1, 1)));
    }
}
