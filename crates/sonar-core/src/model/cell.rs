use core::fmt;
use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const GRID_SIZE: i8 = 5;

/// One board coordinate. Coordinates are signed so that a translated cell
/// can leave the board before the bounds check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn in_bounds(self) -> bool {
        0 <= self.x && self.x < GRID_SIZE && 0 <= self.y && self.y < GRID_SIZE
    }

    pub const fn offset(self, delta: Delta) -> Cell {
        Cell::new(self.x + delta.dx, self.y + delta.dy)
    }

    pub fn chebyshev(self, other: Cell) -> u8 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Chebyshev distance at most 1. A cell is near itself.
    pub fn is_near(self, other: Cell) -> bool {
        self.chebyshev(other) <= 1
    }

    /// In-bounds cells within Chebyshev distance 1, the attack footprint.
    pub fn neighborhood(self, include_self: bool) -> CellSet {
        let mut set = CellSet::EMPTY;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = self.offset(Delta::new(dx, dy));
                if cell.in_bounds() && (include_self || cell != self) {
                    set.insert(cell);
                }
            }
        }
        set
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i8,
    pub dy: i8,
}

impl Delta {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.dx, self.dy)
    }
}

/// Every board cell, column-major.
pub fn all_cells() -> impl Iterator<Item = Cell> + Clone {
    (0..GRID_SIZE).flat_map(|x| (0..GRID_SIZE).map(move |y| Cell::new(x, y)))
}

/// Bit-mask over the 25 board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u32);

impl CellSet {
    pub const EMPTY: Self = Self(0);

    fn bit(cell: Cell) -> u32 {
        1 << (cell.x as u32 * GRID_SIZE as u32 + cell.y as u32)
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.in_bounds() && self.0 & Self::bit(cell) != 0
    }

    /// The cell must be in bounds.
    pub fn insert(&mut self, cell: Cell) {
        debug_assert!(cell.in_bounds());
        self.0 |= Self::bit(cell);
    }

    pub fn with(mut self, cell: Cell) -> Self {
        self.insert(cell);
        self
    }

    pub fn union(self, other: CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    pub fn intersection(self, other: CellSet) -> CellSet {
        CellSet(self.0 & other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Cell> + Clone {
        all_cells().filter(move |cell| self.contains(*cell))
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellSet, Delta, GRID_SIZE, all_cells};

    #[test]
    fn board_has_25_cells() {
        assert_eq!(all_cells().count(), 25);
        assert!(all_cells().all(Cell::in_bounds));
    }

    #[test]
    fn bounds_reject_edges() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(GRID_SIZE - 1, GRID_SIZE - 1).in_bounds());
        assert!(!Cell::new(-1, 0).in_bounds());
        assert!(!Cell::new(0, GRID_SIZE).in_bounds());
    }

    #[test]
    fn near_is_chebyshev_one() {
        assert!(Cell::new(0, 0).is_near(Cell::new(1, 1)));
        assert!(Cell::new(0, 0).is_near(Cell::new(0, 1)));
        assert!(Cell::new(0, 0).is_near(Cell::new(0, 0)));
        assert!(!Cell::new(0, 0).is_near(Cell::new(2, 2)));
        assert!(!Cell::new(0, 0).is_near(Cell::new(2, 3)));
    }

    #[test]
    fn corner_neighborhood_sizes() {
        let corner = Cell::new(0, 0);
        assert_eq!(corner.neighborhood(true).len(), 4);
        assert_eq!(corner.neighborhood(false).len(), 3);
        assert!(corner.neighborhood(true).contains(corner));
        assert!(!corner.neighborhood(false).contains(corner));
    }

    #[test]
    fn interior_neighborhood_has_eight_others() {
        let cell = Cell::new(2, 3);
        let zone = cell.neighborhood(false);
        assert_eq!(zone.len(), 8);
        assert!(zone.contains(Cell::new(1, 2)));
        assert!(zone.contains(Cell::new(3, 4)));
        assert!(!zone.contains(cell));
    }

    #[test]
    fn offset_can_leave_board() {
        let moved = Cell::new(4, 4).offset(Delta::new(1, 0));
        assert_eq!(moved, Cell::new(5, 4));
        assert!(!moved.in_bounds());
    }

    #[test]
    fn cellset_union_and_intersection() {
        let a = CellSet::EMPTY.with(Cell::new(0, 0)).with(Cell::new(1, 1));
        let b = CellSet::EMPTY.with(Cell::new(1, 1)).with(Cell::new(2, 2));
        assert_eq!(a.union(b).len(), 3);
        let both = a.intersection(b);
        assert_eq!(both.len(), 1);
        assert!(both.contains(Cell::new(1, 1)));
        assert_eq!(a.iter().count(), 2);
    }
}
