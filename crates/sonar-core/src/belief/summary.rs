use crate::belief::space::HypothesisSpace;
use crate::model::cell::{Cell, CellSet, GRID_SIZE, all_cells};
use crate::model::side::Side;
use crate::model::unit::{UnitKind, UnitSet};
use serde::{Deserialize, Serialize};

const N: usize = GRID_SIZE as usize;

/// A per-cell map of probabilities or scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueGrid([[f32; N]; N]);

impl ValueGrid {
    pub fn at(&self, cell: Cell) -> f32 {
        if !cell.in_bounds() {
            return 0.0;
        }
        self.0[cell.x as usize][cell.y as usize]
    }

    pub fn rows(&self) -> &[[f32; N]; N] {
        &self.0
    }

    /// Cell with the largest value, first in column-major order on ties.
    pub fn max_cell(&self) -> (Cell, f32) {
        let mut best = (Cell::new(0, 0), self.at(Cell::new(0, 0)));
        for cell in all_cells() {
            let value = self.at(cell);
            if value > best.1 {
                best = (cell, value);
            }
        }
        best
    }

    fn add(&mut self, cell: Cell, value: f32) {
        self.0[cell.x as usize][cell.y as usize] += value;
    }

    fn scale(&mut self, factor: f32) {
        for row in &mut self.0 {
            for value in row {
                *value *= factor;
            }
        }
    }
}

/// Derived statistics over one side's hypothesis space, computed fresh
/// from a snapshot and never mutating it.
///
/// All maps assume a uniform prior over the remaining hypotheses. A
/// degenerate empty space has no summary at all ([`BeliefSummary::capture`]
/// returns `None`) so no division by zero can leak out as NaN.
#[derive(Debug, Clone)]
pub struct BeliefSummary {
    tracked: UnitSet,
    hypothesis_count: usize,
    occupancy: [ValueGrid; UnitKind::COUNT],
    target_score: ValueGrid,
    threat_exposure: ValueGrid,
    safe_cells: CellSet,
}

impl BeliefSummary {
    pub fn capture(space: &HypothesisSpace) -> Option<Self> {
        let hypothesis_count = space.size();
        if hypothesis_count == 0 {
            return None;
        }

        let mut occupancy = [ValueGrid::default(); UnitKind::COUNT];
        let mut threat_exposure = ValueGrid::default();
        for hypothesis in space.hypotheses() {
            let mut covered = CellSet::EMPTY;
            for (unit, cell) in hypothesis.iter() {
                occupancy[unit.index()].add(cell, 1.0);
                covered = covered.union(cell.neighborhood(true));
            }
            for cell in covered.iter() {
                threat_exposure.add(cell, 1.0);
            }
        }

        // Counts are exact in f32 well past the universe size, so a zero
        // here means "covered in no hypothesis", not a rounding artifact.
        let safe_cells: CellSet = all_cells()
            .filter(|cell| threat_exposure.at(*cell) == 0.0)
            .fold(CellSet::EMPTY, CellSet::with);

        let scale = 1.0 / hypothesis_count as f32;
        for grid in &mut occupancy {
            grid.scale(scale);
        }
        threat_exposure.scale(scale);

        let mut target_score = ValueGrid::default();
        for unit in space.tracked().iter() {
            let health = space.health().remaining(unit);
            if health == 0 {
                continue;
            }
            let weight = 1.0 / health as f32;
            for cell in all_cells() {
                target_score.add(cell, occupancy[unit.index()].at(cell) * weight);
            }
        }

        Some(Self {
            tracked: space.tracked(),
            hypothesis_count,
            occupancy,
            target_score,
            threat_exposure,
            safe_cells,
        })
    }

    pub fn hypothesis_count(&self) -> usize {
        self.hypothesis_count
    }

    pub fn tracked(&self) -> UnitSet {
        self.tracked
    }

    /// Marginal probability that `unit` sits on `cell`; `None` once the
    /// unit has been projected out.
    pub fn occupancy(&self, unit: UnitKind, cell: Cell) -> Option<f32> {
        self.tracked
            .contains(unit)
            .then(|| self.occupancy[unit.index()].at(cell))
    }

    pub fn occupancy_grid(&self, unit: UnitKind) -> Option<&ValueGrid> {
        self.tracked
            .contains(unit)
            .then(|| &self.occupancy[unit.index()])
    }

    /// How much firing at `cell` is worth: occupancy summed over units,
    /// each weighted by the inverse of its remaining health so weakened
    /// units are finished off first.
    pub fn target_score(&self, cell: Cell) -> f32 {
        self.target_score.at(cell)
    }

    pub fn target_score_grid(&self) -> &ValueGrid {
        &self.target_score
    }

    /// Probability that `cell` lies inside some enemy unit's attack range.
    pub fn threat_exposure(&self, cell: Cell) -> f32 {
        self.threat_exposure.at(cell)
    }

    pub fn threat_exposure_grid(&self) -> &ValueGrid {
        &self.threat_exposure
    }

    /// Cells no hypothesized unit can reach with an attack this turn.
    pub fn safe_cells(&self) -> CellSet {
        self.safe_cells
    }

    /// Most probable cell for `unit`, with its marginal.
    pub fn most_likely(&self, unit: UnitKind) -> Option<(Cell, f32)> {
        self.occupancy_grid(unit).map(ValueGrid::max_cell)
    }
}

/// Serializable export of a summary for diagnostics or an out-of-process
/// decision layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub side: Side,
    pub hypotheses: usize,
    pub tracked: Vec<UnitKind>,
    pub occupancy: Vec<UnitGrid>,
    pub target_score: ValueGrid,
    pub threat_exposure: ValueGrid,
    pub safe_cells: Vec<Cell>,
}

/// One unit's marginal occupancy map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitGrid {
    pub unit: UnitKind,
    pub grid: ValueGrid,
}

impl SummarySnapshot {
    pub fn capture(space: &HypothesisSpace) -> Option<Self> {
        let summary = BeliefSummary::capture(space)?;
        let tracked: Vec<UnitKind> = summary.tracked().iter().collect();
        let occupancy = tracked
            .iter()
            .map(|unit| UnitGrid {
                unit: *unit,
                grid: *summary.occupancy_grid(*unit).expect("unit is tracked"),
            })
            .collect();
        Some(Self {
            side: space.side(),
            hypotheses: summary.hypothesis_count(),
            tracked,
            occupancy,
            target_score: *summary.target_score_grid(),
            threat_exposure: *summary.threat_exposure_grid(),
            safe_cells: summary.safe_cells().iter().collect(),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
