use crate::model::cell::{Cell, Delta};
use crate::model::unit::UnitKind;
use serde::{Deserialize, Serialize};

/// One piece of information revealed about a side in one turn. The
/// transport decodes server messages into these records and routes each to
/// the hypothesis space of the side it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ObservationRecord {
    /// The side moved `unit` by `delta`.
    Moved { unit: UnitKind, delta: Delta },
    /// The side launched an attack on `cell`, so one of its units must be
    /// within attack range of that cell.
    AttackOrigin { cell: Cell },
    /// The side was attacked at `cell`. `hit` names the unit struck, if
    /// any; `near` lists the other units adjacent to the attacked cell.
    AttackResult {
        cell: Cell,
        #[serde(default)]
        hit: Option<UnitKind>,
        #[serde(default)]
        near: Vec<UnitKind>,
    },
    /// The side lost `unit` without accompanying position evidence.
    UnitLost { unit: UnitKind },
}
