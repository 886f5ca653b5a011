use crate::model::unit::{UnitKind, UnitSet};
use serde::{Deserialize, Serialize};

/// Remaining health per unit kind for one side. Starts at each kind's
/// maximum and only ever decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthTable {
    warship: u8,
    cruiser: u8,
    submarine: u8,
}

impl HealthTable {
    pub const fn new_full() -> Self {
        Self {
            warship: UnitKind::Warship.max_health(),
            cruiser: UnitKind::Cruiser.max_health(),
            submarine: UnitKind::Submarine.max_health(),
        }
    }

    pub const fn remaining(&self, unit: UnitKind) -> u8 {
        match unit {
            UnitKind::Warship => self.warship,
            UnitKind::Cruiser => self.cruiser,
            UnitKind::Submarine => self.submarine,
        }
    }

    pub const fn is_alive(&self, unit: UnitKind) -> bool {
        self.remaining(unit) > 0
    }

    pub fn alive_units(&self) -> UnitSet {
        UnitKind::ALL
            .into_iter()
            .filter(|unit| self.is_alive(*unit))
            .collect()
    }

    pub fn total(&self) -> u8 {
        self.warship + self.cruiser + self.submarine
    }

    pub fn decrement(&mut self, unit: UnitKind) {
        let slot = self.slot_mut(unit);
        *slot = slot.saturating_sub(1);
    }

    pub fn zero(&mut self, unit: UnitKind) {
        *self.slot_mut(unit) = 0;
    }

    /// Reconciles a server-reported table. A unit missing from the report
    /// is at zero; a report can never raise health. Returns the units that
    /// died in this update.
    pub fn sync(&mut self, reported: &[(UnitKind, u8)]) -> UnitSet {
        let mut newly_dead = UnitSet::EMPTY;
        for unit in UnitKind::ALL {
            let reported_hp = reported
                .iter()
                .find(|(kind, _)| *kind == unit)
                .map_or(0, |(_, hp)| *hp);
            let slot = self.slot_mut(unit);
            let next = (*slot).min(reported_hp);
            if *slot > 0 && next == 0 {
                newly_dead = newly_dead.with(unit);
            }
            *slot = next;
        }
        newly_dead
    }

    fn slot_mut(&mut self, unit: UnitKind) -> &mut u8 {
        match unit {
            UnitKind::Warship => &mut self.warship,
            UnitKind::Cruiser => &mut self.cruiser,
            UnitKind::Submarine => &mut self.submarine,
        }
    }
}

impl Default for HealthTable {
    fn default() -> Self {
        Self::new_full()
    }
}

#[cfg(test)]
mod tests {
    use super::HealthTable;
    use crate::model::unit::{UnitKind, UnitSet};

    #[test]
    fn starts_at_maximums() {
        let table = HealthTable::new_full();
        assert_eq!(table.remaining(UnitKind::Warship), 3);
        assert_eq!(table.remaining(UnitKind::Submarine), 1);
        assert_eq!(table.total(), 6);
        assert_eq!(table.alive_units(), UnitSet::FULL);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut table = HealthTable::new_full();
        table.decrement(UnitKind::Submarine);
        table.decrement(UnitKind::Submarine);
        assert_eq!(table.remaining(UnitKind::Submarine), 0);
        assert!(!table.is_alive(UnitKind::Submarine));
    }

    #[test]
    fn sync_is_monotone_and_reports_deaths() {
        let mut table = HealthTable::new_full();
        table.decrement(UnitKind::Warship);
        // A report can never raise warship back to 3, and a missing
        // submarine entry means it sank.
        let dead = table.sync(&[(UnitKind::Warship, 3), (UnitKind::Cruiser, 1)]);
        assert_eq!(table.remaining(UnitKind::Warship), 2);
        assert_eq!(table.remaining(UnitKind::Cruiser), 1);
        assert_eq!(table.remaining(UnitKind::Submarine), 0);
        assert_eq!(dead, UnitSet::EMPTY.with(UnitKind::Submarine));
    }

    #[test]
    fn sync_does_not_rereport_old_deaths() {
        let mut table = HealthTable::new_full();
        table.zero(UnitKind::Submarine);
        let dead = table.sync(&[(UnitKind::Warship, 3), (UnitKind::Cruiser, 2)]);
        assert!(dead.is_empty());
    }
}
