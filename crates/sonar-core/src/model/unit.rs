use core::fmt;
use serde::{Deserialize, Serialize};

/// The fixed fleet roster. Kinds are closed so the near/not-near filter
/// logic can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnitKind {
    #[serde(rename = "w")]
    Warship = 0,
    #[serde(rename = "c")]
    Cruiser = 1,
    #[serde(rename = "s")]
    Submarine = 2,
}

impl UnitKind {
    pub const COUNT: usize = 3;

    pub const ALL: [UnitKind; UnitKind::COUNT] =
        [UnitKind::Warship, UnitKind::Cruiser, UnitKind::Submarine];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(UnitKind::Warship),
            1 => Some(UnitKind::Cruiser),
            2 => Some(UnitKind::Submarine),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Starting health of this kind.
    pub const fn max_health(self) -> u8 {
        match self {
            UnitKind::Warship => 3,
            UnitKind::Cruiser => 2,
            UnitKind::Submarine => 1,
        }
    }

    /// Single-letter code used on the wire.
    pub const fn code(self) -> &'static str {
        match self {
            UnitKind::Warship => "w",
            UnitKind::Cruiser => "c",
            UnitKind::Submarine => "s",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "w" => Some(UnitKind::Warship),
            "c" => Some(UnitKind::Cruiser),
            "s" => Some(UnitKind::Submarine),
            _ => None,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Bit-mask describing a subset of unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitSet(u8);

impl UnitSet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self((1 << UnitKind::COUNT) - 1);

    pub fn contains(self, unit: UnitKind) -> bool {
        self.0 & (1 << unit as u8) != 0
    }

    pub fn with(mut self, unit: UnitKind) -> Self {
        self.0 |= 1 << unit as u8;
        self
    }

    pub fn without(mut self, unit: UnitKind) -> Self {
        self.0 &= !(1 << unit as u8);
        self
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = UnitKind> + Clone {
        UnitKind::ALL
            .into_iter()
            .filter(move |unit| self.contains(*unit))
    }
}

impl FromIterator<UnitKind> for UnitSet {
    fn from_iter<I: IntoIterator<Item = UnitKind>>(iter: I) -> Self {
        iter.into_iter().fold(UnitSet::EMPTY, UnitSet::with)
    }
}
