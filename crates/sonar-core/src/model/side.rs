use core::fmt;
use serde::{Deserialize, Serialize};

/// Which fleet a hypothesis space models. The engine keeps one independent
/// space per side; nothing is shared between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Me,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Me => Side::Enemy,
            Side::Enemy => Side::Me,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Me => "me",
            Side::Enemy => "enemy",
        };
        f.write_str(label)
    }
}
