use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    Movement,
    Weapon,
    Other,
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartCategory::Movement => write!(f, "movement"),
            PartCategory::Weapon => write!(f, "weapon"),
            PartCategory::Other => write!(f, "other"),
        }
    }
}

/// A part code tagged with the category the part catalog resolved it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Movement(u32),
    Weapon(u32),
    Other(u32),
}

impl PartKind {
    pub fn category(self) -> PartCategory {
        match self {
            PartKind::Movement(_) => PartCategory::Movement,
            PartKind::Weapon(_) => PartCategory::Weapon,
            PartKind::Other(_) => PartCategory::Other,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PartEntry {
    pub code: u32,
    pub category: PartCategory,
    pub name: &'static str,
}
