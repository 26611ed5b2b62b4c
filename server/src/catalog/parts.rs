use crate::catalog::PartCatalog;
use crate::error::CatalogError;
use crate::models::part::{PartCategory, PartEntry, PartKind};
use std::collections::BTreeMap;

const MOVEMENT_PARTS: &[(u32, &str)] = &[
    (100_000, "Wheels"),
    (200_000, "Hovers"),
    (300_000, "Aerofoils"),
    (400_000, "Thrusters"),
    (500_000, "Rudders"),
    (600_000, "Insect Legs"),
    (700_000, "Mech Legs"),
    (800_000, "Skis"),
    (900_000, "Tank Treads"),
    (1_000_000, "Rotors"),
    (1_100_000, "Sprinters"),
    (1_200_000, "Propellers"),
];

const WEAPON_PARTS: &[(u32, &str)] = &[
    (10_000_000, "Laser"),
    (20_000_000, "Plasma Launcher"),
    (25_000_000, "Gyro Mortar"),
    (30_000_000, "Rail Cannon"),
    (40_000_000, "Nano Disruptor"),
    (50_000_000, "Tesla Blade"),
    (60_000_000, "Aeroflak Cannon"),
    (65_000_000, "Ion Cannon"),
    (70_100_000, "Proto Seeker"),
    (75_000_000, "Chain Shredder"),
];

/// In-memory part table seeded with the marketplace's movement and weapon
/// filter codes.
#[derive(Debug, Clone)]
pub struct StaticPartCatalog {
    parts: BTreeMap<u32, (PartCategory, &'static str)>,
}

impl StaticPartCatalog {
    pub fn new() -> Self {
        let movement = MOVEMENT_PARTS
            .iter()
            .map(|&(code, name)| (code, (PartCategory::Movement, name)));
        let weapon = WEAPON_PARTS
            .iter()
            .map(|&(code, name)| (code, (PartCategory::Weapon, name)));
        StaticPartCatalog {
            parts: movement.chain(weapon).collect(),
        }
    }

    pub fn with_other(mut self, code: u32, name: &'static str) -> Self {
        self.parts.insert(code, (PartCategory::Other, name));
        self
    }

    pub fn entries(&self) -> Vec<PartEntry> {
        self.parts
            .iter()
            .map(|(&code, &(category, name))| PartEntry {
                code,
                category,
                name,
            })
            .collect()
    }
}

impl Default for StaticPartCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PartCatalog for StaticPartCatalog {
    fn resolve(&self, code: u32) -> Result<PartKind, CatalogError> {
        match self.parts.get(&code) {
            Some((PartCategory::Movement, _)) => Ok(PartKind::Movement(code)),
            Some((PartCategory::Weapon, _)) => Ok(PartKind::Weapon(code)),
            Some((PartCategory::Other, _)) => Ok(PartKind::Other(code)),
            None => Err(CatalogError::NotFound(format!("Part code {}", code))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_codes() {
        let parts = StaticPartCatalog::new();
        assert_eq!(parts.resolve(900_000), Ok(PartKind::Movement(900_000)));
        assert_eq!(parts.resolve(70_100_000), Ok(PartKind::Weapon(70_100_000)));
        assert!(matches!(parts.resolve(12), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_with_other() {
        let parts = StaticPartCatalog::new().with_other(1, "Armour Cube");
        assert_eq!(parts.resolve(1), Ok(PartKind::Other(1)));
        assert_eq!(parts.entries().len(), MOVEMENT_PARTS.len() + WEAPON_PARTS.len() + 1);
    }
}
