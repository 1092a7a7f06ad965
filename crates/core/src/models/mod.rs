//! Shared domain models.
//!
//! The catalog is the immutable half of the game: names, prices and
//! production figures fixed at compile time. Runtime counters live in
//! [`crate::state::GameState`].

use serde::{Deserialize, Serialize};

/// One-time purchase that multiplies the production of its building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSpec {
    /// Display name.
    pub name: String,
    /// Price in points.
    pub cost: f64,
    /// Factor applied to the building's production once purchased.
    pub production_multiplier: f64,
    /// Short flavour text shown next to the price.
    pub description: String,
}

/// Definition of a purchasable building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Display name.
    pub name: String,
    /// Price of the first unit.
    pub base_cost: f64,
    /// Points per second produced by a single unit without upgrades.
    pub base_production: f64,
    /// Upgrades in display order; `a` is index 0.
    pub upgrades: Vec<UpgradeSpec>,
}

impl BuildingSpec {
    fn new(name: &str, base_cost: f64, base_production: f64, upgrades: Vec<UpgradeSpec>) -> Self {
        Self {
            name: name.to_string(),
            base_cost,
            base_production,
            upgrades,
        }
    }
}

fn upgrade(name: &str, cost: f64, production_multiplier: f64, description: &str) -> UpgradeSpec {
    UpgradeSpec {
        name: name.to_string(),
        cost,
        production_multiplier,
        description: description.to_string(),
    }
}

/// Ordered list of buildings available to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    buildings: Vec<BuildingSpec>,
}

impl Catalog {
    /// Build a catalog from an explicit building list.
    pub fn new(buildings: Vec<BuildingSpec>) -> Self {
        Self { buildings }
    }

    /// All buildings in display order.
    pub fn buildings(&self) -> &[BuildingSpec] {
        &self.buildings
    }

    /// Building at a zero-based index, if it exists.
    pub fn building(&self, index: usize) -> Option<&BuildingSpec> {
        self.buildings.get(index)
    }

    /// Number of buildings.
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    /// Whether the catalog has no buildings at all.
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            BuildingSpec::new(
                "Cursor",
                15.0,
                0.1,
                vec![
                    upgrade("Reinforced Finger", 100.0, 2.0, "Cursors are twice as efficient"),
                    upgrade("Carpal Tunnel Cream", 500.0, 2.0, "Cursors are twice as efficient"),
                ],
            ),
            BuildingSpec::new(
                "Grandma",
                100.0,
                1.0,
                vec![
                    upgrade("Forwards From Grandma", 1_000.0, 2.0, "Grandmas are twice as efficient"),
                    upgrade(
                        "Steel-plated Rolling Pins",
                        5_000.0,
                        2.0,
                        "Grandmas are twice as efficient",
                    ),
                ],
            ),
            BuildingSpec::new(
                "Farm",
                1_100.0,
                8.0,
                vec![
                    upgrade("Cheap Hoes", 11_000.0, 2.0, "Farms are twice as efficient"),
                    upgrade("Fertilizer", 55_000.0, 2.0, "Farms are twice as efficient"),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_three_buildings_with_two_upgrades_each() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.buildings().iter().all(|b| b.upgrades.len() == 2));
        assert_eq!(catalog.building(0).map(|b| b.base_cost), Some(15.0));
        assert!(catalog.building(3).is_none());
    }
}
