//! Mutable player progress.

use chrono::{DateTime, Utc};

use crate::models::Catalog;

/// Runtime counters for a single catalog building.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingState {
    /// Units owned.
    pub count: u32,
    /// One flag per catalog upgrade, same order. Flags only go from false to true.
    pub upgrades_purchased: Vec<bool>,
}

impl BuildingState {
    /// A building with no units and no upgrades, sized for `upgrades` catalog entries.
    pub fn empty(upgrades: usize) -> Self {
        Self {
            count: 0,
            upgrades_purchased: vec![false; upgrades],
        }
    }
}

/// Everything that changes while playing.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Spendable balance.
    pub points: f64,
    /// Lifetime earnings; never decreases.
    pub total_points_earned: f64,
    /// Points granted per manual click.
    pub click_power: f64,
    /// One entry per catalog building, same order.
    pub buildings: Vec<BuildingState>,
    /// Timestamp of the most recent save (construction time for a fresh state).
    pub last_saved: DateTime<Utc>,
}

impl GameState {
    /// Fresh state for the given catalog.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            points: 0.0,
            total_points_earned: 0.0,
            click_power: 1.0,
            buildings: catalog
                .buildings()
                .iter()
                .map(|spec| BuildingState::empty(spec.upgrades.len()))
                .collect(),
            last_saved: Utc::now(),
        }
    }

    /// Credit points to both the balance and the lifetime counter.
    pub fn earn(&mut self, amount: f64) {
        self.points += amount;
        self.total_points_earned += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_matches_catalog_shape() {
        let catalog = Catalog::default();
        let state = GameState::new(&catalog);
        assert_eq!(state.points, 0.0);
        assert_eq!(state.click_power, 1.0);
        assert_eq!(state.buildings.len(), catalog.len());
        for (building, spec) in state.buildings.iter().zip(catalog.buildings()) {
            assert_eq!(building.count, 0);
            assert_eq!(building.upgrades_purchased.len(), spec.upgrades.len());
            assert!(building.upgrades_purchased.iter().all(|flag| !flag));
        }
    }

    #[test]
    fn earn_updates_both_counters() {
        let mut state = GameState::new(&Catalog::default());
        state.earn(2.5);
        state.earn(0.5);
        assert_eq!(state.points, 3.0);
        assert_eq!(state.total_points_earned, 3.0);
    }
}
