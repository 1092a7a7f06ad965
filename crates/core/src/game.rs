//! Game operations: clicking, buying, and passive production.

use std::time::Duration;

use crate::{economy, models::Catalog, state::GameState};

/// Result of a purchase attempt. Only `Bought` mutates state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Purchase {
    /// The price was paid.
    Bought {
        /// Points debited.
        cost: f64,
    },
    /// The balance did not cover the price.
    InsufficientFunds {
        /// Price at the time of the attempt.
        cost: f64,
        /// Balance at the time of the attempt.
        points: f64,
    },
    /// The upgrade is already owned.
    AlreadyPurchased,
}

impl Purchase {
    /// Whether the purchase went through.
    pub fn is_bought(&self) -> bool {
        matches!(self, Purchase::Bought { .. })
    }
}

/// Catalog plus the player's progress against it.
///
/// Building and upgrade indices are zero-based and must be valid for the
/// catalog; passing an out-of-range index panics.
#[derive(Debug, Clone)]
pub struct Game {
    catalog: Catalog,
    state: GameState,
}

impl Game {
    /// Start a fresh game.
    pub fn new(catalog: Catalog) -> Self {
        let state = GameState::new(&catalog);
        Self { catalog, state }
    }

    /// Resume from an existing state shaped for `catalog`.
    pub fn with_state(catalog: Catalog, state: GameState) -> Self {
        Self { catalog, state }
    }

    /// Immutable building definitions.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current progress.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable progress, for direct adjustments outside the purchase rules.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Catalog and mutable progress borrowed together.
    pub fn split_mut(&mut self) -> (&Catalog, &mut GameState) {
        (&self.catalog, &mut self.state)
    }

    /// Swap in a loaded snapshot wholesale.
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }

    /// Manual click.
    pub fn click(&mut self) {
        let power = self.state.click_power;
        self.state.earn(power);
    }

    /// Price of the next unit of a building.
    pub fn building_cost(&self, index: usize) -> f64 {
        economy::building_cost(&self.catalog.buildings()[index], &self.state.buildings[index])
    }

    /// Points per second from one building line.
    pub fn building_production(&self, index: usize) -> f64 {
        economy::building_production(&self.catalog.buildings()[index], &self.state.buildings[index])
    }

    /// Points per second from everything owned.
    pub fn total_production(&self) -> f64 {
        economy::total_production(&self.catalog, &self.state)
    }

    /// Buy one unit of a building if the balance covers its current price.
    pub fn buy_building(&mut self, index: usize) -> Purchase {
        let cost = self.building_cost(index);
        if self.state.points < cost {
            return Purchase::InsufficientFunds {
                cost,
                points: self.state.points,
            };
        }
        self.state.points -= cost;
        self.state.buildings[index].count += 1;
        Purchase::Bought { cost }
    }

    /// Buy an upgrade once. Repeat attempts fail regardless of balance.
    pub fn buy_upgrade(&mut self, building: usize, upgrade: usize) -> Purchase {
        let cost = self.catalog.buildings()[building].upgrades[upgrade].cost;
        let purchased = &mut self.state.buildings[building].upgrades_purchased[upgrade];
        if *purchased {
            return Purchase::AlreadyPurchased;
        }
        if self.state.points < cost {
            return Purchase::InsufficientFunds {
                cost,
                points: self.state.points,
            };
        }
        *purchased = true;
        self.state.points -= cost;
        Purchase::Bought { cost }
    }

    /// Credit passive production for `elapsed` real time.
    pub fn advance(&mut self, elapsed: Duration) {
        let produced = self.total_production() * elapsed.as_secs_f64();
        if produced > 0.0 {
            self.state.earn(produced);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_clicks_buy_the_first_cursor() {
        let mut game = Game::default();
        for _ in 0..15 {
            game.click();
        }
        assert_eq!(game.state().points, 15.0);

        let outcome = game.buy_building(0);
        assert_eq!(outcome, Purchase::Bought { cost: 15.0 });
        assert_eq!(game.state().points, 0.0);
        assert_eq!(game.state().buildings[0].count, 1);
        assert_eq!(game.state().total_points_earned, 15.0);
    }

    #[test]
    fn building_purchase_one_short_changes_nothing() {
        let mut game = Game::default();
        game.state_mut().points = 14.0;
        let before = game.state().clone();

        let outcome = game.buy_building(0);
        assert_eq!(
            outcome,
            Purchase::InsufficientFunds {
                cost: 15.0,
                points: 14.0
            }
        );
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn upgrade_can_only_be_bought_once() {
        let mut game = Game::default();
        game.state_mut().points = 1_000.0;

        assert_eq!(game.buy_upgrade(0, 0), Purchase::Bought { cost: 100.0 });
        assert!(game.state().buildings[0].upgrades_purchased[0]);
        assert_eq!(game.state().points, 900.0);

        assert_eq!(game.buy_upgrade(0, 0), Purchase::AlreadyPurchased);
        assert_eq!(game.state().points, 900.0);
        assert!(game.state().buildings[0].upgrades_purchased[0]);
    }

    #[test]
    fn unaffordable_upgrade_is_rejected() {
        let mut game = Game::default();
        game.state_mut().points = 99.0;
        assert!(!game.buy_upgrade(0, 0).is_bought());
        assert!(!game.state().buildings[0].upgrades_purchased[0]);
        assert_eq!(game.state().points, 99.0);
    }

    #[test]
    fn advance_credits_production_for_elapsed_time() {
        let mut game = Game::default();
        game.state_mut().buildings[1].count = 3;

        game.advance(Duration::from_millis(2_500));
        assert!((game.state().points - 7.5).abs() < 1e-9);
        assert!((game.state().total_points_earned - 7.5).abs() < 1e-9);
    }

    #[test]
    fn advance_without_buildings_earns_nothing() {
        let mut game = Game::default();
        game.advance(Duration::from_secs(3_600));
        assert_eq!(game.state().points, 0.0);
    }

    #[test]
    fn resumed_game_uses_supplied_state() {
        let catalog = Catalog::default();
        let mut state = GameState::new(&catalog);
        state.points = 50.0;
        state.buildings[0].count = 4;
        let game = Game::with_state(catalog, state);
        assert_eq!(game.building_cost(0), 26.0);
        assert_eq!(game.state().points, 50.0);
    }

    #[test]
    fn spending_does_not_reduce_lifetime_total() {
        let mut game = Game::default();
        game.state_mut().earn(200.0);
        game.buy_building(1);
        assert_eq!(game.state().points, 100.0);
        assert_eq!(game.state().total_points_earned, 200.0);
    }
}
