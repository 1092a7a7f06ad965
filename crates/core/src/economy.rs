//! Closed-form cost and production formulas.

use crate::{
    models::{BuildingSpec, Catalog},
    state::{BuildingState, GameState},
};

/// Price growth applied per owned unit.
pub const COST_GROWTH: f64 = 1.15;

/// Price of the next unit: `floor(base_cost * 1.15^count)`.
pub fn building_cost(spec: &BuildingSpec, state: &BuildingState) -> f64 {
    (spec.base_cost * COST_GROWTH.powf(f64::from(state.count))).floor()
}

/// Product of the multipliers of all purchased upgrades (1.0 when none are owned).
pub fn production_multiplier(spec: &BuildingSpec, state: &BuildingState) -> f64 {
    spec.upgrades
        .iter()
        .zip(&state.upgrades_purchased)
        .filter(|(_, purchased)| **purchased)
        .map(|(upgrade, _)| upgrade.production_multiplier)
        .product()
}

/// Points per second produced by one building line.
pub fn building_production(spec: &BuildingSpec, state: &BuildingState) -> f64 {
    f64::from(state.count) * spec.base_production * production_multiplier(spec, state)
}

/// Points per second across every building.
pub fn total_production(catalog: &Catalog, state: &GameState) -> f64 {
    catalog
        .buildings()
        .iter()
        .zip(&state.buildings)
        .map(|(spec, building)| building_production(spec, building))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor() -> BuildingSpec {
        Catalog::default().buildings()[0].clone()
    }

    #[test]
    fn first_unit_costs_base_cost() {
        for spec in Catalog::default().buildings() {
            let state = BuildingState::empty(spec.upgrades.len());
            assert_eq!(building_cost(spec, &state), spec.base_cost);
        }
    }

    #[test]
    fn cost_grows_by_fifteen_percent_within_rounding() {
        let catalog = Catalog::default();
        for spec in catalog.buildings() {
            let mut state = BuildingState::empty(spec.upgrades.len());
            for count in 0..40 {
                state.count = count;
                let current = building_cost(spec, &state);
                state.count = count + 1;
                let next = building_cost(spec, &state);
                let drift = next - current * COST_GROWTH;
                assert!(
                    (-1.0..=COST_GROWTH).contains(&drift),
                    "{} at {count}: {current} -> {next}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn cost_is_floored() {
        let spec = cursor();
        let mut state = BuildingState::empty(2);
        state.count = 1;
        assert_eq!(building_cost(&spec, &state), 17.0);
    }

    #[test]
    fn huge_counts_keep_growing_the_price() {
        let spec = cursor();
        let mut state = BuildingState::empty(2);
        state.count = u32::MAX;
        assert!(building_cost(&spec, &state) > spec.base_cost);
        state.count = 3_000_000_000;
        assert!(building_cost(&spec, &state) > spec.base_cost);
    }

    #[test]
    fn production_is_zero_without_units_even_with_upgrades() {
        let spec = cursor();
        let mut state = BuildingState::empty(2);
        state.upgrades_purchased = vec![true, true];
        assert_eq!(building_production(&spec, &state), 0.0);
    }

    #[test]
    fn purchased_upgrades_multiply_production() {
        let spec = cursor();
        let mut state = BuildingState::empty(2);
        state.count = 10;
        assert!((building_production(&spec, &state) - 1.0).abs() < 1e-9);

        state.upgrades_purchased[1] = true;
        assert_eq!(production_multiplier(&spec, &state), 2.0);
        state.upgrades_purchased[0] = true;
        assert_eq!(production_multiplier(&spec, &state), 4.0);
        assert!((building_production(&spec, &state) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn total_production_sums_buildings() {
        let catalog = Catalog::default();
        let mut state = GameState::new(&catalog);
        state.buildings[1].count = 2;
        state.buildings[2].count = 1;
        state.buildings[2].upgrades_purchased[0] = true;
        assert!((total_production(&catalog, &state) - 18.0).abs() < 1e-9);
    }
}
