//! per-column placement of pickups & decorations with minimum spacing
use bevy::log::debug;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SpawnConfig;
use crate::entities::{DecorationVariant, EntityRegistry, PickupKind};
use crate::terrain::HeightField;

/// what a single `consider_column` call placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    pub pickup: Option<PickupKind>,
    pub decoration: Option<DecorationVariant>,
}

pub struct SpawnPlanner {
    last_currency: Option<usize>,
    last_pickup: Option<usize>,
    last_decoration: Option<usize>,
    cfg: SpawnConfig,
    rng: StdRng,
}

/// `column` lies at least `min` columns after `last`
#[inline]
fn spaced(last: Option<usize>, column: usize, min: usize) -> bool {
    match last {
        None => true,
        Some(last) => column.checked_sub(last).is_some_and(|d| d >= min),
    }
}

impl SpawnPlanner {
    pub fn new(cfg: &SpawnConfig, rng: StdRng) -> Self {
        Self {
            last_currency: None,
            last_pickup: None,
            last_decoration: None,
            cfg: cfg.clone(),
            rng,
        }
    }

    pub fn consider_column(
        &mut self,
        column: usize,
        terrain: &mut HeightField,
        registry: &mut EntityRegistry,
    ) -> Placement {
        let mut placed = Placement::default();
        if column < self.cfg.start_column {
            return placed;
        }

        // never read an undefined height
        terrain.ensure_column(column + 1);
        let x = terrain.column_to_world_x(column) + terrain.tile_width() * 0.5;
        let ground = terrain.interpolated_height_at(x);

        /* ---- interactive: currency first, then boost / fuel ---- */
        if !registry.holds_collectible(column) {
            if let Some(kind) = self.roll_pickup(column) {
                let at = Vec2::new(x, ground + self.cfg.collectible_clearance);
                if registry.insert_collectible(column, kind, at) {
                    self.last_pickup = Some(column);
                    if kind == PickupKind::Currency {
                        self.last_currency = Some(column);
                    }
                    placed.pickup = Some(kind);
                    debug!("spawn: {:?} at column {}", kind, column);
                }
            }
        }

        /* ---- decoration, on its own spacing ---- */
        if !registry.holds_decoration(column)
            && spaced(self.last_decoration, column, self.cfg.decoration_min_separation)
            && self.rng.gen_bool(self.cfg.decoration_chance)
        {
            let variant = *DecorationVariant::ALL
                .choose(&mut self.rng)
                .unwrap_or(&DecorationVariant::Bush);
            if registry.insert_decoration(column, variant, Vec2::new(x, ground)) {
                self.last_decoration = Some(column);
                placed.decoration = Some(variant);
            }
        }

        placed
    }

    fn roll_pickup(&mut self, column: usize) -> Option<PickupKind> {
        let cfg = &self.cfg;
        if spaced(self.last_currency, column, cfg.currency_min_separation)
            && self.rng.gen_bool(cfg.currency_chance)
        {
            return Some(PickupKind::Currency);
        }
        if !spaced(self.last_pickup, column, cfg.pickup_min_separation) {
            return None;
        }
        if self.rng.gen_bool(cfg.boost_chance) {
            Some(PickupKind::Boost)
        } else if self.rng.gen_bool(cfg.fuel_chance) {
            Some(PickupKind::Fuel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn setup(cfg: &SpawnConfig, seed: u64) -> (SpawnPlanner, HeightField, EntityRegistry) {
        (
            SpawnPlanner::new(cfg, StdRng::seed_from_u64(seed)),
            HeightField::new(&TerrainConfig::default(), StdRng::seed_from_u64(seed + 1000)),
            EntityRegistry::new(cfg.collectible_size),
        )
    }

    #[test]
    fn nothing_before_start_column() {
        let cfg = SpawnConfig {
            currency_chance: 1.0,
            decoration_chance: 1.0,
            ..SpawnConfig::default()
        };
        let (mut planner, mut hf, mut reg) = setup(&cfg, 1);
        for col in 0..cfg.start_column {
            assert_eq!(planner.consider_column(col, &mut hf, &mut reg), Placement::default());
        }
        assert!(reg.collectibles().is_empty());
    }

    #[test]
    fn forces_generation_for_unseen_columns() {
        let (mut planner, mut hf, mut reg) = setup(&SpawnConfig::default(), 2);
        assert!(hf.is_empty());
        planner.consider_column(500, &mut hf, &mut reg);
        assert!(hf.len() > 501);
    }

    #[test]
    fn occupied_column_is_left_alone() {
        let cfg = SpawnConfig { currency_chance: 1.0, ..SpawnConfig::default() };
        let (mut planner, mut hf, mut reg) = setup(&cfg, 3);
        assert_eq!(planner.consider_column(20, &mut hf, &mut reg).pickup, Some(PickupKind::Currency));
        assert_eq!(planner.consider_column(20, &mut hf, &mut reg).pickup, None);
        assert_eq!(reg.collectibles().len(), 1);
    }

    #[test]
    fn separation_per_category_holds() {
        let cfg = SpawnConfig {
            currency_chance: 0.5,
            fuel_chance: 0.5,
            boost_chance: 0.3,
            decoration_chance: 0.7,
            ..SpawnConfig::default()
        };
        for seed in 0..16 {
            let (mut planner, mut hf, mut reg) = setup(&cfg, seed);
            let mut last: HashMap<&str, usize> = HashMap::new();
            for col in 0..3_000 {
                let placed = planner.consider_column(col, &mut hf, &mut reg);
                if let Some(kind) = placed.pickup {
                    let (key, sep) = match kind {
                        PickupKind::Currency => ("currency", cfg.currency_min_separation),
                        _ => ("pickup", cfg.pickup_min_separation),
                    };
                    if let Some(prev) = last.get(key) {
                        assert!(col - prev >= sep, "{key} too close: {prev} → {col}");
                    }
                    if let Some(prev) = last.get("any") {
                        if kind != PickupKind::Currency {
                            assert!(col - prev >= cfg.pickup_min_separation);
                        }
                    }
                    last.insert(key, col);
                    last.insert("any", col);
                }
                if placed.decoration.is_some() {
                    if let Some(prev) = last.get("decoration") {
                        assert!(col - prev >= cfg.decoration_min_separation);
                    }
                    last.insert("decoration", col);
                }
            }
        }
    }

    #[test]
    fn entities_sit_on_terrain() {
        let cfg = SpawnConfig {
            currency_chance: 1.0,
            decoration_chance: 1.0,
            ..SpawnConfig::default()
        };
        let (mut planner, mut hf, mut reg) = setup(&cfg, 4);
        planner.consider_column(30, &mut hf, &mut reg);

        let x = hf.column_to_world_x(30) + hf.tile_width() * 0.5;
        let ground = hf.interpolated_height_at(x);
        let coin = &reg.collectibles()[0];
        let prop = &reg.decorations()[0];
        assert_eq!(coin.world_position, Vec2::new(x, ground + cfg.collectible_clearance));
        assert_eq!(prop.world_position_base, Vec2::new(x, ground));
    }

    #[test]
    fn zero_chances_place_nothing() {
        let cfg = SpawnConfig {
            currency_chance: 0.0,
            fuel_chance: 0.0,
            boost_chance: 0.0,
            decoration_chance: 0.0,
            ..SpawnConfig::default()
        };
        let (mut planner, mut hf, mut reg) = setup(&cfg, 5);
        for col in 0..1_000 {
            planner.consider_column(col, &mut hf, &mut reg);
        }
        assert!(reg.collectibles().is_empty());
        assert!(reg.decorations().is_empty());
    }
}
