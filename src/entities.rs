//! live collectibles & decorations: screen placement, culling, pickups
use std::collections::HashSet;
use std::ops::Range;

use bevy::log::debug;
use bevy::math::{Rect, Vec2};

use crate::vehicle::Vehicle;

/* ===========================================================
   kinds
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Currency,
    Fuel,
    Boost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationVariant {
    Bush,
    Rock,
    Tree,
    Signpost,
}

impl DecorationVariant {
    pub const ALL: [Self; 4] = [Self::Bush, Self::Rock, Self::Tree, Self::Signpost];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Pickup(PickupKind),
    Decoration(DecorationVariant),
}

/* ===========================================================
   instances
   =========================================================== */
#[derive(Clone, Debug)]
pub struct Collectible {
    pub kind: PickupKind,
    pub column: usize,
    /// centre of the pickup
    pub world_position: Vec2,
    pub screen_rect: Rect,
    pub claimed: bool,
}

#[derive(Clone, Debug)]
pub struct Decoration {
    pub variant: DecorationVariant,
    pub column: usize,
    /// bottom‑centre, sitting on the terrain
    pub world_position_base: Vec2,
    pub screen_position: Vec2,
}

/// what the presentation layer needs to draw one entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleEntity {
    pub kind: EntityKind,
    pub column: usize,
    pub screen_position: Vec2,
}

/* ===========================================================
   registry
   =========================================================== */
pub struct EntityRegistry {
    collectibles: Vec<Collectible>,
    decorations: Vec<Decoration>,
    collectible_columns: HashSet<usize>,
    decoration_columns: HashSet<usize>,
    collectible_size: f32,
}

impl EntityRegistry {
    pub fn new(collectible_size: f32) -> Self {
        Self {
            collectibles: Vec::new(),
            decorations: Vec::new(),
            collectible_columns: HashSet::new(),
            decoration_columns: HashSet::new(),
            collectible_size,
        }
    }

    #[inline]
    pub fn holds_collectible(&self, column: usize) -> bool {
        self.collectible_columns.contains(&column)
    }

    #[inline]
    pub fn holds_decoration(&self, column: usize) -> bool {
        self.decoration_columns.contains(&column)
    }

    #[inline]
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    #[inline]
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// world-space box of a pickup centred on `centre`
    #[inline]
    fn pickup_rect(&self, centre: Vec2) -> Rect {
        Rect::from_center_size(centre, Vec2::splat(self.collectible_size))
    }

    /// returns `false` when the column is already taken
    pub fn insert_collectible(&mut self, column: usize, kind: PickupKind, world_position: Vec2) -> bool {
        if !self.collectible_columns.insert(column) {
            return false;
        }
        let screen_rect = self.pickup_rect(world_position);
        self.collectibles.push(Collectible {
            kind,
            column,
            world_position,
            screen_rect,
            claimed: false,
        });
        true
    }

    /// returns `false` when the column is already taken
    pub fn insert_decoration(&mut self, column: usize, variant: DecorationVariant, base: Vec2) -> bool {
        if !self.decoration_columns.insert(column) {
            return false;
        }
        self.decorations.push(Decoration {
            variant,
            column,
            world_position_base: base,
            screen_position: base,
        });
        true
    }

    /* ---------- per-tick ---------- */

    /// recompute every screen placement for the given camera offset
    pub fn advance(&mut self, camera_x: f32) {
        let shift = Vec2::new(camera_x, 0.0);
        let half = Vec2::splat(self.collectible_size * 0.5);
        for c in &mut self.collectibles {
            let centre = c.world_position - shift;
            c.screen_rect = Rect::from_corners(centre - half, centre + half);
        }
        for d in &mut self.decorations {
            d.screen_position = d.world_position_base - shift;
        }
    }

    /// drop everything that trails the camera by more than `margin`
    pub fn cull(&mut self, camera_x: f32, margin: f32) {
        let behind = |x: f32| x + margin < camera_x;

        let columns = &mut self.collectible_columns;
        self.collectibles.retain(|c| {
            let keep = !behind(c.world_position.x);
            if !keep {
                columns.remove(&c.column);
            }
            keep
        });

        let columns = &mut self.decoration_columns;
        self.decorations.retain(|d| {
            let keep = !behind(d.world_position_base.x);
            if !keep {
                columns.remove(&d.column);
            }
            keep
        });
    }

    /// claim every pickup whose screen box overlaps `vehicle_screen_box`
    pub fn resolve_collisions(
        &mut self,
        vehicle_screen_box: Rect,
        vehicle: &mut Vehicle,
    ) -> Vec<(PickupKind, usize)> {
        let mut claimed = Vec::new();
        for c in &mut self.collectibles {
            if c.claimed || c.screen_rect.intersect(vehicle_screen_box).is_empty() {
                continue;
            }
            vehicle.apply_pickup(c.kind);
            c.claimed = true;
            claimed.push((c.kind, c.column));
            debug!("pickup: {:?} at column {}", c.kind, c.column);
        }

        if !claimed.is_empty() {
            let columns = &mut self.collectible_columns;
            self.collectibles.retain(|c| {
                if c.claimed {
                    columns.remove(&c.column);
                }
                !c.claimed
            });
        }
        claimed
    }

    /// entities whose world x falls inside `world_x_range`
    pub fn visible(&self, world_x_range: Range<f32>) -> Vec<VisibleEntity> {
        let pickups = self
            .collectibles
            .iter()
            .filter(|c| world_x_range.contains(&c.world_position.x))
            .map(|c| VisibleEntity {
                kind: EntityKind::Pickup(c.kind),
                column: c.column,
                screen_position: c.screen_rect.center(),
            });
        let props = self
            .decorations
            .iter()
            .filter(|d| world_x_range.contains(&d.world_position_base.x))
            .map(|d| VisibleEntity {
                kind: EntityKind::Decoration(d.variant),
                column: d.column,
                screen_position: d.screen_position,
            });
        props.chain(pickups).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleConfig;

    fn registry() -> EntityRegistry {
        EntityRegistry::new(36.0)
    }

    #[test]
    fn one_collectible_per_column() {
        let mut reg = registry();
        assert!(reg.insert_collectible(5, PickupKind::Fuel, Vec2::new(352.0, 200.0)));
        assert!(!reg.insert_collectible(5, PickupKind::Currency, Vec2::new(352.0, 200.0)));
        assert!(reg.insert_decoration(5, DecorationVariant::Rock, Vec2::new(352.0, 100.0)));
        assert!(!reg.insert_decoration(5, DecorationVariant::Tree, Vec2::new(352.0, 100.0)));
        assert_eq!(reg.collectibles().len(), 1);
        assert_eq!(reg.decorations().len(), 1);
    }

    #[test]
    fn advance_shifts_by_camera() {
        let mut reg = registry();
        reg.insert_collectible(3, PickupKind::Currency, Vec2::new(500.0, 200.0));
        reg.insert_decoration(4, DecorationVariant::Bush, Vec2::new(600.0, 120.0));
        reg.advance(450.0);
        assert_eq!(reg.collectibles()[0].screen_rect.center(), Vec2::new(50.0, 200.0));
        assert_eq!(reg.decorations()[0].screen_position, Vec2::new(150.0, 120.0));
    }

    #[test]
    fn cull_releases_columns() {
        let mut reg = registry();
        reg.insert_collectible(1, PickupKind::Currency, Vec2::new(100.0, 200.0));
        reg.insert_collectible(20, PickupKind::Currency, Vec2::new(1300.0, 200.0));
        reg.insert_decoration(2, DecorationVariant::Tree, Vec2::new(160.0, 100.0));
        reg.cull(1000.0, 300.0);
        assert!(!reg.holds_collectible(1));
        assert!(!reg.holds_decoration(2));
        assert!(reg.holds_collectible(20));
        assert!(reg.decorations().is_empty());
    }

    #[test]
    fn collisions_apply_effects_and_remove() {
        let cfg = VehicleConfig::default();
        let mut vehicle = Vehicle::new(&cfg, 100.0);
        vehicle.fuel = 50.0;

        let mut reg = registry();
        reg.insert_collectible(3, PickupKind::Currency, Vec2::new(200.0, 120.0));
        reg.insert_collectible(4, PickupKind::Fuel, Vec2::new(260.0, 120.0));
        reg.insert_collectible(9, PickupKind::Boost, Vec2::new(900.0, 120.0));
        reg.advance(0.0);

        let hit = Rect::new(150.0, 100.0, 300.0, 140.0);
        let claimed = reg.resolve_collisions(hit, &mut vehicle);

        assert_eq!(claimed.len(), 2);
        assert_eq!(vehicle.coins, 1);
        assert_eq!(vehicle.fuel, 80.0);
        assert_eq!(vehicle.boost_time_remaining, 0.0);
        assert!(!reg.holds_collectible(3));
        assert!(!reg.holds_collectible(4));
        assert!(reg.holds_collectible(9));
    }

    #[test]
    fn visible_filters_by_world_range() {
        let mut reg = registry();
        reg.insert_collectible(1, PickupKind::Fuel, Vec2::new(100.0, 0.0));
        reg.insert_decoration(30, DecorationVariant::Signpost, Vec2::new(1950.0, 0.0));
        reg.advance(0.0);
        let seen = reg.visible(0.0..1000.0);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, EntityKind::Pickup(PickupKind::Fuel));
    }
}
