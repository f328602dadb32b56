//! the drive world – owns terrain, spawns, entities, vehicle & camera and
//! steps them in a fixed order every tick
//!
//! Per tick: vehicle integration → camera pursuit → terrain generation and
//! spawn planning → screen placement & culling → pickups → fuel check.

use std::ops::Range;

use bevy::log::info;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::CameraRig;
use crate::config::WorldConfig;
use crate::entities::{EntityRegistry, PickupKind, VisibleEntity};
use crate::spawn::SpawnPlanner;
use crate::terrain::HeightField;
use crate::vehicle::{Controls, Vehicle, VehicleState};

/// things the presentation layer may want to react to (sound, flashes)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    Pickup { kind: PickupKind, column: usize },
    Stopped,
}

/// `events` holds only what the latest `tick` produced; read it with
/// `drain_events` after each tick
#[derive(Resource)]
pub struct DriveWorld {
    cfg: WorldConfig,
    terrain: HeightField,
    planner: SpawnPlanner,
    registry: EntityRegistry,
    vehicle: Vehicle,
    camera: CameraRig,
    stopped: bool,
    events: Vec<WorldEvent>,
}

impl DriveWorld {
    /// `cfg` must pass `WorldConfig::validate`: a zero chunk size or an
    /// inverted range would hang or panic during generation
    pub fn new(cfg: &WorldConfig) -> Self {
        debug_assert!(cfg.validate().is_ok(), "invalid world config: {:?}", cfg.validate());
        let mut master = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let terrain_rng = StdRng::seed_from_u64(master.gen());
        let spawn_rng = StdRng::seed_from_u64(master.gen());

        let mut terrain = HeightField::new(&cfg.terrain, terrain_rng);
        terrain.generate(cfg.terrain.initial_columns);
        let ground = terrain.interpolated_height_at(cfg.vehicle.start_x);

        let mut world = Self {
            cfg: cfg.clone(),
            terrain,
            planner: SpawnPlanner::new(&cfg.spawn, spawn_rng),
            registry: EntityRegistry::new(cfg.spawn.collectible_size),
            vehicle: Vehicle::new(&cfg.vehicle, ground),
            camera: CameraRig::new(&cfg.camera),
            stopped: false,
            events: Vec::new(),
        };

        /* plan everything already generated, then everything the camera needs */
        let initial = world.terrain.len() - 1;
        for column in 0..initial {
            world
                .planner
                .consider_column(column, &mut world.terrain, &mut world.registry);
        }
        world.camera.mark_planned(initial);
        world
            .camera
            .stream(&mut world.terrain, &mut world.planner, &mut world.registry);
        world.registry.advance(world.camera.position_x);
        world
    }

    /// discard and rebuild every piece of mutable state in one go
    pub fn restart(&mut self) {
        let cfg = self.cfg.clone();
        *self = Self::new(&cfg);
        info!("world: restarted (seed {:?})", cfg.seed);
    }

    /* ===========================================================
       tick
       =========================================================== */
    pub fn tick(&mut self, dt: f32, controls: Controls) {
        self.events.clear();
        if self.stopped || dt <= 0.0 {
            return;
        }

        self.vehicle.step(dt, controls, &mut self.terrain);

        self.camera.follow(self.vehicle.world_x, dt);
        self.camera
            .stream(&mut self.terrain, &mut self.planner, &mut self.registry);

        let camera_x = self.camera.position_x;
        self.registry.advance(camera_x);
        self.registry.cull(camera_x, self.camera.cull_margin());

        let screen_box = shift_x(self.vehicle.bbox(), -camera_x);
        for (kind, column) in self.registry.resolve_collisions(screen_box, &mut self.vehicle) {
            self.events.push(WorldEvent::Pickup { kind, column });
        }

        if self.vehicle.out_of_fuel() {
            self.stopped = true;
            self.events.push(WorldEvent::Stopped);
            info!(
                "world: out of fuel after {} m with {} coins",
                self.vehicle.state().distance_m(),
                self.vehicle.coins
            );
        }
    }

    /* ===========================================================
       queries
       =========================================================== */
    pub fn terrain_height(&mut self, world_x: f32) -> f32 {
        self.terrain.height_at(world_x) as f32
    }

    pub fn terrain_interpolated_height(&mut self, world_x: f32) -> f32 {
        self.terrain.interpolated_height_at(world_x)
    }

    #[inline]
    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    #[inline]
    pub fn vehicle_state(&self) -> VehicleState {
        self.vehicle.state()
    }

    /// the vehicle box in screen space
    #[inline]
    pub fn vehicle_screen_box(&self) -> Rect {
        shift_x(self.vehicle.bbox(), -self.camera.position_x)
    }

    pub fn visible_entities(&self, world_x_range: Range<f32>) -> Vec<VisibleEntity> {
        self.registry.visible(world_x_range)
    }

    #[inline]
    pub fn camera_x(&self) -> f32 {
        self.camera.position_x
    }

    #[inline]
    pub fn view(&self) -> Range<f32> {
        self.camera.view()
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.cfg
    }

    /// hand over the events of the latest tick
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// place a pickup at a specific column (scripted layouts, tests);
    /// `false` when the column is already taken
    pub fn place_pickup(&mut self, column: usize, kind: PickupKind) -> bool {
        let x = self.terrain.column_to_world_x(column) + self.terrain.tile_width() * 0.5;
        let y = self.terrain.interpolated_height_at(x) + self.cfg.spawn.collectible_clearance;
        let placed = self.registry.insert_collectible(column, kind, Vec2::new(x, y));
        self.registry.advance(self.camera.position_x);
        placed
    }
}

#[inline]
fn shift_x(rect: Rect, dx: f32) -> Rect {
    let d = Vec2::new(dx, 0.0);
    Rect { min: rect.min + d, max: rect.max + d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_world_is_populated() {
        let world = DriveWorld::new(&WorldConfig::seeded(11));
        let state = world.vehicle_state();
        assert!(world.terrain().len() > world.config().terrain.initial_columns);
        assert_eq!(state.world_x, world.config().vehicle.start_x);
        assert_eq!(state.fuel, world.config().vehicle.fuel_max);
        assert!(!world.is_stopped());
        assert!(!world.visible_entities(0.0..f32::MAX).is_empty());
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut world = DriveWorld::new(&WorldConfig::seeded(12));
        let before = world.vehicle_state();
        world.tick(0.0, Controls::FORWARD);
        assert_eq!(world.vehicle_state(), before);
    }

    #[test]
    fn stopped_world_ignores_ticks() {
        let mut cfg = WorldConfig::seeded(13);
        cfg.vehicle.fuel_max = 0.01;
        let mut world = DriveWorld::new(&cfg);
        world.tick(1.0 / 60.0, Controls::FORWARD);
        assert!(world.is_stopped());
        assert_eq!(world.drain_events(), vec![WorldEvent::Stopped]);

        let frozen = world.vehicle_state();
        world.tick(1.0 / 60.0, Controls::FORWARD);
        assert_eq!(world.vehicle_state(), frozen);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn events_only_cover_the_latest_tick() {
        let mut world = DriveWorld::new(&WorldConfig::seeded(15));
        let column = world.terrain().column_of(world.vehicle_state().world_x);
        world.registry = EntityRegistry::new(world.cfg.spawn.collectible_size);
        assert!(world.place_pickup(column, PickupKind::Currency));

        world.tick(1.0 / 60.0, Controls::NONE);
        world.tick(1.0 / 60.0, Controls::NONE);
        assert_eq!(world.vehicle_state().coins, 1);
        assert!(world.drain_events().is_empty());

        assert!(world.place_pickup(column, PickupKind::Fuel));
        world.tick(1.0 / 60.0, Controls::NONE);
        assert_eq!(
            world.drain_events(),
            vec![WorldEvent::Pickup { kind: PickupKind::Fuel, column }]
        );
    }

    #[test]
    #[should_panic(expected = "invalid world config")]
    #[cfg(debug_assertions)]
    fn rejects_unvalidated_config() {
        let mut cfg = WorldConfig::seeded(16);
        cfg.terrain.chunk_columns = 0;
        let _ = DriveWorld::new(&cfg);
    }

    #[test]
    fn restart_clears_stop() {
        let mut cfg = WorldConfig::seeded(14);
        cfg.vehicle.fuel_max = 0.01;
        let mut world = DriveWorld::new(&cfg);
        world.tick(1.0 / 60.0, Controls::FORWARD);
        assert!(world.is_stopped());
        world.restart();
        assert!(!world.is_stopped());
        assert_eq!(world.vehicle_state().fuel, 0.01);
    }
}
