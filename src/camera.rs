//! camera pursuit & look‑ahead streaming of terrain and spawns
use bevy::log::debug;

use crate::config::CameraConfig;
use crate::entities::EntityRegistry;
use crate::spawn::SpawnPlanner;
use crate::terrain::HeightField;

pub struct CameraRig {
    /// world x of the left screen edge, never negative
    pub position_x: f32,
    /// first column not yet offered to the spawn planner
    planned_until: usize,
    cfg: CameraConfig,
}

impl CameraRig {
    pub fn new(cfg: &CameraConfig) -> Self {
        Self { position_x: 0.0, planned_until: 0, cfg: cfg.clone() }
    }

    /// columns below `end` were already offered to the planner
    pub fn mark_planned(&mut self, end: usize) {
        self.planned_until = self.planned_until.max(end);
    }

    /// where the camera wants to be for a vehicle at `vehicle_x`
    #[inline]
    pub fn target_for(&self, vehicle_x: f32) -> f32 {
        (vehicle_x - self.cfg.screen_x + self.cfg.lead).max(0.0)
    }

    /// smoothed pursuit of the lead target
    pub fn follow(&mut self, vehicle_x: f32, dt: f32) {
        let target = self.target_for(vehicle_x);
        let blend = (self.cfg.smoothing * dt).clamp(0.0, 1.0);
        self.position_x = (self.position_x + (target - self.position_x) * blend).max(0.0);
    }

    /// world x range currently on screen
    #[inline]
    pub fn view(&self) -> std::ops::Range<f32> {
        self.position_x..self.position_x + self.cfg.view_width
    }

    #[inline]
    pub fn cull_margin(&self) -> f32 {
        self.cfg.cull_margin
    }

    /// column count the terrain must reach for the current camera
    pub fn required_columns(&self, terrain: &HeightField) -> usize {
        let camera_column = terrain.column_of(self.position_x);
        let view_columns = (self.cfg.view_width / terrain.tile_width()).ceil() as usize;
        camera_column + view_columns + self.cfg.look_ahead_columns
    }

    /// extend terrain ahead of the camera, then offer every new column to the planner
    pub fn stream(
        &mut self,
        terrain: &mut HeightField,
        planner: &mut SpawnPlanner,
        registry: &mut EntityRegistry,
    ) {
        let end = self.required_columns(terrain);
        // one spare column so the planner can interpolate at the last one
        terrain.ensure_column(end);

        if self.planned_until >= end {
            return;
        }
        debug!("stream: planning columns {}..{}", self.planned_until, end);
        for column in self.planned_until..end {
            planner.consider_column(column, terrain, registry);
        }
        self.planned_until = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SpawnConfig, TerrainConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn target_never_negative() {
        let rig = CameraRig::new(&CameraConfig { lead: 0.0, ..CameraConfig::default() });
        assert_eq!(rig.target_for(10.0), 0.0);
    }

    #[test]
    fn follow_converges_on_target() {
        let cfg = CameraConfig::default();
        let mut rig = CameraRig::new(&cfg);
        for _ in 0..600 {
            rig.follow(2_000.0, 1.0 / 60.0);
        }
        assert!((rig.position_x - rig.target_for(2_000.0)).abs() < 0.5);
    }

    #[test]
    fn large_dt_snaps_without_overshoot() {
        let mut rig = CameraRig::new(&CameraConfig::default());
        rig.follow(2_000.0, 10.0);
        assert_eq!(rig.position_x, rig.target_for(2_000.0));
    }

    #[test]
    fn stream_covers_look_ahead_and_plans_once() {
        let cfg = CameraConfig::default();
        let spawn = SpawnConfig::default();
        let mut rig = CameraRig::new(&cfg);
        let mut terrain = HeightField::new(&TerrainConfig::default(), StdRng::seed_from_u64(1));
        let mut planner = SpawnPlanner::new(&spawn, StdRng::seed_from_u64(2));
        let mut registry = EntityRegistry::new(spawn.collectible_size);

        rig.position_x = 5_000.0;
        rig.stream(&mut terrain, &mut planner, &mut registry);
        assert!(terrain.len() > rig.required_columns(&terrain));

        let spawned = registry.collectibles().len() + registry.decorations().len();
        assert!(spawned > 0);
        rig.stream(&mut terrain, &mut planner, &mut registry);
        assert_eq!(registry.collectibles().len() + registry.decorations().len(), spawned);
    }
}
