//! vehicle kinematics: throttle, brake, friction, fuel, boost & ground contact

use bevy::math::{Rect, Vec2};

use crate::config::VehicleConfig;
use crate::entities::PickupKind;
use crate::terrain::HeightField;

/// control inputs held during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub reverse: bool,
}

impl Controls {
    pub const NONE: Self = Self { forward: false, reverse: false };
    pub const FORWARD: Self = Self { forward: true, reverse: false };
    pub const REVERSE: Self = Self { forward: false, reverse: true };
}

/// read‑only snapshot for HUD rendering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    pub world_x: f32,
    pub world_y: f32,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub fuel: f32,
    pub fuel_max: f32,
    pub coins: u32,
    pub boost_remaining: f32,
}

impl VehicleState {
    /// metres travelled, 100 world units each
    #[inline]
    pub fn distance_m(&self) -> u32 {
        (self.world_x / 100.0).max(0.0) as u32
    }
}

pub struct Vehicle {
    pub world_x: f32,
    /// ground-contact point, y-up
    pub world_y: f32,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub fuel: f32,
    pub coins: u32,
    pub boost_time_remaining: f32,
    bbox: Rect,
    cfg: VehicleConfig,
}

impl Vehicle {
    pub fn new(cfg: &VehicleConfig, ground_y: f32) -> Self {
        let mut vehicle = Self {
            world_x: cfg.start_x,
            world_y: ground_y,
            velocity: Vec2::ZERO,
            on_ground: true,
            fuel: cfg.fuel_max,
            coins: 0,
            boost_time_remaining: 0.0,
            bbox: Rect::default(),
            cfg: cfg.clone(),
        };
        vehicle.refresh_bbox();
        vehicle
    }

    /// back to start-of-session kinematics, parked on `ground_y`
    pub fn reset(&mut self, ground_y: f32) {
        let cfg = self.cfg.clone();
        *self = Self::new(&cfg, ground_y);
    }

    /// world-space box, recomputed once per tick after integration
    #[inline]
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    #[inline]
    pub fn is_boosting(&self) -> bool {
        self.boost_time_remaining > 0.0
    }

    #[inline]
    pub fn out_of_fuel(&self) -> bool {
        self.fuel <= 0.0
    }

    pub fn state(&self) -> VehicleState {
        VehicleState {
            world_x: self.world_x,
            world_y: self.world_y,
            velocity: self.velocity,
            on_ground: self.on_ground,
            fuel: self.fuel,
            fuel_max: self.cfg.fuel_max,
            coins: self.coins,
            boost_remaining: self.boost_time_remaining,
        }
    }

    pub fn apply_pickup(&mut self, kind: PickupKind) {
        match kind {
            PickupKind::Currency => self.coins += 1,
            PickupKind::Fuel => {
                self.fuel = (self.fuel + self.cfg.fuel_pickup).min(self.cfg.fuel_max);
            }
            PickupKind::Boost => self.boost_time_remaining = self.cfg.boost_duration,
        }
    }

    fn refresh_bbox(&mut self) {
        let half_w = self.cfg.width * 0.5;
        self.bbox = Rect::new(
            self.world_x - half_w,
            self.world_y,
            self.world_x + half_w,
            self.world_y + self.cfg.height,
        );
    }

    /* ===========================================================
       integration
       =========================================================== */
    pub fn step(&mut self, dt: f32, controls: Controls, terrain: &mut HeightField) {
        if dt <= 0.0 {
            return;
        }
        let cfg = &self.cfg;

        /* ---- boost timer ---- */
        let boosting = self.is_boosting();
        self.boost_time_remaining = (self.boost_time_remaining - dt).max(0.0);
        let speed_mul = if boosting { cfg.boost_multiplier } else { 1.0 };

        /* ---- throttle / brake / friction ---- */
        // both keys cancel out; an empty tank gives no thrust
        let reversing = controls.reverse && !controls.forward;
        let accelerating = controls.forward && !controls.reverse && !self.out_of_fuel();
        let v = &mut self.velocity;
        if accelerating {
            let grip = if self.on_ground { 1.0 } else { cfg.air_control };
            v.x += cfg.acceleration * speed_mul * grip * dt;
        } else if reversing {
            v.x -= cfg.brake * dt;
        } else {
            v.x *= cfg.friction.powf(dt);
        }
        v.x = v.x.clamp(-cfg.max_speed * cfg.reverse_cap, cfg.max_speed * speed_mul);
        if !reversing {
            // backward motion only while reverse is held
            v.x = v.x.max(0.0);
        }

        /* ---- fuel ---- */
        if accelerating {
            let burn = if boosting { cfg.boost_fuel_multiplier } else { 1.0 };
            self.fuel = (self.fuel - cfg.fuel_decay * burn * dt).max(0.0);
        }

        /* ---- horizontal ---- */
        self.world_x += self.velocity.x * dt;
        if self.world_x < cfg.start_x {
            self.world_x = cfg.start_x;
            self.velocity.x = 0.0;
        }

        /* ---- vertical ---- */
        let ground = terrain.interpolated_height_at(self.world_x);
        if self.on_ground {
            // keep riding the surface unless momentum carries us off a crest
            let predicted = self.world_y + self.velocity.y * dt;
            if predicted > ground + cfg.ground_epsilon {
                self.world_y = predicted;
                self.on_ground = false;
            } else {
                self.velocity.y = (ground - self.world_y) / dt;
                self.world_y = ground;
            }
        } else {
            self.velocity.y += cfg.gravity * dt;
            self.world_y += self.velocity.y * dt;
            if self.world_y <= ground {
                self.world_y = ground;
                self.velocity.y = 0.0;
                self.on_ground = true;
            }
        }

        self.refresh_bbox();
    }
}
