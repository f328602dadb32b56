//! height field – endless column heights, generated in chunks on demand
use bevy::log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::TerrainConfig;

/// column in progress of an elevation ramp
#[derive(Clone, Copy, Debug)]
struct Ramp {
    start: i32,
    target: i32,
    length: usize,
    done: usize,
}

impl Ramp {
    #[inline]
    fn climbing(&self) -> bool {
        self.target >= self.start
    }
}

/// append-only sequence of integer column heights (y-up, world units)
pub struct HeightField {
    columns: Vec<i32>,
    ramp: Option<Ramp>,
    cfg: TerrainConfig,
    rng: StdRng,
}

impl HeightField {
    /// empty field; call `generate` or any query to populate it
    pub fn new(cfg: &TerrainConfig, rng: StdRng) -> Self {
        Self {
            columns: Vec::with_capacity(cfg.initial_columns + cfg.chunk_columns),
            ramp: None,
            cfg: cfg.clone(),
            rng,
        }
    }

    /// field starting from a fixed layout; generation carries on after the
    /// last given column
    pub fn from_columns(cfg: &TerrainConfig, columns: Vec<i32>, rng: StdRng) -> Self {
        Self { columns, ramp: None, cfg: cfg.clone(), rng }
    }

    /* ---------- helpers ---------- */

    #[inline]
    pub fn tile_width(&self) -> f32 {
        self.cfg.tile_width
    }

    /// column containing `world_x`; negative x maps to column 0
    #[inline]
    pub fn column_of(&self, world_x: f32) -> usize {
        (world_x / self.cfg.tile_width).floor().max(0.0) as usize
    }

    /// left edge of a column in world units
    #[inline]
    pub fn column_to_world_x(&self, column: usize) -> f32 {
        column as f32 * self.cfg.tile_width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// already generated heights, for drawing
    #[inline]
    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    /// stored height without generating
    #[inline]
    pub fn get(&self, column: usize) -> Option<i32> {
        self.columns.get(column).copied()
    }

    /* ---------- queries ---------- */

    /// generate whole chunks until `column` exists
    pub fn ensure_column(&mut self, column: usize) {
        while self.columns.len() <= column {
            self.generate(self.cfg.chunk_columns);
        }
    }

    /// discrete height of the column under `world_x`
    pub fn height_at(&mut self, world_x: f32) -> i32 {
        let column = self.column_of(world_x);
        self.ensure_column(column);
        self.columns[column]
    }

    /// linear blend between the column under `world_x` and its right neighbour
    pub fn interpolated_height_at(&mut self, world_x: f32) -> f32 {
        let column = self.column_of(world_x);
        self.ensure_column(column + 1);

        let y0 = self.columns[column] as f32;
        let y1 = self.columns[column + 1] as f32;
        let t = ((world_x - self.column_to_world_x(column)) / self.cfg.tile_width).clamp(0.0, 1.0);
        y0 + (y1 - y0) * t
    }

    /* ---------- generation ---------- */

    /// append `count` new columns
    pub fn generate(&mut self, count: usize) {
        for _ in 0..count {
            let next = self.next_height();
            self.columns.push(next);
        }
        debug!("terrain: generated {} columns, length now {}", count, self.columns.len());
    }

    fn next_height(&mut self) -> i32 {
        let Some(&prev) = self.columns.last() else {
            return self.cfg.base_height;
        };
        let (max_step, jitter) = (self.cfg.max_step, self.cfg.jitter);

        if self.ramp.is_none() && self.rng.gen_bool(self.cfg.ramp_chance) {
            self.ramp = Some(self.start_ramp(prev));
        }

        let raw = match self.ramp.as_mut() {
            Some(ramp) => {
                ramp.done += 1;
                let t = ramp.done as f32 / ramp.length as f32;
                let along = ramp.start as f32 + (ramp.target - ramp.start) as f32 * t;
                let wobble = self.rng.gen_range(-(jitter / 2)..=jitter / 2);
                let mut h = along.round() as i32 + wobble;

                // jitter never walks a ramp backwards
                h = if ramp.climbing() { h.max(prev) } else { h.min(prev) };
                if ramp.done >= ramp.length {
                    self.ramp = None;
                }
                h
            }
            None => prev + self.rng.gen_range(-jitter..=jitter),
        };

        raw.clamp(prev - max_step, prev + max_step)
            .clamp(self.cfg.min_height, self.cfg.max_height)
    }

    fn start_ramp(&mut self, start: i32) -> Ramp {
        let cfg = &self.cfg;
        let magnitude = self.rng.gen_range(cfg.ramp_delta_min..=cfg.ramp_delta_max);
        let delta = if self.rng.gen_bool(cfg.ramp_climb_bias) { magnitude } else { -magnitude };
        let target = (start + delta).clamp(cfg.min_height, cfg.max_height);

        // stretch the run so the average step stays under the limiter
        let min_len = ((target - start).unsigned_abs() as usize).div_ceil(cfg.max_step as usize);
        let length = self
            .rng
            .gen_range(cfg.ramp_length_min..=cfg.ramp_length_max)
            .max(min_len)
            .max(1);

        debug!("terrain: ramp {} → {} over {} columns", start, target, length);
        Ramp { start, target, length, done: 0 }
    }
}
