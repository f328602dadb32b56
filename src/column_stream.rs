//! run‑time terrain column sprites: range differencing + pooling
//!
//! Only columns inside the camera window own a sprite. Columns entering the
//! window take a pooled sprite (or spawn one), columns leaving it hand theirs
//! back hidden.

use std::collections::HashMap;

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};

use crate::components::ColumnSprite;
use hill_drive::DriveWorld;

/// -------- colour‑variation --------
const COLOR_NOISE_SCALE: f64 = 0.05;
const COLOR_VARIATION_LEVELS: i32 = 4;
const COLOR_VARIATION_STRENGTH: f32 = 0.2;

/// first columns are drawn as street
const STREET_COLUMNS: usize = 20;

const GROUND_RGB: Vec3 = Vec3::new(0.63, 0.39, 0.20);
const STREET_RGB: Vec3 = Vec3::new(0.47, 0.47, 0.47);
const SURFACE_COLOR: Color = Color::srgb(0.20, 0.55, 0.16);

#[derive(Resource)]
pub struct ColumnView {
    sprites: HashMap<usize, Entity>,
    free_sprites: Vec<Entity>,
    last_range: Option<(usize, usize)>,
    color_noise: Perlin,
}

impl ColumnView {
    pub fn new(seed: u32) -> Self {
        Self {
            sprites: HashMap::new(),
            free_sprites: Vec::new(),
            last_range: None,
            color_noise: Perlin::new(seed),
        }
    }

    /// forget the drawn range so the next pass redraws every column
    pub fn invalidate(&mut self) {
        self.last_range = None;
    }

    fn release(&mut self, commands: &mut Commands, column: usize) {
        if let Some(e) = self.sprites.remove(&column) {
            commands.entity(e).insert(Visibility::Hidden);
            self.free_sprites.push(e);
        }
    }
}

/* ===========================================================
   helpers
   =========================================================== */
#[inline]
fn column_color(view: &ColumnView, column: usize) -> Color {
    let raw = view
        .color_noise
        .get([column as f64 * COLOR_NOISE_SCALE, 0.5]) as f32;

    /* bucket‑based colour banding */
    let step = (((raw + 1.0) * 0.5) * COLOR_VARIATION_LEVELS as f32)
        .floor()
        .clamp(0.0, (COLOR_VARIATION_LEVELS - 1) as f32);
    let norm = step / (COLOR_VARIATION_LEVELS as f32 - 1.0) * 2.0 - 1.0;
    let factor = 1.0 + norm * COLOR_VARIATION_STRENGTH;

    let base = if column < STREET_COLUMNS { STREET_RGB } else { GROUND_RGB } * factor;
    Color::srgb(
        base.x.clamp(0.0, 1.0),
        base.y.clamp(0.0, 1.0),
        base.z.clamp(0.0, 1.0),
    )
}

fn column_bundle(view: &ColumnView, tile: f32, column: usize, height: i32) -> (Sprite, Transform) {
    let h = height.max(1) as f32;
    (
        Sprite {
            color: column_color(view, column),
            custom_size: Some(Vec2::new(tile, h)),
            ..default()
        },
        Transform::from_xyz(column as f32 * tile + tile * 0.5, h * 0.5, 0.0),
    )
}

fn ensure_sprite(commands: &mut Commands, view: &mut ColumnView, tile: f32, column: usize, height: i32) {
    if view.sprites.contains_key(&column) {
        return;
    }
    let (sprite, transform) = column_bundle(view, tile, column, height);
    let entity = if let Some(e) = view.free_sprites.pop() {
        commands
            .entity(e)
            .insert((Visibility::Visible, sprite, transform, ColumnSprite { column }));
        e
    } else {
        commands.spawn((sprite, transform, ColumnSprite { column })).id()
    };
    view.sprites.insert(column, entity);
}

/* ===========================================================
   stream_columns_system – range differencing + pooling
   =========================================================== */
pub fn stream_columns_system(
    mut commands: Commands,
    world: Res<DriveWorld>,
    mut view: ResMut<ColumnView>,
) {
    let terrain = world.terrain();
    let tile = terrain.tile_width();
    let window = world.view();
    let new = (
        terrain.column_of(window.start),
        (terrain.column_of(window.end) + 1).min(terrain.len().saturating_sub(1)),
    );
    if view.last_range == Some(new) {
        return;
    }

    /* full redraw (startup or restart) ----------------------------------- */
    let Some(prev) = view.last_range else {
        let drawn: Vec<usize> = view.sprites.keys().copied().collect();
        for column in drawn {
            view.release(&mut commands, column);
        }
        for column in new.0..=new.1 {
            if let Some(h) = terrain.get(column) {
                ensure_sprite(&mut commands, &mut view, tile, column, h);
            }
        }
        view.last_range = Some(new);
        return;
    };

    /* columns leaving view (re‑pool) ------------------------------------- */
    for column in prev.0..=prev.1 {
        if column < new.0 || column > new.1 {
            view.release(&mut commands, column);
        }
    }

    /* columns entering view ---------------------------------------------- */
    for column in new.0..=new.1 {
        if column < prev.0 || column > prev.1 {
            if let Some(h) = terrain.get(column) {
                ensure_sprite(&mut commands, &mut view, tile, column, h);
            }
        }
    }

    view.last_range = Some(new);
}

/* ===========================================================
   draw_surface_system – smooth outline over the stepped columns
   =========================================================== */
pub fn draw_surface_system(mut gizmos: Gizmos, world: Res<DriveWorld>) {
    let terrain = world.terrain();
    let tile = terrain.tile_width();
    let window = world.view();
    let first = terrain.column_of(window.start);
    let last = (terrain.column_of(window.end) + 1).min(terrain.len().saturating_sub(1));

    let points = (first..=last)
        .filter_map(|c| terrain.get(c).map(|h| Vec2::new(c as f32 * tile, h as f32)));
    gizmos.linestrip_2d(points, SURFACE_COLOR);
}
