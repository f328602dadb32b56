//! camera, vehicle & entity sprites – mirrors `DriveWorld` onto the screen

use bevy::prelude::*;

use crate::assets::{entity_size, SpriteAssets};
use crate::components::{EntitySprite, VehicleSprite};
use crate::VIEW_HEIGHT;
use hill_drive::{DriveWorld, EntityKind, PickupKind};

/// keeps half‑visible entities drawn at the screen edges
const EDGE_SLACK: f32 = 100.0;
/// coin bob: radians per second & peak lift in pixels
const COIN_BOB_RATE: f32 = 3.5;
const COIN_BOB_HEIGHT: f32 = 6.0;

/// vertical lift of a coin, phase‑shifted per column so rows don't bob in sync
#[inline]
fn coin_bob(elapsed: f32, column: usize) -> f32 {
    COIN_BOB_HEIGHT * (0.5 + 0.5 * (elapsed * COIN_BOB_RATE + column as f32).sin())
}

/// pixel snapping helper – keeps the camera on whole pixels so sprites never
/// land on half‑pixels and shimmer
#[inline]
fn snap(v: f32) -> f32 {
    v.round()
}

pub fn setup_view(mut commands: Commands, world: Res<DriveWorld>, assets: Res<SpriteAssets>) {
    commands.spawn(Camera2d);

    let cfg = &world.config().vehicle;
    commands.spawn((
        assets.vehicle.sprite(Vec2::new(cfg.width, cfg.height)),
        Transform::from_xyz(0.0, 0.0, 10.0),
        VehicleSprite,
    ));
}

/// the Bevy camera tracks the world's camera rig
///
/// NOTE: runs in **PostUpdate**, after the simulation stepped.
pub fn camera_follow_system(
    mut cam_q: Query<&mut Transform, With<Camera2d>>,
    world: Res<DriveWorld>,
) {
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };
    let half_w = world.config().camera.view_width * 0.5;

    cam_tf.translation.x = snap(world.camera_x() + half_w);
    cam_tf.translation.y = snap(VIEW_HEIGHT * 0.5);
}

pub fn vehicle_sprite_system(
    mut q: Query<&mut Transform, With<VehicleSprite>>,
    world: Res<DriveWorld>,
) {
    let Ok(mut tf) = q.get_single_mut() else { return };
    let state = world.vehicle_state();
    let h = world.config().vehicle.height;
    tf.translation.x = state.world_x;
    tf.translation.y = state.world_y + h * 0.5;
}

/// re‑assign pooled sprites to whatever is visible this frame
pub fn entity_sprite_system(
    mut commands: Commands,
    mut q: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<EntitySprite>>,
    world: Res<DriveWorld>,
    assets: Res<SpriteAssets>,
    time: Res<Time>,
) {
    let elapsed = time.elapsed_secs();
    let camera_x = world.camera_x();
    let pickup_size = world.config().spawn.collectible_size;
    let window = world.view();
    let visible = world.visible_entities(window.start - EDGE_SLACK..window.end + EDGE_SLACK);

    let mut pool = q.iter_mut();
    for e in &visible {
        let size = entity_size(e.kind, pickup_size);
        let sprite = assets.for_kind(e.kind).sprite(size);

        // pickups are centred, decorations stand on their base
        let (x, y, z) = match e.kind {
            EntityKind::Pickup(PickupKind::Currency) => (
                e.screen_position.x + camera_x,
                e.screen_position.y + coin_bob(elapsed, e.column),
                6.0,
            ),
            EntityKind::Pickup(_) => (e.screen_position.x + camera_x, e.screen_position.y, 6.0),
            EntityKind::Decoration(_) => {
                (e.screen_position.x + camera_x, e.screen_position.y + size.y * 0.5, 2.0)
            }
        };
        let transform = Transform::from_xyz(x, y, z);

        match pool.next() {
            Some((mut spr, mut tf, mut vis)) => {
                *spr = sprite;
                *tf = transform;
                *vis = Visibility::Visible;
            }
            None => {
                commands.spawn((sprite, transform, EntitySprite));
            }
        }
    }
    for (_, _, mut vis) in pool {
        *vis = Visibility::Hidden;
    }
}
