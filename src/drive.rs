//! input → simulation tick, restart & quit

use bevy::app::AppExit;
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::column_stream::ColumnView;
use hill_drive::{Controls, DriveWorld, WorldEvent};

/* ===========================================================
   input (D / → throttle, A / ← brake & reverse)
   =========================================================== */
fn read_controls(keys: &ButtonInput<KeyCode>) -> Controls {
    Controls {
        forward: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        reverse: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
    }
}

/// one simulation step per fixed tick
pub fn drive_tick_system(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut world: ResMut<DriveWorld>,
) {
    world.tick(time.delta_secs(), read_controls(&keys));

    for event in world.drain_events() {
        match event {
            WorldEvent::Pickup { kind, column } => debug!("picked up {:?} at column {}", kind, column),
            WorldEvent::Stopped => info!("out of fuel – press R to restart or Q to quit"),
        }
    }
}

/* ===========================================================
   stopped screen keys
   =========================================================== */
pub fn game_over_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut world: ResMut<DriveWorld>,
    mut columns: ResMut<ColumnView>,
    mut exit: EventWriter<AppExit>,
) {
    if !world.is_stopped() {
        return;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        world.restart();
        columns.invalidate();
    } else if keys.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}
