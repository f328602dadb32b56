//! one‑line HUD, fuel gauge & the out‑of‑fuel prompt
use bevy::prelude::*;

use crate::components::{FuelBar, HudText};
use hill_drive::DriveWorld;

const GAUGE_WIDTH: f32 = 200.0;
const GAUGE_HEIGHT: f32 = 14.0;
/// fraction of a full tank below which the gauge turns red
const LOW_FUEL: f32 = 0.3;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont { font_size: 22.0, ..default() },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(20.0),
            ..default()
        },
        HudText,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(48.0),
                left: Val::Px(20.0),
                width: Val::Px(GAUGE_WIDTH),
                height: Val::Px(GAUGE_HEIGHT),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|gauge| {
            gauge.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.2, 0.8, 0.3)),
                FuelBar,
            ));
        });
}

pub fn fuel_bar_system(
    mut q: Query<(&mut Node, &mut BackgroundColor), With<FuelBar>>,
    world: Res<DriveWorld>,
) {
    let Ok((mut node, mut color)) = q.get_single_mut() else { return };
    let s = world.vehicle_state();
    let frac = (s.fuel / s.fuel_max).clamp(0.0, 1.0);

    node.width = Val::Percent(frac * 100.0);
    color.0 = if frac < LOW_FUEL {
        Color::srgb(0.9, 0.2, 0.2)
    } else {
        Color::srgb(0.2, 0.8, 0.3)
    };
}

pub fn hud_system(mut q: Query<(&mut Text, &mut TextColor), With<HudText>>, world: Res<DriveWorld>) {
    let Ok((mut text, mut color)) = q.get_single_mut() else { return };
    let s = world.vehicle_state();

    if world.is_stopped() {
        **text = format!(
            "OUT OF FUEL  |  {} m  |  {} coins  |  R restart, Q quit",
            s.distance_m(),
            s.coins
        );
        color.0 = Color::srgb(1.0, 0.24, 0.24);
        return;
    }

    let fuel_pct = (s.fuel / s.fuel_max * 100.0).round() as u32;
    let mut line = format!("coins {}  |  {} m  |  fuel {}%", s.coins, s.distance_m(), fuel_pct);
    if s.boost_remaining > 0.0 {
        line.push_str(&format!("  |  boost {:.0}s", s.boost_remaining.ceil()));
    }
    **text = line;
    color.0 = if (fuel_pct as f32) < LOW_FUEL * 100.0 { Color::srgb(1.0, 0.6, 0.6) } else { Color::WHITE };
}
