//! minimal bootstrap for the hill drive demo
//!
//! The simulation lives in the `hill_drive` library; everything here only
//! polls keys, steps `DriveWorld` on a fixed clock and mirrors it to sprites.
//! Works with **Bevy 0.15**.

mod assets;
mod column_stream;
mod components;
mod drive;
mod hud;
mod view;

use std::path::PathBuf;

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
    LogDiagnosticsPlugin,
};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use assets::load_sprite_assets;
use column_stream::{draw_surface_system, stream_columns_system, ColumnView};
use drive::{drive_tick_system, game_over_input_system};
use hill_drive::constants::VIEW_WIDTH;
use hill_drive::{DriveWorld, WorldConfig};
use hud::{fuel_bar_system, hud_system, setup_hud};
use view::{camera_follow_system, entity_sprite_system, setup_view, vehicle_sprite_system};

pub const VIEW_HEIGHT: f32 = 600.0;
const TICK_HZ: f64 = 60.0;
const CONFIG_FILE: &str = "hill_drive.toml";
const CONFIG_ENV: &str = "HILL_DRIVE_CONFIG";

/* ------------------------------------------------------------------------ */
/* world + config                                                           */
/* ------------------------------------------------------------------------ */
fn load_config() -> WorldConfig {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    if !path.exists() {
        info!("config: {} not found, using defaults", path.display());
        return WorldConfig::default();
    }
    match WorldConfig::load(&path) {
        Ok(cfg) => {
            info!("config: loaded {}", path.display());
            cfg
        }
        Err(err) => {
            error!("{err}; falling back to defaults");
            WorldConfig::default()
        }
    }
}

fn setup_world(mut commands: Commands) {
    let cfg = load_config();
    let noise_seed = cfg.seed.map_or_else(rand::random::<u32>, |s| s as u32);

    commands.insert_resource(ColumnView::new(noise_seed));
    commands.insert_resource(DriveWorld::new(&cfg));
}

/* ------------------------------------------------------------------------ */
/* F11 borderless‑fullscreen toggle                                         */
/* ------------------------------------------------------------------------ */
fn toggle_fullscreen(
    keys: Res<ButtonInput<KeyCode>>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::F11) {
        let Ok(mut window) = window_q.get_single_mut() else { return };
        window.mode = match window.mode {
            WindowMode::Windowed => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
            }
            _ => WindowMode::Windowed,
        };
    }
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::srgb(0.47, 0.78, 1.0)))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hill Drive".into(),
                resolution: (VIEW_WIDTH, VIEW_HEIGHT).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))

        /* startup systems ------------------------------------------------- */
        .add_systems(Startup, (setup_world, load_sprite_assets, setup_hud))
        .add_systems(
            Startup,
            setup_view.after(setup_world).after(load_sprite_assets),
        )

        /* fixed‑rate simulation ------------------------------------------ */
        .add_systems(FixedUpdate, drive_tick_system)

        /* frame‑update systems ------------------------------------------- */
        .add_systems(
            Update,
            (
                game_over_input_system,        // R / Q once stopped
                toggle_fullscreen,
                hud_system,
                fuel_bar_system,
            ),
        )

        /* post‑update (camera / sprites) --------------------------------- */
        .add_systems(
            PostUpdate,
            (
                camera_follow_system,
                vehicle_sprite_system,
                entity_sprite_system,
                stream_columns_system,         // range‑diff column sprites
                draw_surface_system,
            ),
        )
        .run();
}
