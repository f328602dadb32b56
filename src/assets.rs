//! sprite sources – a real image when the file exists, a flat colour otherwise
use std::path::Path;

use bevy::prelude::*;

use hill_drive::{DecorationVariant, EntityKind, PickupKind};

const ASSET_DIR: &str = "assets";

#[derive(Clone)]
pub enum SpriteSource {
    Image(Handle<Image>),
    Fallback(Color),
}

impl SpriteSource {
    fn pick(asset_server: &AssetServer, path: &str, fallback: Color) -> Self {
        if Path::new(ASSET_DIR).join(path).exists() {
            Self::Image(asset_server.load(path.to_owned()))
        } else {
            warn!("assets: {} missing, drawing a flat colour", path);
            Self::Fallback(fallback)
        }
    }

    pub fn sprite(&self, size: Vec2) -> Sprite {
        match self {
            Self::Image(handle) => Sprite {
                image: handle.clone(),
                custom_size: Some(size),
                ..default()
            },
            Self::Fallback(color) => Sprite {
                color: *color,
                custom_size: Some(size),
                ..default()
            },
        }
    }
}

#[derive(Resource)]
pub struct SpriteAssets {
    pub vehicle: SpriteSource,
    coin: SpriteSource,
    fuel: SpriteSource,
    boost: SpriteSource,
    decorations: [SpriteSource; 4],
}

impl SpriteAssets {
    pub fn for_kind(&self, kind: EntityKind) -> &SpriteSource {
        match kind {
            EntityKind::Pickup(PickupKind::Currency) => &self.coin,
            EntityKind::Pickup(PickupKind::Fuel) => &self.fuel,
            EntityKind::Pickup(PickupKind::Boost) => &self.boost,
            EntityKind::Decoration(v) => &self.decorations[v as usize],
        }
    }
}

/// footprint of a drawn entity (pickups square, decorations per variant)
pub fn entity_size(kind: EntityKind, pickup_size: f32) -> Vec2 {
    match kind {
        EntityKind::Pickup(_) => Vec2::splat(pickup_size),
        EntityKind::Decoration(DecorationVariant::Bush) => Vec2::new(48.0, 28.0),
        EntityKind::Decoration(DecorationVariant::Rock) => Vec2::new(40.0, 24.0),
        EntityKind::Decoration(DecorationVariant::Tree) => Vec2::new(44.0, 96.0),
        EntityKind::Decoration(DecorationVariant::Signpost) => Vec2::new(12.0, 56.0),
    }
}

pub fn load_sprite_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    let pick = |path: &str, fallback: Color| SpriteSource::pick(&asset_server, path, fallback);
    commands.insert_resource(SpriteAssets {
        vehicle: pick("car.png", Color::srgb(0.86, 0.86, 0.86)),
        coin: pick("coin.png", Color::srgb(0.94, 0.86, 0.08)),
        fuel: pick("fuel.png", Color::srgb(0.78, 0.0, 0.0)),
        boost: pick("boost.png", Color::srgb(0.47, 0.78, 1.0)),
        decorations: [
            pick("bush.png", Color::srgb(0.16, 0.52, 0.14)),
            pick("rock.png", Color::srgb(0.45, 0.45, 0.47)),
            pick("tree.png", Color::srgb(0.10, 0.40, 0.12)),
            pick("sign.png", Color::srgb(0.55, 0.36, 0.16)),
        ],
    });
}
