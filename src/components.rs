use bevy::prelude::*;

/* ===========================================================
   vehicle
   =========================================================== */
#[derive(Component)]
pub struct VehicleSprite;

/* ===========================================================
   terrain helper components
   =========================================================== */
#[derive(Component)]
pub struct ColumnSprite {
    pub column: usize,
}

/* ===========================================================
   pickups & decorations (pooled, re‑assigned every frame)
   =========================================================== */
#[derive(Component)]
pub struct EntitySprite;

/* ===========================================================
   hud
   =========================================================== */
#[derive(Component)]
pub struct HudText;

/// inner fill of the fuel gauge
#[derive(Component)]
pub struct FuelBar;
