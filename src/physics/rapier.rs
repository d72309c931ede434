use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Wrapper configuring Rapier for the game: gravity comes from `GameConfig`,
/// everything else stays at engine defaults. The engine is treated as a black
/// box; the one invariant we rely on is that the world must never be mutated
/// while contact events are being produced (see `physics::destruction`).
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .add_systems(Startup, configure_gravity);
    }
}

fn configure_gravity(
    mut rapier_cfg: Query<&mut RapierConfiguration>,
    game_cfg: Res<GameConfig>,
) {
    if let Ok(mut cfg) = rapier_cfg.single_mut() {
        cfg.gravity = Vect::new(game_cfg.gravity.x, game_cfg.gravity.y);
    }
}
