use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;

use crate::app::menu::MenuPlugin;
use crate::app::state::{AppState, Paused};
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::gameplay::abilities::AbilityPlugin;
use crate::gameplay::level::{LevelLifecyclePlugin, ResetLevel};
use crate::gameplay::progress::ProgressPlugin;
use crate::gameplay::slingshot::SlingshotPlugin;
use crate::persistence::{PersistencePlugin, SaveRequest};
use crate::physics::collision::CollisionResolverPlugin;
use crate::physics::destruction::DeferredDestructionPlugin;
use crate::physics::rapier::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::sprites::SpriteAttachPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_resource::<Paused>()
            .configure_sets(
                Update,
                (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
            )
            .add_plugins((
                CameraPlugin,
                PhysicsSetupPlugin,
                CollisionResolverPlugin,
                DeferredDestructionPlugin,
                LevelLifecyclePlugin,
                SlingshotPlugin,
                AbilityPlugin,
                ProgressPlugin,
                MenuPlugin,
                PersistencePlugin,
                SpriteAttachPlugin,
                DebugPlugin,
            ))
            .add_systems(
                Update,
                handle_game_keys.run_if(in_state(AppState::Playing)),
            );
    }
}

/// In-level keys: Escape pauses (physics pipeline off, bodies intact),
/// T resets, S saves mid-level, Backspace abandons to the menu.
fn handle_game_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<Paused>,
    mut next_state: ResMut<NextState<AppState>>,
    mut rapier_cfg: Query<&mut RapierConfiguration>,
    mut resets: EventWriter<ResetLevel>,
    mut saves: EventWriter<SaveRequest>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        paused.0 = !paused.0;
        if let Ok(mut cfg) = rapier_cfg.single_mut() {
            cfg.physics_pipeline_active = !paused.0;
        }
        info!(target: "level", "paused: {}", paused.0);
        return;
    }
    if paused.0 {
        return;
    }
    if keys.just_pressed(KeyCode::KeyT) {
        resets.write(ResetLevel);
    }
    if keys.just_pressed(KeyCode::KeyS) {
        saves.write(SaveRequest);
    }
    if keys.just_pressed(KeyCode::Backspace) {
        next_state.set(AppState::MainMenu);
    }
}
