use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

use crate::app::state::{unpaused, AppState};
use crate::core::components::{Bird, Block, Destructible, LevelEntity};
use crate::core::level::registry::{ActiveLevel, LevelRegistry};
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::level::LevelRuntime;
use crate::physics::destruction::{drain_destruction_queue, DestructionQueue};

/// Launched birds count as spent once they sit still this long.
const REST_TIMEOUT_SECS: f32 = 2.0;
const REST_SPEED_EPSILON: f32 = 0.05;

/// Seconds a launched bird has spent (nearly) motionless.
#[derive(Component, Debug, Default)]
pub struct RestTimer(f32);

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (retire_spent_birds, check_level_outcome)
                .chain()
                .after(drain_destruction_queue)
                .in_set(PostPhysicsAdjustSet)
                .run_if(in_state(AppState::Playing).and(unpaused)),
        );
    }
}

/// A launched bird that has come to rest is finished: collapse it through the
/// queue so the next bird can take the sling.
fn retire_spent_birds(
    mut commands: Commands,
    time: Res<Time>,
    mut queue: ResMut<DestructionQueue>,
    mut birds: Query<(Entity, &Destructible, &Velocity, Option<&mut RestTimer>), With<Bird>>,
) {
    for (entity, state, velocity, timer) in birds.iter_mut() {
        if !state.launched {
            continue;
        }
        let at_rest = velocity.linvel.length() < REST_SPEED_EPSILON;
        match timer {
            Some(mut timer) => {
                if at_rest {
                    timer.0 += time.delta_secs();
                    if timer.0 >= REST_TIMEOUT_SECS {
                        queue.collapse(entity);
                    }
                } else {
                    timer.0 = 0.0;
                }
            }
            None => {
                commands.entity(entity).insert(RestTimer::default());
            }
        }
    }
}

/// Win when every block is gone; lose when the birds ran out first. Runs
/// after the drain so the live entity set is settled for this frame.
fn check_level_outcome(
    runtime: Option<Res<LevelRuntime>>,
    mut registry: Option<ResMut<LevelRegistry>>,
    queue: Res<DestructionQueue>,
    blocks: Query<(), (With<Block>, With<LevelEntity>)>,
    birds: Query<(), (With<Bird>, With<LevelEntity>)>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(runtime) = runtime else {
        return;
    };
    let Some(registry) = registry.as_deref_mut() else {
        return;
    };
    if !queue.is_empty() {
        return;
    }

    if blocks.is_empty() {
        info!(target: "level", "level cleared ({} blocks down)", runtime.block_total);
        if let Some(ActiveLevel::Campaign(i)) = registry.active {
            registry.clear_snapshot(i);
            registry.unlock_next();
        }
        registry.active = None;
        next_state.set(AppState::MainMenu);
        return;
    }

    if birds.is_empty() && runtime.bird_total > 0 {
        info!(target: "level", "out of birds; structure stands");
        if let Some(ActiveLevel::Campaign(i)) = registry.active {
            registry.clear_snapshot(i);
        }
        registry.active = None;
        next_state.set(AppState::MainMenu);
    }
}
