use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::{unpaused, AppState};
use crate::core::components::{Bird, BirdAbility, Destructible};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::slingshot::AbilityRequest;
use crate::gameplay::structure::{spawn_bird, BirdSeed};
use crate::physics::destruction::DestructionQueue;

pub struct AbilityPlugin;

impl Plugin for AbilityPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            trigger_ability
                .in_set(PrePhysicsSet)
                .run_if(in_state(AppState::Playing).and(unpaused)),
        );
    }
}

/// Fires the in-flight bird's one-shot capability. The "in-flight" bird is
/// the latest launched one that has not used its ability yet.
fn trigger_ability(
    mut commands: Commands,
    mut requests: EventReader<AbilityRequest>,
    cfg: Res<GameConfig>,
    mut queue: ResMut<DestructionQueue>,
    mut birds: Query<(Entity, &mut Bird, &Destructible, &Transform, &mut Velocity)>,
    mut dynamics: Query<(&Transform, &mut Velocity), Without<Bird>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let flying = birds
        .iter_mut()
        .filter(|(_, bird, state, _, _)| state.launched && !bird.ability_used)
        .max_by_key(|(_, bird, _, _, _)| bird.order);
    let Some((entity, mut bird, _, transform, mut velocity)) = flying else {
        return;
    };
    bird.ability_used = true;
    let origin = transform.translation.truncate();
    info!(target: "sling", "bird {} ability {:?}", bird.order, bird.ability);

    match bird.ability {
        BirdAbility::None => {}
        BirdAbility::Explode => {
            explode(&cfg, origin, &mut dynamics);
            // The bomb spends itself.
            queue.collapse(entity);
        }
        BirdAbility::Accelerate => {
            velocity.linvel *= cfg.abilities.accelerate_factor;
        }
        BirdAbility::Split => {
            let spread = cfg.abilities.split_spread;
            let count = cfg.abilities.split_count;
            for i in 0..count {
                // Fan the fragments around the parent's heading.
                let offset = (i as f32 - (count as f32 - 1.0) / 2.0) * spread;
                let linvel = Vec2::from_angle(offset).rotate(velocity.linvel);
                let seed = BirdSeed {
                    ability: BirdAbility::None,
                    health: cfg.bird.health,
                    density: bird.density,
                    diameter: bird.diameter * 0.7,
                    texture_path: bird.texture_path.clone(),
                    position: origin + Vec2::new(0.0, (i + 1) as f32 * 0.1),
                    launched: true,
                    order: bird.order,
                };
                let fragment = spawn_bird(&mut commands, &seed);
                commands.entity(fragment).insert(Velocity::linear(linvel));
            }
        }
    }
}

/// Radial velocity kick with distance falloff applied to every dynamic body
/// in range.
fn explode(
    cfg: &GameConfig,
    origin: Vec2,
    dynamics: &mut Query<(&Transform, &mut Velocity), Without<Bird>>,
) {
    let blast = &cfg.abilities.explosion;
    let r2 = blast.radius * blast.radius;
    for (tf, mut vel) in dynamics.iter_mut() {
        let pos = tf.translation.truncate();
        let d2 = pos.distance_squared(origin);
        if d2 > r2 {
            continue;
        }
        let d = d2.sqrt();
        let dir = if d < 1e-4 {
            Vec2::Y
        } else {
            (pos - origin) / d
        };
        let norm = (1.0 - d / blast.radius).powf(blast.falloff_exp.max(0.1));
        vel.linvel += dir * blast.impulse * norm;
    }
}
