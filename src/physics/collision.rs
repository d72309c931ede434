use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::Destructible;
use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::physics::destruction::DestructionQueue;

/// Consumes Rapier's contact-force events and turns them into health
/// mutations. Damage is applied synchronously here; teardown never is (the
/// queue handles it after the step).
pub struct CollisionResolverPlugin;

impl Plugin for CollisionResolverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DestructionQueue>()
            .add_systems(Update, resolve_contacts.in_set(PostPhysicsAdjustSet));
    }
}

/// One contact event damages both participants. A side without a
/// `Destructible` (ground, sling frame) is skipped, not an error.
pub fn resolve_contacts(
    mut contacts: EventReader<ContactForceEvent>,
    mut victims: Query<&mut Destructible>,
    mut queue: ResMut<DestructionQueue>,
    cfg: Res<GameConfig>,
) {
    for ev in contacts.read() {
        let force = ev.total_force_magnitude * cfg.damage.force_scale;
        for entity in [ev.collider1, ev.collider2] {
            let Ok(mut victim) = victims.get_mut(entity) else {
                continue;
            };
            if victim.apply_collision(force, &cfg.damage) {
                info!(
                    target: "collision",
                    "{entity:?} collapsed (force {force:.2}, health {:.2})",
                    victim.health
                );
                queue.collapse(entity);
            } else if force >= cfg.damage.threshold {
                debug!(
                    target: "collision",
                    "{entity:?} damaged (force {force:.2}, health {:.2})",
                    victim.health
                );
            }
        }
    }
}
