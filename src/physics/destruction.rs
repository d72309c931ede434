use bevy::prelude::*;

use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::physics::collision::resolve_contacts;

/// Entities marked for teardown during a simulation step.
///
/// Rapier forbids world mutation while contact events are being produced, so
/// collapsing is split in two: `collapse` only records the entity here, and
/// the drain system (ordered strictly after the step and the resolver)
/// performs the actual despawn. The queue is an app-owned resource, not a
/// process global, so concurrent simulations (tests) stay independent.
#[derive(Resource, Debug, Default)]
pub struct DestructionQueue {
    pending: Vec<Entity>,
}

impl DestructionQueue {
    /// Idempotent enqueue: an entity collapsing twice within one step is
    /// drained once.
    pub fn collapse(&mut self, entity: Entity) {
        if !self.pending.contains(&entity) {
            self.pending.push(entity);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.pending.contains(&entity)
    }

    /// Takes the pending list in FIFO order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

pub struct DeferredDestructionPlugin;

impl Plugin for DeferredDestructionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DestructionQueue>().add_systems(
            Update,
            drain_destruction_queue
                .after(resolve_contacts)
                .in_set(PostPhysicsAdjustSet),
        );
    }
}

/// Drains the queue once per frame, after the physics step. Despawning is
/// recursive, so the Rapier body/collider and any sprite children are
/// released together. Entities that already vanished (level reset raced a
/// collapse) are skipped, making destruction idempotent.
pub fn drain_destruction_queue(mut commands: Commands, mut queue: ResMut<DestructionQueue>) {
    if queue.is_empty() {
        return;
    }
    for entity in queue.drain() {
        if let Ok(mut e) = commands.get_entity(entity) {
            debug!(target: "collision", "tearing down {entity:?}");
            e.despawn();
        }
    }
}
