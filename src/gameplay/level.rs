use bevy::prelude::*;

use crate::app::state::{AppState, Paused};
use crate::core::components::LevelEntity;
use crate::core::config::GameConfig;
use crate::core::level::registry::{ActiveLevel, LevelRegistry, LevelSlot};
use crate::gameplay::structure::{
    spawn_birds, spawn_birds_from_snapshot, spawn_blocks_from_snapshot, spawn_ground,
    spawn_structure,
};
use crate::physics::destruction::DestructionQueue;

/// Live bookkeeping for the instantiated level.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LevelRuntime {
    pub block_total: u32,
    pub bird_total: u32,
}

/// Discard the current level's bodies and rebuild from the blueprint (replay).
#[derive(Event, Debug, Default)]
pub struct ResetLevel;

pub struct LevelLifecyclePlugin;

impl Plugin for LevelLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ResetLevel>()
            .init_resource::<DestructionQueue>()
            .init_resource::<Paused>()
            .add_systems(OnEnter(AppState::Playing), spawn_active_level)
            .add_systems(OnExit(AppState::Playing), teardown_level)
            .add_systems(Update, handle_reset.run_if(in_state(AppState::Playing)));
    }
}

/// Builds the ECS side of one level slot: ground, structure, birds. A slot
/// with a snapshot restores logical state (health, positions) into freshly
/// created bodies; otherwise the blueprint is built from scratch.
fn spawn_level_from_slot(
    commands: &mut Commands,
    cfg: &GameConfig,
    slot: &LevelSlot,
) -> LevelRuntime {
    spawn_ground(commands);
    match &slot.snapshot {
        Some(snapshot) => {
            let block_total = spawn_blocks_from_snapshot(commands, cfg, &snapshot.blocks);
            let bird_total = spawn_birds_from_snapshot(commands, cfg, &snapshot.birds);
            info!(
                target: "level",
                "level restored from snapshot: {block_total} blocks, {bird_total} birds"
            );
            LevelRuntime {
                block_total,
                bird_total,
            }
        }
        None => {
            let block_total = spawn_structure(commands, cfg, &slot.spec);
            let bird_total = spawn_birds(commands, cfg, slot.spec.bird_count);
            LevelRuntime {
                block_total,
                bird_total,
            }
        }
    }
}

fn spawn_active_level(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    registry: Option<Res<LevelRegistry>>,
) {
    let Some(registry) = registry else {
        warn!(target: "level", "no level registry; nothing to spawn");
        return;
    };
    let runtime = match &registry.active {
        Some(ActiveLevel::Campaign(i)) => match registry.slots.get(*i) {
            Some(slot) => spawn_level_from_slot(&mut commands, &cfg, slot),
            None => {
                error!(target: "level", "active level {i} out of range");
                return;
            }
        },
        Some(ActiveLevel::Random(spec)) => {
            spawn_level_from_slot(&mut commands, &cfg, &LevelSlot::new(spec.clone()))
        }
        None => {
            warn!(target: "level", "entered Playing with no active level");
            return;
        }
    };
    info!(
        target: "level",
        "level up: {} blocks, {} birds",
        runtime.block_total, runtime.bird_total
    );
    commands.insert_resource(runtime);
}

/// Despawns every level-owned entity (bodies go with them) and clears any
/// collapse left in the queue: a stale entry would be harmless (drain skips
/// dead entities) but there is no reason to carry it across levels.
fn teardown_level(
    mut commands: Commands,
    entities: Query<Entity, With<LevelEntity>>,
    mut queue: ResMut<DestructionQueue>,
    mut registry: Option<ResMut<LevelRegistry>>,
    mut paused: ResMut<Paused>,
) {
    let mut count = 0;
    for entity in &entities {
        commands.entity(entity).despawn();
        count += 1;
    }
    queue.clear();
    commands.remove_resource::<LevelRuntime>();
    if let Some(registry) = registry.as_deref_mut() {
        registry.active = None;
    }
    paused.0 = false;
    debug!(target: "level", "level torn down ({count} entities)");
}

/// Replay: throw the whole level away and rebuild an equivalent one from the
/// same spec. Any persisted snapshot for the slot is dropped.
fn handle_reset(
    mut commands: Commands,
    mut resets: EventReader<ResetLevel>,
    cfg: Res<GameConfig>,
    mut registry: Option<ResMut<LevelRegistry>>,
    entities: Query<Entity, With<LevelEntity>>,
    mut queue: ResMut<DestructionQueue>,
) {
    if resets.is_empty() {
        return;
    }
    resets.clear();
    let Some(registry) = registry.as_deref_mut() else {
        return;
    };
    let active = registry.active.clone();
    let slot = match active {
        Some(ActiveLevel::Campaign(i)) => {
            registry.clear_snapshot(i);
            match registry.slots.get(i) {
                Some(slot) => slot.clone(),
                None => return,
            }
        }
        Some(ActiveLevel::Random(spec)) => LevelSlot::new(spec),
        None => return,
    };
    for entity in &entities {
        commands.entity(entity).despawn();
    }
    queue.clear();
    let runtime = spawn_level_from_slot(&mut commands, &cfg, &slot);
    commands.insert_resource(runtime);
    info!(target: "level", "level reset");
}
