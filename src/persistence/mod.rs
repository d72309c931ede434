pub mod snapshot;
pub mod store;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{Bird, Block, Destructible, LevelEntity};
use crate::core::config::GameConfig;
use crate::core::level::registry::LevelRegistry;
use snapshot::{bird_snapshot, block_snapshot, LevelSnapshot, SaveGame, SAVE_VERSION};

/// Write the whole game state (unlock flags + per-level snapshots) to the
/// configured save path.
#[derive(Event, Debug, Default)]
pub struct SaveRequest;

/// Replace the in-memory campaign with the persisted one. Only honored from
/// the menu; failure leaves the current state untouched.
#[derive(Event, Debug, Default)]
pub struct LoadRequest;

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequest>()
            .add_event::<LoadRequest>()
            .add_systems(Update, handle_save)
            .add_systems(Update, handle_load.run_if(in_state(AppState::MainMenu)));
    }
}

/// Snapshot the active level out of the ECS (logical fields only), then
/// serialize the registry. Native handles never enter the blob.
fn handle_save(
    mut requests: EventReader<SaveRequest>,
    mut registry: Option<ResMut<LevelRegistry>>,
    cfg: Res<GameConfig>,
    blocks: Query<(&Block, &Destructible, &Transform), With<LevelEntity>>,
    birds: Query<(&Bird, &Destructible, Option<&Transform>), With<LevelEntity>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();
    let Some(registry) = registry.as_deref_mut() else {
        warn!(target: "save", "no level registry; nothing to save");
        return;
    };

    if let Some(active) = registry.active_campaign() {
        let spec = registry.slots[active].spec.clone();
        let snapshot = LevelSnapshot {
            index: active,
            spec,
            blocks: blocks
                .iter()
                .map(|(b, d, tf)| block_snapshot(b, d, tf))
                .collect(),
            birds: birds
                .iter()
                .map(|(b, d, tf)| bird_snapshot(b, d, tf))
                .collect(),
        };
        registry.slots[active].snapshot = Some(snapshot);
    }

    let save = SaveGame {
        version: SAVE_VERSION,
        unlocked: registry.unlocked.clone(),
        levels: registry
            .slots
            .iter()
            .filter_map(|slot| slot.snapshot.clone())
            .collect(),
    };
    match store::save_to_file(&cfg.save_path, &save) {
        Ok(()) => info!(target: "save", "game saved to {}", cfg.save_path),
        Err(e) => error!(target: "save", "save failed: {e}"),
    }
}

/// Load is atomic: the registry is only replaced when the whole file parses
/// and validates. Level bodies are rebuilt lazily when a level is entered.
fn handle_load(
    mut requests: EventReader<LoadRequest>,
    mut registry: Option<ResMut<LevelRegistry>>,
    cfg: Res<GameConfig>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();
    let Some(registry) = registry.as_deref_mut() else {
        return;
    };
    match store::load_from_file(&cfg.save_path).and_then(|save| store::apply_save(registry, save)) {
        Ok(next) => {
            *registry = next;
            info!(target: "save", "game loaded from {}", cfg.save_path);
        }
        Err(e) => {
            error!(target: "save", "load failed, keeping current state: {e}");
        }
    }
}
