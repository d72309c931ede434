use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::core::level::registry::{ActiveLevel, LevelRegistry};
use crate::core::level::spec::{random_spec, Vec2Def};
use crate::persistence::{LoadRequest, SaveRequest};

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_registry)
            .add_systems(OnEnter(AppState::MainMenu), show_menu_instructions)
            .add_systems(
                Update,
                handle_menu_input.run_if(in_state(AppState::MainMenu)),
            );
    }
}

fn init_registry(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(LevelRegistry::from_config(&cfg));
}

fn show_menu_instructions(registry: Option<Res<LevelRegistry>>) {
    info!(target: "menu", "=== LEVEL SELECT ===");
    let Some(reg) = registry else {
        warn!(target: "menu", "LevelRegistry missing; no levels to display.");
        return;
    };
    for (i, slot) in reg.slots.iter().enumerate() {
        let lock = if reg.is_unlocked(i) { "open" } else { "locked" };
        let resume = if slot.snapshot.is_some() { " (in progress)" } else { "" };
        info!(
            target: "menu",
            "  {}: {:?}/{:?} towers {}/{} birds {} [{lock}]{resume}",
            i + 1,
            slot.spec.material_left,
            slot.spec.material_right,
            slot.spec.floors_left,
            slot.spec.floors_right,
            slot.spec.bird_count,
        );
    }
    info!(target: "menu", "  R: random level  N: resume latest  S: save  L: load");
}

/// Digit keys 1-9 map to campaign levels in order.
const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Keyboard level select. Digit keys start campaign levels; locked levels
/// refuse with a log line. Keyboard select covers the first nine levels.
fn handle_menu_input(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<GameConfig>,
    mut registry: Option<ResMut<LevelRegistry>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut saves: EventWriter<SaveRequest>,
    mut loads: EventWriter<LoadRequest>,
) {
    let Some(registry) = registry.as_deref_mut() else {
        return;
    };

    for (i, key) in DIGIT_KEYS.iter().enumerate().take(registry.len()) {
        if keys.just_pressed(*key) {
            if registry.is_unlocked(i) {
                registry.active = Some(ActiveLevel::Campaign(i));
                next_state.set(AppState::Playing);
            } else {
                info!(target: "menu", "level {} is locked", i + 1);
            }
            return;
        }
    }

    let base = cfg
        .levels
        .first()
        .map(|spec| spec.base)
        .unwrap_or(Vec2Def::new(10.0, 3.0));

    if keys.just_pressed(KeyCode::KeyR) {
        let spec = random_spec(&mut rand::thread_rng(), base);
        info!(target: "menu", "random level: {spec:?}");
        registry.active = Some(ActiveLevel::Random(spec));
        next_state.set(AppState::Playing);
        return;
    }

    if keys.just_pressed(KeyCode::KeyN) {
        match registry.latest_playable_index() {
            Some(i) => {
                registry.active = Some(ActiveLevel::Campaign(i));
            }
            None => {
                // Whole campaign cleared: hand out a random level instead.
                let spec = random_spec(&mut rand::thread_rng(), base);
                registry.active = Some(ActiveLevel::Random(spec));
            }
        }
        next_state.set(AppState::Playing);
        return;
    }

    if keys.just_pressed(KeyCode::KeyS) {
        saves.write(SaveRequest);
    }
    if keys.just_pressed(KeyCode::KeyL) {
        loads.write(LoadRequest);
    }
}
