use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use bird_blitz::app::state::AppState;
use bird_blitz::core::components::{Bird, BirdAbility, Block, Destructible, LevelEntity, Material};
use bird_blitz::core::config::GameConfig;
use bird_blitz::core::level::registry::{ActiveLevel, LevelRegistry};
use bird_blitz::core::level::spec::builtin_specs;
use bird_blitz::persistence::snapshot::{LevelSnapshot, SaveGame, SAVE_VERSION};
use bird_blitz::persistence::{store, LoadRequest, PersistencePlugin, SaveRequest};

fn sample_save() -> SaveGame {
    SaveGame {
        version: SAVE_VERSION,
        unlocked: vec![true, true, false],
        levels: vec![LevelSnapshot {
            index: 1,
            spec: builtin_specs()[1].clone(),
            blocks: Vec::new(),
            birds: Vec::new(),
        }],
    }
}

#[test]
fn save_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.ron");
    let save = sample_save();

    store::save_to_file(&path, &save).unwrap();
    let loaded = store::load_from_file(&path).unwrap();
    assert_eq!(loaded, save);
}

#[test]
fn unsupported_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.ron");
    let mut save = sample_save();
    save.version = SAVE_VERSION + 1;
    store::save_to_file(&path, &save).unwrap();

    let err = store::load_from_file(&path).unwrap_err();
    assert!(err.contains("version"), "unexpected error: {err}");
}

#[test]
fn corrupt_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.ron");
    std::fs::write(&path, "(this is not a save").unwrap();

    assert!(store::load_from_file(&path).is_err());
    assert!(store::load_from_file(dir.path().join("missing.ron")).is_err());
}

#[test]
fn apply_save_validates_before_touching_anything() {
    let registry = LevelRegistry::from_config(&GameConfig::default());

    let mut wrong_len = sample_save();
    wrong_len.unlocked = vec![true];
    assert!(store::apply_save(&registry, wrong_len).is_err());

    let mut out_of_range = sample_save();
    out_of_range.levels[0].index = 9;
    assert!(store::apply_save(&registry, out_of_range).is_err());

    // The input registry is untouched either way.
    assert_eq!(registry.unlocked, vec![true, false, false]);
}

#[test]
fn apply_save_rebuilds_unlocks_and_snapshots() {
    let registry = LevelRegistry::from_config(&GameConfig::default());
    let next = store::apply_save(&registry, sample_save()).unwrap();

    assert_eq!(next.unlocked, vec![true, true, false]);
    assert!(next.active.is_none());
    assert!(next.slots[0].snapshot.is_none());
    assert_eq!(next.slots[1].snapshot.as_ref().unwrap().index, 1);
    assert!(next.slots[2].snapshot.is_none());
}

fn persistence_app(save_path: &std::path::Path) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<AppState>();
    let mut cfg = GameConfig::default();
    cfg.save_path = save_path.to_string_lossy().into_owned();
    app.insert_resource(LevelRegistry::from_config(&cfg));
    app.insert_resource(cfg);
    app.add_plugins(PersistencePlugin);
    app
}

fn spawn_played_level(app: &mut App) {
    app.world_mut().spawn((
        Block {
            material: Material::Glass,
            size: Vec2::new(0.4, 1.6),
        },
        Destructible::with_health(3.5),
        Transform::from_xyz(9.1, 0.8, 0.0),
        LevelEntity,
    ));
    app.world_mut().spawn((
        Bird {
            ability: BirdAbility::None,
            density: 1.2,
            diameter: 0.8,
            texture_path: "images/red_bird.png".into(),
            order: 0,
            ability_used: false,
        },
        Destructible::with_health(10.0),
        LevelEntity,
    ));
}

#[test]
fn save_request_captures_the_active_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.ron");
    let mut app = persistence_app(&path);
    spawn_played_level(&mut app);
    app.world_mut()
        .resource_mut::<LevelRegistry>()
        .active = Some(ActiveLevel::Campaign(0));

    app.world_mut().send_event(SaveRequest);
    app.update();

    let registry = app.world().resource::<LevelRegistry>();
    let snapshot = registry.slots[0].snapshot.as_ref().unwrap();
    assert_eq!(snapshot.blocks.len(), 1);
    assert_eq!(snapshot.blocks[0].health, 3.5);
    assert_eq!(snapshot.birds.len(), 1);
    // The bird never got a live transform in this world.
    assert!(snapshot.birds[0].position.is_none());

    let on_disk = store::load_from_file(&path).unwrap();
    assert_eq!(on_disk.levels.len(), 1);
    assert_eq!(on_disk.levels[0].index, 0);
}

#[test]
fn load_replaces_the_registry_only_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.ron");
    let mut app = persistence_app(&path);

    // A corrupt file leaves the registry exactly as it was.
    std::fs::write(&path, "garbage").unwrap();
    app.world_mut().send_event(LoadRequest);
    app.update();
    assert_eq!(
        app.world().resource::<LevelRegistry>().unlocked,
        vec![true, false, false]
    );

    store::save_to_file(&path, &sample_save()).unwrap();
    app.world_mut().send_event(LoadRequest);
    app.update();
    let registry = app.world().resource::<LevelRegistry>();
    assert_eq!(registry.unlocked, vec![true, true, false]);
    assert!(registry.slots[1].snapshot.is_some());
}
