use bevy::prelude::*;

use bird_blitz::core::components::{Bird, BirdAbility, Block, Destructible, Material, OnSling};
use bird_blitz::core::config::GameConfig;
use bird_blitz::core::level::spec::{builtin_specs, StructureSpec, Vec2Def};
use bird_blitz::gameplay::structure::{spawn_birds, spawn_structure};

fn spec(floors_left: i32, floors_right: i32) -> StructureSpec {
    StructureSpec {
        base: Vec2Def::new(10.0, 3.0),
        floors_left,
        floors_right,
        material_left: Material::Wood,
        material_right: Material::Glass,
        bird_count: 1,
    }
}

fn build(world: &mut World, spec: &StructureSpec) -> u32 {
    let cfg = GameConfig::default();
    let mut commands = world.commands();
    let count = spawn_structure(&mut commands, &cfg, spec);
    world.flush();
    count
}

#[test]
fn negative_floor_count_builds_an_empty_side() {
    let mut world = World::new();
    let count = build(&mut world, &spec(-1, -1));
    assert_eq!(count, 0);
    let mut blocks = world.query::<&Block>();
    assert_eq!(blocks.iter(&world).count(), 0);
}

#[test]
fn zero_floors_is_a_lone_beam() {
    let mut world = World::new();
    let count = build(&mut world, &spec(0, -1));
    assert_eq!(count, 1);
    // The zero-floor beam takes the paired side's material.
    let mut blocks = world.query::<&Block>();
    let block = blocks.single(&world).unwrap();
    assert_eq!(block.material, Material::Glass);
}

#[test]
fn each_floor_adds_two_columns_and_a_beam() {
    let mut world = World::new();
    let count = build(&mut world, &spec(3, 2));
    assert_eq!(count, 3 * 3 + 2 * 3);

    let mut columns = 0;
    let mut beams = 0;
    let mut blocks = world.query::<&Block>();
    for block in blocks.iter(&world) {
        if block.size.y > block.size.x {
            columns += 1;
        } else {
            beams += 1;
        }
    }
    assert_eq!(columns, 2 * (3 + 2));
    assert_eq!(beams, 3 + 2);
}

#[test]
fn block_health_follows_the_material_preset() {
    let mut world = World::new();
    build(&mut world, &spec(1, -1));
    let cfg = GameConfig::default();
    let mut blocks = world.query::<(&Block, &Destructible)>();
    for (block, state) in blocks.iter(&world) {
        let preset = cfg.materials.preset(block.material);
        assert_eq!(state.health, preset.health);
        assert!(!state.launched);
    }
}

#[test]
fn builtin_campaign_matches_the_original_lineup() {
    let specs = builtin_specs();
    assert_eq!(specs.len(), 3);
    assert_eq!(
        (specs[0].material_left, specs[0].material_right),
        (Material::Glass, Material::Wood)
    );
    assert_eq!(specs[0].bird_count, 1);
    assert_eq!((specs[1].floors_left, specs[1].floors_right), (3, -1));
    assert_eq!(specs[1].bird_count, 3);
    assert_eq!(specs[2].material_left, Material::Stone);
    assert_eq!((specs[2].floors_left, specs[2].floors_right), (1, 3));
}

#[test]
fn bird_lineup_seats_the_first_and_queues_the_rest() {
    let mut world = World::new();
    let cfg = GameConfig::default();
    {
        let mut commands = world.commands();
        assert_eq!(spawn_birds(&mut commands, &cfg, 3), 3);
    }
    world.flush();

    let rest: Vec2 = cfg.slingshot.rest.into();
    let mut seated = 0;
    let mut abilities = Vec::new();
    let mut birds = world.query::<(&Bird, &Transform, Option<&OnSling>)>();
    for (bird, tf, on_sling) in birds.iter(&world) {
        abilities.push((bird.order, bird.ability));
        if on_sling.is_some() {
            seated += 1;
            assert_eq!(bird.order, 0);
            assert_eq!(tf.translation.truncate(), rest);
        } else {
            assert!(tf.translation.x < rest.x, "queued birds wait behind the sling");
        }
    }
    assert_eq!(seated, 1);
    abilities.sort_by_key(|(order, _)| *order);
    let cycle: Vec<BirdAbility> = abilities.into_iter().map(|(_, a)| a).collect();
    assert_eq!(
        cycle,
        vec![BirdAbility::None, BirdAbility::Explode, BirdAbility::Accelerate]
    );
}
