use bevy::prelude::*;
use bevy_rapier2d::prelude::{ContactForceEvent, Vect};

use bird_blitz::core::components::Destructible;
use bird_blitz::core::config::GameConfig;
use bird_blitz::physics::collision::CollisionResolverPlugin;
use bird_blitz::physics::destruction::{DeferredDestructionPlugin, DestructionQueue};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    // force_scale 1.0 by default: event magnitudes map straight into the
    // damage domain.
    app.insert_resource(GameConfig::default());
    app.add_event::<ContactForceEvent>();
    app.add_plugins((CollisionResolverPlugin, DeferredDestructionPlugin));
    app
}

fn contact(a: Entity, b: Entity, force: f32) -> ContactForceEvent {
    ContactForceEvent {
        collider1: a,
        collider2: b,
        total_force: Vect::ZERO,
        total_force_magnitude: force,
        max_force_direction: Vect::ZERO,
        max_force_magnitude: force,
    }
}

#[test]
fn sub_threshold_contacts_leave_health_untouched() {
    let mut app = test_app();
    let a = app.world_mut().spawn(Destructible::with_health(10.0)).id();
    let b = app.world_mut().spawn(Destructible::with_health(10.0)).id();

    for force in [0.0, 0.2, 0.399] {
        app.world_mut().send_event(contact(a, b, force));
        app.update();
    }

    for e in [a, b] {
        let d = app.world().get::<Destructible>(e).unwrap();
        assert_eq!(d.health, 10.0);
    }
}

#[test]
fn damage_is_exact_and_applies_to_both_sides() {
    let mut app = test_app();
    let a = app.world_mut().spawn(Destructible::with_health(10.0)).id();
    let b = app.world_mut().spawn(Destructible::with_health(5.0)).id();

    app.world_mut().send_event(contact(a, b, 1.0));
    app.update();

    let da = app.world().get::<Destructible>(a).unwrap();
    let db = app.world().get::<Destructible>(b).unwrap();
    assert!((da.health - 9.7).abs() < 1e-6); // (1.0 - 0.4) * 0.5
    assert!((db.health - 4.7).abs() < 1e-6);
}

#[test]
fn contacts_against_unowned_bodies_are_skipped() {
    let mut app = test_app();
    let block = app.world_mut().spawn(Destructible::with_health(10.0)).id();
    // The ground carries no Destructible at all.
    let ground = app.world_mut().spawn_empty().id();

    app.world_mut().send_event(contact(block, ground, 2.0));
    app.update();

    let d = app.world().get::<Destructible>(block).unwrap();
    assert!((d.health - 9.2).abs() < 1e-6);
    assert!(app.world().get_entity(ground).is_ok());
}

#[test]
fn lethal_contact_defers_teardown_to_the_drain() {
    let mut app = test_app();
    let frail = app.world_mut().spawn(Destructible::with_health(0.1)).id();
    let other = app.world_mut().spawn(Destructible::with_health(50.0)).id();

    app.world_mut().send_event(contact(frail, other, 1.0));
    app.update();

    // Drained within the same frame: entity gone, queue empty again.
    assert!(app.world().get_entity(frail).is_err());
    assert!(app.world().get_entity(other).is_ok());
    assert!(app.world().resource::<DestructionQueue>().is_empty());
}

#[test]
fn two_lethal_contacts_in_one_step_destroy_once() {
    let mut app = test_app();
    let frail = app.world_mut().spawn(Destructible::with_health(0.1)).id();
    let a = app.world_mut().spawn(Destructible::with_health(50.0)).id();
    let b = app.world_mut().spawn(Destructible::with_health(50.0)).id();

    // Both contacts land in the same event pass.
    app.world_mut().send_event(contact(frail, a, 1.0));
    app.world_mut().send_event(contact(b, frail, 1.0));
    app.update();

    assert!(app.world().get_entity(frail).is_err());
    assert!(app.world().resource::<DestructionQueue>().is_empty());
    // The survivors each took exactly one hit.
    for e in [a, b] {
        let d = app.world().get::<Destructible>(e).unwrap();
        assert!((d.health - 49.7).abs() < 1e-6);
    }
}

#[test]
fn bird_survives_first_hit_and_dies_by_attrition() {
    // Health 10, force 1.0 per hit: 0.3 damage each. One hit leaves 9.7;
    // the 34th crosses zero and hit 41 is long past dead.
    let mut app = test_app();
    let mut launched = Destructible::with_health(10.0);
    launched.launched = true;
    let bird = app.world_mut().spawn(launched).id();
    let wall = app.world_mut().spawn_empty().id();

    app.world_mut().send_event(contact(bird, wall, 1.0));
    app.update();
    {
        let d = app.world().get::<Destructible>(bird).unwrap();
        assert!((d.health - 9.7).abs() < 1e-6);
        assert!(d.collision, "launched bird must flag its first collision");
    }

    for _ in 0..40 {
        app.world_mut().send_event(contact(bird, wall, 1.0));
        app.update();
    }

    assert!(
        app.world().get_entity(bird).is_err(),
        "41 hits at 0.3 damage must destroy a 10-health bird"
    );
    assert!(app.world().resource::<DestructionQueue>().is_empty());
}
