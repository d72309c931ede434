use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::{unpaused, AppState};
use crate::core::components::{Bird, Destructible, OnSling};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;

/// Fire the seated bird with the given impulse.
#[derive(Event, Debug, Clone, Copy)]
pub struct LaunchRequest {
    pub impulse: Vec2,
}

/// Trigger the in-flight bird's special ability.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct AbilityRequest;

pub struct SlingshotPlugin;

impl Plugin for SlingshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LaunchRequest>()
            .add_event::<AbilityRequest>()
            .add_systems(
                Update,
                (pointer_input, seat_next_bird, handle_launch)
                    .chain()
                    .in_set(PrePhysicsSet)
                    .run_if(in_state(AppState::Playing).and(unpaused)),
            );
    }
}

/// Thin input glue: left-drag pulls the sling (release launches), right click
/// triggers the ability. Headless apps simply never see a window.
fn pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut drag_start: Local<Option<Vec2>>,
    mut launches: EventWriter<LaunchRequest>,
    mut abilities: EventWriter<AbilityRequest>,
    cfg: Res<GameConfig>,
) {
    if buttons.just_pressed(MouseButton::Right) {
        abilities.write(AbilityRequest);
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let world_pos = window
        .cursor_position()
        .and_then(|screen| cursor_world_pos(&camera_q, screen));
    if buttons.just_pressed(MouseButton::Left) {
        *drag_start = world_pos;
    }
    if buttons.just_released(MouseButton::Left) {
        if drag_start.take().is_some() {
            if let Some(release) = world_pos {
                let rest: Vec2 = cfg.slingshot.rest.into();
                let pull = rest - release;
                if pull.length_squared() > 0.01 {
                    launches.write(LaunchRequest {
                        impulse: pull * cfg.slingshot.impulse_scale,
                    });
                }
            }
        }
    }
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// Seats the lowest-order bird that has not launched yet. Succession waits
/// for the previous bird to be retired: while any launched bird is still
/// alive the sling stays empty. Held fixed until the launch impulse arrives.
fn seat_next_bird(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    seated: Query<(), With<OnSling>>,
    waiting: Query<(Entity, &Bird, &Destructible)>,
) {
    if !seated.is_empty() {
        return;
    }
    if waiting.iter().any(|(_, _, state)| state.launched) {
        return;
    }
    let next = waiting
        .iter()
        .filter(|(_, _, d)| !d.launched)
        .min_by_key(|(_, bird, _)| bird.order);
    let Some((entity, bird, _)) = next else {
        return;
    };
    let rest: Vec2 = cfg.slingshot.rest.into();
    commands.entity(entity).insert((
        OnSling,
        RigidBody::Fixed,
        Transform::from_translation(rest.extend(0.0)),
    ));
    debug!(target: "sling", "bird {} seated", bird.order);
}

/// Launch: the body turns dynamic, takes the impulse, and the logical state
/// flips to launched (collision flagging becomes possible from here on).
fn handle_launch(
    mut commands: Commands,
    mut launches: EventReader<LaunchRequest>,
    mut seated: Query<(Entity, &Bird, &mut Destructible), With<OnSling>>,
) {
    for launch in launches.read() {
        let Ok((entity, bird, mut state)) = seated.single_mut() else {
            continue;
        };
        state.launched = true;
        commands.entity(entity).remove::<OnSling>().insert((
            RigidBody::Dynamic,
            ExternalImpulse {
                impulse: launch.impulse,
                torque_impulse: 0.0,
            },
        ));
        info!(
            target: "sling",
            "bird {} launched with impulse {:?}",
            bird.order, launch.impulse
        );
    }
}
