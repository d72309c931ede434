use bevy::prelude::*;

/// High-level app lifecycle state.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Level select: pick a campaign level, a random one, or resume.
    #[default]
    MainMenu,
    /// Active gameplay; the active level is instantiated in the ECS.
    Playing,
}

/// Pause is a flag, not a state: the level entities stay alive and only the
/// physics pipeline and player input freeze.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Paused(pub bool);

pub fn unpaused(paused: Res<Paused>) -> bool {
    !paused.0
}
