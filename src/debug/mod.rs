//! Debug module: feature gated runtime stats/logging.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier2d::render::DebugRenderContext;

#[cfg(feature = "debug")]
use crate::core::components::{Bird, Block};
#[cfg(feature = "debug")]
use crate::core::system::system_order::PostPhysicsAdjustSet;
#[cfg(feature = "debug")]
use crate::physics::destruction::DestructionQueue;

#[cfg(feature = "debug")]
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugPreRenderSet;

#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub block_count: usize,
    pub bird_count: usize,
    pub pending_collapses: usize,
}

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        fn debug_stats_collect_system(
            time: Res<Time>,
            mut state: ResMut<DebugState>,
            mut stats: ResMut<DebugStats>,
            q_blocks: Query<(), With<Block>>,
            q_birds: Query<(), With<Bird>>,
            queue: Option<Res<DestructionQueue>>,
        ) {
            state.frame_counter += 1;
            let dt = time.delta_secs().max(1e-6);
            let inst_fps = 1.0 / dt;
            if stats.fps == 0.0 {
                stats.fps = inst_fps;
            } else {
                stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
            }
            let inst_ms = dt * 1000.0;
            if stats.frame_time_ms == 0.0 {
                stats.frame_time_ms = inst_ms;
            } else {
                stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
            }
            stats.block_count = q_blocks.iter().count();
            stats.bird_count = q_birds.iter().count();
            stats.pending_collapses = queue.map(|q| q.len()).unwrap_or(0);
        }

        fn debug_logging_system(
            time: Res<Time>,
            mut state: ResMut<DebugState>,
            stats: Res<DebugStats>,
        ) {
            state.time_accum += time.delta_secs();
            if state.time_accum >= state.log_interval {
                state.time_accum = 0.0;
                info!(
                    "SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} blocks={} birds={} pending={}",
                    state.frame_counter,
                    time.elapsed_secs(),
                    stats.fps,
                    stats.frame_time_ms,
                    stats.block_count,
                    stats.bird_count,
                    stats.pending_collapses
                );
            }
        }

        fn toggle_rapier_debug(
            keys: Res<ButtonInput<KeyCode>>,
            ctx: Option<ResMut<DebugRenderContext>>,
        ) {
            if keys.just_pressed(KeyCode::F1) {
                if let Some(mut c) = ctx {
                    c.enabled = !c.enabled;
                }
            }
        }

        app.init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .configure_sets(Update, DebugPreRenderSet.after(PostPhysicsAdjustSet))
            .add_systems(
                Update,
                (
                    debug_stats_collect_system,
                    debug_logging_system,
                    toggle_rapier_debug,
                )
                    .in_set(DebugPreRenderSet),
            );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
