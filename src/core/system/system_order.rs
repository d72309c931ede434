//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (launch impulses / ability triggers before Rapier)
//! 2. Rapier step + contact events (handled by plugin)
//! 3. PostPhysicsAdjust (damage resolution, then the destruction drain)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // world mutations applied before the physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // contact resolution and deferred teardown
