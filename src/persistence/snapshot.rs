use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::components::{Bird, BirdAbility, Block, Destructible, Material};
use crate::core::level::spec::{StructureSpec, Vec2Def};

pub const SAVE_VERSION: u32 = 1;

/// Logical state of one structure block. Rapier bodies/colliders and GPU
/// textures are deliberately absent; restore replays "create" against a live
/// world instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub material: Material,
    pub health: f32,
    pub position: Vec2Def,
    pub angle: f32,
    pub size: Vec2Def,
}

/// Logical state of one bird. `position` is an explicit presence flag:
/// `None` means "no live body at save time" and restores to the sling rest
/// position, never a zero-as-sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdSnapshot {
    pub ability: BirdAbility,
    pub health: f32,
    pub density: f32,
    pub diameter: f32,
    pub texture_path: String,
    #[serde(default)]
    pub position: Option<Vec2Def>,
    #[serde(default)]
    pub launched: bool,
    pub order: usize,
}

/// One persisted level. Absent collections deserialize as empty (an old or
/// hand-trimmed save is not fatal); an empty `blocks` list in a level that
/// was actually played means every block was destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub index: usize,
    pub spec: StructureSpec,
    #[serde(default)]
    pub blocks: Vec<BlockSnapshot>,
    #[serde(default)]
    pub birds: Vec<BirdSnapshot>,
}

/// The whole save blob: unlock flags (ordered, fixed size = level count) plus
/// a snapshot per played level. Unplayed levels are rebuilt from their
/// blueprint on load and carry no snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub unlocked: Vec<bool>,
    #[serde(default)]
    pub levels: Vec<LevelSnapshot>,
}

pub fn block_snapshot(block: &Block, state: &Destructible, transform: &Transform) -> BlockSnapshot {
    let (_, _, angle) = transform.rotation.to_euler(EulerRot::XYZ);
    BlockSnapshot {
        material: block.material,
        health: state.health,
        position: transform.translation.truncate().into(),
        angle,
        size: block.size.into(),
    }
}

pub fn bird_snapshot(
    bird: &Bird,
    state: &Destructible,
    transform: Option<&Transform>,
) -> BirdSnapshot {
    BirdSnapshot {
        ability: bird.ability,
        health: state.health,
        density: bird.density,
        diameter: bird.diameter,
        texture_path: bird.texture_path.clone(),
        position: transform.map(|t| t.translation.truncate().into()),
        launched: state.launched,
        order: bird.order,
    }
}
