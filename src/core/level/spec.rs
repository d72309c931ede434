use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::components::Material;

/// Serializable Vec2 (Bevy's math types are kept out of the save/config schema).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl Vec2Def {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec2> for Vec2Def {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Blueprint for one level's destructible structure: two towers flanking a
/// base position, a material pair, and the number of birds handed to the
/// player.
///
/// A floor count of -1 means "no tower on that side" and must yield zero
/// blocks there; 0 builds just the ground beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSpec {
    pub base: Vec2Def,
    pub floors_left: i32,
    pub floors_right: i32,
    pub material_left: Material,
    pub material_right: Material,
    pub bird_count: u32,
}

impl StructureSpec {
    pub fn new(
        base: Vec2Def,
        floors_left: i32,
        floors_right: i32,
        material_left: Material,
        material_right: Material,
        bird_count: u32,
    ) -> Self {
        Self {
            base,
            floors_left,
            floors_right,
            material_left,
            material_right,
            bird_count,
        }
    }
}

/// Built-in level table (mirrors the shipped campaign ordering).
pub fn builtin_specs() -> Vec<StructureSpec> {
    vec![
        StructureSpec::new(Vec2Def::new(10.0, 3.0), 3, -1, Material::Glass, Material::Wood, 1),
        StructureSpec::new(Vec2Def::new(10.0, 3.0), 3, -1, Material::Wood, Material::Glass, 3),
        StructureSpec::new(Vec2Def::new(10.0, 3.0), 1, 3, Material::Stone, Material::Glass, 3),
    ]
}

/// Randomized structure for the "random level" entry: floors in -1..=3 per
/// side (degenerate sides allowed), any material pair, 2..=5 birds.
pub fn random_spec<R: Rng>(rng: &mut R, base: Vec2Def) -> StructureSpec {
    let materials = Material::ALL;
    StructureSpec::new(
        base,
        rng.gen_range(-1..=3),
        rng.gen_range(-1..=3),
        materials[rng.gen_range(0..materials.len())],
        materials[rng.gen_range(0..materials.len())],
        rng.gen_range(2..=5),
    )
}
