use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::core::components::Material;
use crate::core::level::spec::{builtin_specs, StructureSpec, Vec2Def};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Bird Blitz".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub x: f32,
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { x: 0.0, y: -9.8 }
    }
}

/// Contact-force to damage mapping. `force_scale` converts the engine's raw
/// contact force magnitude into the damage domain before the threshold test.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DamageConfig {
    pub threshold: f32,
    pub scale: f32,
    pub force_scale: f32,
}
impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            scale: 0.5,
            force_scale: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MaterialPreset {
    pub density: f32,
    pub health: f32,
}
impl Default for MaterialPreset {
    fn default() -> Self {
        Self {
            density: 1.0,
            health: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MaterialsConfig {
    pub wood: MaterialPreset,
    pub glass: MaterialPreset,
    pub stone: MaterialPreset,
}
impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            wood: MaterialPreset {
                density: 1.0,
                health: 15.0,
            },
            glass: MaterialPreset {
                density: 0.8,
                health: 8.0,
            },
            stone: MaterialPreset {
                density: 2.5,
                health: 30.0,
            },
        }
    }
}
impl MaterialsConfig {
    pub fn preset(&self, material: Material) -> MaterialPreset {
        match material {
            Material::Wood => self.wood,
            Material::Glass => self.glass,
            Material::Stone => self.stone,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SlingshotConfig {
    pub rest: Vec2Def,
    pub impulse_scale: f32,
    /// Spacing between birds queued behind the sling.
    pub queue_spacing: f32,
}
impl Default for SlingshotConfig {
    fn default() -> Self {
        Self {
            rest: Vec2Def::new(3.0, 3.0),
            impulse_scale: 4.0,
            queue_spacing: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExplosionConfig {
    pub impulse: f32,
    pub radius: f32,
    pub falloff_exp: f32,
}
impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            impulse: 40.0,
            radius: 4.0,
            falloff_exp: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AbilityConfig {
    pub explosion: ExplosionConfig,
    pub accelerate_factor: f32,
    pub split_count: u32,
    /// Angular spread (radians) between split birds.
    pub split_spread: f32,
}
impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            explosion: Default::default(),
            accelerate_factor: 1.6,
            split_count: 2,
            split_spread: 0.35,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BirdDefaults {
    pub health: f32,
    pub density: f32,
    pub diameter: f32,
}
impl Default for BirdDefaults {
    fn default() -> Self {
        Self {
            health: 10.0,
            density: 1.2,
            diameter: 0.8,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gravity: GravityConfig,
    pub damage: DamageConfig,
    pub materials: MaterialsConfig,
    pub slingshot: SlingshotConfig,
    pub abilities: AbilityConfig,
    pub bird: BirdDefaults,
    pub save_path: String,
    pub levels: Vec<StructureSpec>,
    pub rapier_debug: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            gravity: Default::default(),
            damage: Default::default(),
            materials: Default::default(),
            slingshot: Default::default(),
            abilities: Default::default(),
            bird: Default::default(),
            save_path: "saved_game.ron".into(),
            levels: builtin_specs(),
            rapier_debug: false,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(
                    "GameConfig: {:?} unusable ({e}); falling back to defaults",
                    path.as_ref()
                );
                Self::default()
            }
        }
    }
}
