use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::DamageConfig;

/// Structural material kinds. Density and health presets live in `GameConfig`
/// so gameplay balance stays data-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Wood,
    Glass,
    Stone,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Wood, Material::Glass, Material::Stone];

    pub fn texture_path(&self) -> &'static str {
        match self {
            Material::Wood => "images/wood_block.png",
            Material::Glass => "images/glass_block.png",
            Material::Stone => "images/stone_block.png",
        }
    }
}

/// Shared destructible state carried by every damageable game object
/// (birds and structure blocks alike).
///
/// The Rapier body/collider components on the same entity are the "native
/// handle" side of the object; this component is the logical side that
/// snapshots persist.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Destructible {
    pub health: f32,
    /// Set once the object has been hit after launch.
    pub collision: bool,
    /// Birds start unlaunched; blocks never launch.
    pub launched: bool,
}

impl Default for Destructible {
    fn default() -> Self {
        Self {
            health: 10.0,
            collision: false,
            launched: false,
        }
    }
}

impl Destructible {
    pub fn with_health(health: f32) -> Self {
        Self {
            health,
            ..Default::default()
        }
    }

    /// Applies one contact's force metric. Pure: runs inside the contact event
    /// pass and must not touch the physics world.
    ///
    /// Returns `true` when this call drove health from positive to zero or
    /// below; the caller is responsible for enqueueing the collapse.
    pub fn apply_collision(&mut self, force: f32, damage: &DamageConfig) -> bool {
        if self.launched {
            self.collision = true;
        }
        if force < damage.threshold {
            return false;
        }
        let was_alive = self.health > 0.0;
        self.health -= (force - damage.threshold) * damage.scale;
        was_alive && self.health <= 0.0
    }
}

/// Special capability a bird can trigger once mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BirdAbility {
    None,
    Explode,
    Accelerate,
    Split,
}

impl BirdAbility {
    pub fn texture_path(&self) -> &'static str {
        match self {
            BirdAbility::None => "images/red_bird.png",
            BirdAbility::Explode => "images/bomb_bird.png",
            BirdAbility::Accelerate => "images/speed_bird.png",
            BirdAbility::Split => "images/split_bird.png",
        }
    }
}

/// Slingshot projectile. Lives on an entity that also carries `Destructible`
/// plus the Rapier body for its circular collider.
#[derive(Component, Debug, Clone)]
pub struct Bird {
    pub ability: BirdAbility,
    pub density: f32,
    pub diameter: f32,
    pub texture_path: String,
    /// Launch sequence position within the level.
    pub order: usize,
    pub ability_used: bool,
}

/// Structure block spawned from a `StructureSpec`.
#[derive(Component, Debug, Clone)]
pub struct Block {
    pub material: Material,
    pub size: Vec2,
}

/// Marker for every entity owned by the active level (blocks, birds, ground,
/// sling frame). Reset and restore despawn by this tag.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelEntity;

/// Static arena floor. Carries no `Destructible`, so the collision resolver
/// skips it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ground;

/// The bird currently seated on the sling, waiting for launch.
#[derive(Component, Debug, Clone, Copy)]
pub struct OnSling;

#[cfg(test)]
mod tests {
    use super::*;

    fn damage_cfg() -> DamageConfig {
        DamageConfig::default()
    }

    #[test]
    fn below_threshold_leaves_health_untouched() {
        let mut d = Destructible::with_health(10.0);
        for f in [0.0, 0.1, 0.39, 0.399_999] {
            assert!(!d.apply_collision(f, &damage_cfg()));
            assert_eq!(d.health, 10.0);
        }
    }

    #[test]
    fn damage_formula_is_exact_at_and_above_threshold() {
        let mut d = Destructible::with_health(10.0);
        assert!(!d.apply_collision(0.4, &damage_cfg()));
        assert_eq!(d.health, 10.0); // (0.4 - 0.4) * 0.5 == 0

        let mut d = Destructible::with_health(10.0);
        assert!(!d.apply_collision(1.0, &damage_cfg()));
        assert!((d.health - 9.7).abs() < 1e-6);
    }

    #[test]
    fn collision_flag_requires_launch() {
        let mut d = Destructible::with_health(10.0);
        d.apply_collision(1.0, &damage_cfg());
        assert!(!d.collision);

        d.launched = true;
        d.apply_collision(0.1, &damage_cfg());
        assert!(d.collision);
    }

    #[test]
    fn crossing_zero_reports_collapse_exactly_once() {
        let mut d = Destructible::with_health(0.25);
        assert!(d.apply_collision(1.0, &damage_cfg())); // 0.3 damage crosses zero
        assert!(!d.apply_collision(1.0, &damage_cfg())); // already dead: no re-collapse
    }
}
