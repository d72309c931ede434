use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Bird, BirdAbility, Block, Destructible, Ground, LevelEntity, Material, OnSling};
use crate::core::config::GameConfig;
use crate::core::level::spec::StructureSpec;
use crate::persistence::snapshot::{BirdSnapshot, BlockSnapshot};

/// Tower geometry in world units.
pub const COLUMN_SIZE: Vec2 = Vec2::new(0.4, 1.6);
pub const BEAM_SIZE: Vec2 = Vec2::new(2.4, 0.4);
const FLOOR_HEIGHT: f32 = COLUMN_SIZE.y + BEAM_SIZE.y;
const COLUMN_SPACING: f32 = 0.9;
/// Lateral offset of each tower from the structure base.
const TOWER_GAP: f32 = 2.5;

const ABILITY_CYCLE: [BirdAbility; 4] = [
    BirdAbility::None,
    BirdAbility::Explode,
    BirdAbility::Accelerate,
    BirdAbility::Split,
];

/// Spawns a single structure block: dynamic body, cuboid collider, density
/// and health from the material preset. Sprite attachment is the render
/// layer's job (headless apps spawn no sprites).
pub fn spawn_block(
    commands: &mut Commands,
    cfg: &GameConfig,
    material: Material,
    position: Vec2,
    angle: f32,
    size: Vec2,
    health: Option<f32>,
) -> Entity {
    let preset = cfg.materials.preset(material);
    commands
        .spawn((
            Transform {
                translation: position.extend(0.0),
                rotation: Quat::from_rotation_z(angle),
                ..default()
            },
            RigidBody::Dynamic,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            ColliderMassProperties::Density(preset.density),
            Velocity::default(),
            ActiveEvents::CONTACT_FORCE_EVENTS,
            Destructible::with_health(health.unwrap_or(preset.health)),
            Block { material, size },
            LevelEntity,
        ))
        .id()
}

/// Builds one tower side. `floors = -1` is a valid degenerate spec: no blocks
/// at all. `floors = 0` lays only the ground beam. Columns take the side's
/// material, beams the paired one.
fn spawn_tower(
    commands: &mut Commands,
    cfg: &GameConfig,
    base: Vec2,
    floors: i32,
    column_material: Material,
    beam_material: Material,
) -> u32 {
    if floors < 0 {
        return 0;
    }
    let mut count = 0;
    if floors == 0 {
        spawn_block(
            commands,
            cfg,
            beam_material,
            Vec2::new(base.x, base.y + BEAM_SIZE.y / 2.0),
            0.0,
            BEAM_SIZE,
            None,
        );
        return 1;
    }
    for floor in 0..floors {
        let floor_base = base.y + floor as f32 * FLOOR_HEIGHT;
        for dx in [-COLUMN_SPACING, COLUMN_SPACING] {
            spawn_block(
                commands,
                cfg,
                column_material,
                Vec2::new(base.x + dx, floor_base + COLUMN_SIZE.y / 2.0),
                0.0,
                COLUMN_SIZE,
                None,
            );
            count += 1;
        }
        spawn_block(
            commands,
            cfg,
            beam_material,
            Vec2::new(base.x, floor_base + COLUMN_SIZE.y + BEAM_SIZE.y / 2.0),
            0.0,
            BEAM_SIZE,
            None,
        );
        count += 1;
    }
    count
}

/// Spawns both towers of a structure spec. Returns the block count (the win
/// condition tracks it).
pub fn spawn_structure(commands: &mut Commands, cfg: &GameConfig, spec: &StructureSpec) -> u32 {
    let base: Vec2 = spec.base.into();
    let left = spawn_tower(
        commands,
        cfg,
        base - Vec2::new(TOWER_GAP, 0.0),
        spec.floors_left,
        spec.material_left,
        spec.material_right,
    );
    let right = spawn_tower(
        commands,
        cfg,
        base + Vec2::new(TOWER_GAP, 0.0),
        spec.floors_right,
        spec.material_right,
        spec.material_left,
    );
    info!(
        target: "level",
        "structure built: {left} blocks left, {right} blocks right"
    );
    left + right
}

/// Static arena floor; the collision resolver skips it (no `Destructible`).
pub fn spawn_ground(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(50.0, 0.5),
            Ground,
            LevelEntity,
        ))
        .id()
}

/// Everything needed to (re)create one bird's native body and logical state.
/// Built either from the level blueprint or from a persisted snapshot.
#[derive(Debug, Clone)]
pub struct BirdSeed {
    pub ability: BirdAbility,
    pub health: f32,
    pub density: f32,
    pub diameter: f32,
    pub texture_path: String,
    pub position: Vec2,
    pub launched: bool,
    pub order: usize,
}

impl BirdSeed {
    pub fn fresh(cfg: &GameConfig, order: usize, position: Vec2) -> Self {
        let ability = ABILITY_CYCLE[order % ABILITY_CYCLE.len()];
        Self {
            ability,
            health: cfg.bird.health,
            density: cfg.bird.density,
            diameter: cfg.bird.diameter,
            texture_path: ability.texture_path().to_string(),
            position,
            launched: false,
            order,
        }
    }

    /// A persisted bird without a position restores at the sling rest
    /// position (explicit absence, not zero-as-sentinel).
    pub fn from_snapshot(snap: &BirdSnapshot, rest: Vec2) -> Self {
        Self {
            ability: snap.ability,
            health: snap.health,
            density: snap.density,
            diameter: snap.diameter,
            texture_path: snap.texture_path.clone(),
            position: snap.position.map(Into::into).unwrap_or(rest),
            launched: snap.launched,
            order: snap.order,
        }
    }
}

/// Creates the bird's entity: circular dynamic body once launched, held fixed
/// while waiting in the queue.
pub fn spawn_bird(commands: &mut Commands, seed: &BirdSeed) -> Entity {
    let body = if seed.launched {
        RigidBody::Dynamic
    } else {
        RigidBody::Fixed
    };
    commands
        .spawn((
            Transform::from_translation(seed.position.extend(0.0)),
            body,
            Collider::ball(seed.diameter / 2.0),
            ColliderMassProperties::Density(seed.density),
            Restitution::coefficient(0.4),
            Velocity::default(),
            ActiveEvents::CONTACT_FORCE_EVENTS,
            Destructible {
                health: seed.health,
                collision: false,
                launched: seed.launched,
            },
            Bird {
                ability: seed.ability,
                density: seed.density,
                diameter: seed.diameter,
                texture_path: seed.texture_path.clone(),
                order: seed.order,
                ability_used: false,
            },
            LevelEntity,
        ))
        .id()
}

/// Spawns a fresh level's bird lineup: the first bird seated on the sling,
/// the rest queued behind it at ground height.
pub fn spawn_birds(commands: &mut Commands, cfg: &GameConfig, count: u32) -> u32 {
    let rest: Vec2 = cfg.slingshot.rest.into();
    for order in 0..count as usize {
        let position = if order == 0 {
            rest
        } else {
            Vec2::new(
                rest.x - cfg.slingshot.queue_spacing * order as f32,
                cfg.bird.diameter / 2.0,
            )
        };
        let seed = BirdSeed::fresh(cfg, order, position);
        let bird = spawn_bird(commands, &seed);
        if order == 0 {
            commands.entity(bird).insert(OnSling);
        }
    }
    count
}

/// Rebuilds persisted birds. Unlaunched ones are re-seated by the slingshot
/// system on the next frame.
pub fn spawn_birds_from_snapshot(
    commands: &mut Commands,
    cfg: &GameConfig,
    birds: &[BirdSnapshot],
) -> u32 {
    let rest: Vec2 = cfg.slingshot.rest.into();
    for snap in birds {
        let seed = BirdSeed::from_snapshot(snap, rest);
        spawn_bird(commands, &seed);
    }
    birds.len() as u32
}

/// Rebuilds persisted blocks with their surviving health.
pub fn spawn_blocks_from_snapshot(
    commands: &mut Commands,
    cfg: &GameConfig,
    blocks: &[BlockSnapshot],
) -> u32 {
    for snap in blocks {
        spawn_block(
            commands,
            cfg,
            snap.material,
            snap.position.into(),
            snap.angle,
            snap.size.into(),
            Some(snap.health),
        );
    }
    blocks.len() as u32
}
