use bevy::prelude::*;

use crate::core::components::{Bird, Block};

/// Attaches sprites to freshly spawned blocks and birds from their texture
/// paths. Split from spawning so headless apps (tests) never need an
/// `AssetServer`; the renderer only reads positions the physics layer owns.
pub struct SpriteAttachPlugin;

impl Plugin for SpriteAttachPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (attach_block_sprites, attach_bird_sprites));
    }
}

fn attach_block_sprites(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    blocks: Query<(Entity, &Block), Added<Block>>,
) {
    let Some(assets) = asset_server else {
        return;
    };
    for (entity, block) in &blocks {
        commands.entity(entity).insert(Sprite {
            image: assets.load(block.material.texture_path()),
            custom_size: Some(block.size),
            ..default()
        });
    }
}

fn attach_bird_sprites(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    birds: Query<(Entity, &Bird), Added<Bird>>,
) {
    let Some(assets) = asset_server else {
        return;
    };
    for (entity, bird) in &birds {
        commands.entity(entity).insert(Sprite {
            image: assets.load(bird.texture_path.as_str()),
            custom_size: Some(Vec2::splat(bird.diameter)),
            ..default()
        });
    }
}
