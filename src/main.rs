use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierDebugRenderPlugin;

use bird_blitz::{GameConfig, GamePlugin};

fn main() {
    // Load configuration (fall back to defaults if missing)
    let cfg = GameConfig::load_or_default("assets/config/game.ron");

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.window.width, cfg.window.height).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins(GamePlugin);
    if cfg.rapier_debug {
        app.add_plugins(RapierDebugRenderPlugin::default());
    }
    app.run();
}
