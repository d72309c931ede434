pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod persistence;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::components::{Bird, BirdAbility, Block, Destructible, LevelEntity, Material};
pub use crate::core::config::GameConfig;
pub use crate::core::level::registry::LevelRegistry;
pub use crate::physics::destruction::DestructionQueue;
