pub mod registry;
pub mod spec;

// Re-export primary types for convenience
pub use registry::{ActiveLevel, LevelRegistry, LevelSlot};
pub use spec::{StructureSpec, Vec2Def};
