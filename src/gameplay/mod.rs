pub mod abilities;
pub mod level;
pub mod progress;
pub mod slingshot;
pub mod structure;
