pub mod collision;
pub mod destruction;
pub mod rapier;
