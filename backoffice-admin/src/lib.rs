pub mod actions;
pub mod filters;
pub mod registry;
pub mod views;

pub use registry::{AdminRegistry, Entity, ListSpec};
