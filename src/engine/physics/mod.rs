pub mod gravity;
pub mod world_bounds;
