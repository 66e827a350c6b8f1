//! The gravity-assist toy: one fixed planet, crafts launched by dragging,
//! and the trails they leave while falling around it.

pub mod assets;
pub mod background;
pub mod config;
pub mod craft;
pub mod game;
pub mod launch;
pub mod palette;
pub mod planet;
pub mod simulation;
pub mod trail;

pub use assets::Assets;
pub use config::SimConfig;
pub use craft::Craft;
pub use game::GravityAssist;
pub use launch::{launch_craft, LaunchGesture};
pub use planet::Planet;
pub use simulation::{Command, Removal, SimContext, Simulation};
