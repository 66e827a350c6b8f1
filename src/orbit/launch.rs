use glam::Vec2;

use crate::orbit::config::SimConfig;
use crate::orbit::craft::Craft;

/// Builds a craft at `start` whose velocity is the drag vector scaled down
/// by the velocity divisor.
pub fn launch_craft(start: Vec2, end: Vec2, config: &SimConfig) -> Craft {
    let velocity = (end - start) / config.velocity_divisor;
    Craft::from_config(start, velocity, config)
}

/// Press-then-release drag tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LaunchGesture {
    #[default]
    Idle,
    Armed { start: Vec2 },
}

impl LaunchGesture {
    /// Arms the gesture. A second press while armed keeps the first point.
    pub fn press(&mut self, position: Vec2) {
        if let LaunchGesture::Idle = self {
            *self = LaunchGesture::Armed { start: position };
        }
    }

    /// Completes the gesture, returning `(start, end)` if it was armed.
    pub fn release(&mut self, position: Vec2) -> Option<(Vec2, Vec2)> {
        match std::mem::take(self) {
            LaunchGesture::Armed { start } => Some((start, position)),
            LaunchGesture::Idle => None,
        }
    }

    pub fn start(&self) -> Option<Vec2> {
        match self {
            LaunchGesture::Armed { start } => Some(*start),
            LaunchGesture::Idle => None,
        }
    }
}
