use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsViolation {
    Left(f32),
    Right(f32),
    Top(f32),
    Bottom(f32),
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounds of a `width` x `height` screen with the origin in the top-left corner.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Returns the first side `position` lies beyond once every side is pushed
    /// out by `safety_margin`. Points exactly on the expanded edge are inside.
    pub fn violation(&self, position: Vec2, safety_margin: f32) -> Option<BoundsViolation> {
        let min = self.min - Vec2::splat(safety_margin);
        let max = self.max + Vec2::splat(safety_margin);

        if position.x < min.x {
            Some(BoundsViolation::Left(min.x - position.x))
        } else if position.x > max.x {
            Some(BoundsViolation::Right(position.x - max.x))
        } else if position.y < min.y {
            Some(BoundsViolation::Top(min.y - position.y))
        } else if position.y > max.y {
            Some(BoundsViolation::Bottom(position.y - max.y))
        } else {
            None
        }
    }

    pub fn contains(&self, position: Vec2, safety_margin: f32) -> bool {
        self.violation(position, safety_margin).is_none()
    }
}
