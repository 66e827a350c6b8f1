use glam::Vec2;

/// Newtonian attraction towards a single fixed point mass.
#[derive(Debug, Clone, Copy)]
pub struct GravityField {
    pub constant: f32,
    pub source_position: Vec2,
    pub source_mass: f32,
}

impl GravityField {
    pub fn new(constant: f32, source_position: Vec2, source_mass: f32) -> Self {
        Self { constant, source_position, source_mass }
    }

    /// Force magnitude `G * m * M / d^2` on a body of `target_mass` at `distance`.
    pub fn calculate_force(&self, distance: f32, target_mass: f32) -> f32 {
        self.constant * target_mass * self.source_mass / (distance * distance)
    }

    /// Acceleration felt by a body of `target_mass` at `position`.
    ///
    /// A body sitting exactly on the source gets no acceleration at all.
    pub fn acceleration_at(&self, position: Vec2, target_mass: f32) -> Vec2 {
        let to_source = self.source_position - position;
        let distance = to_source.length();

        if distance <= 0.0 || target_mass <= 0.0 {
            return Vec2::ZERO;
        }

        let force = self.calculate_force(distance, target_mass);
        let angle = to_source.y.atan2(to_source.x);
        let accel = force / target_mass;

        Vec2::new(accel * angle.cos(), accel * angle.sin())
    }
}
