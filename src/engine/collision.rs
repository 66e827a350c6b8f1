use glam::Vec2;

#[derive(Copy, Clone, Debug)]
pub struct Collider {
    pub position: Vec2,
    pub radius: f32,
}

impl Collider {
    pub fn new_circle(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Touching circles count as colliding.
pub fn check_collision(a: &Collider, b: &Collider) -> bool {
    circle_vs_circle(a.position, a.radius, b.position, b.radius)
}

fn circle_vs_circle(pos1: Vec2, r1: f32, pos2: Vec2, r2: f32) -> bool {
    let distance_sq = (pos1 - pos2).length_squared();
    let radius_sum = r1 + r2;
    distance_sq <= radius_sum * radius_sum
}
