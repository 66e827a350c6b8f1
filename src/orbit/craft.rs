use glam::Vec2;

use crate::engine::collision::Collider;
use crate::engine::surface::rotate;
use crate::engine::{Color, DrawSurface, TextureId};
use crate::orbit::config::SimConfig;
use crate::orbit::palette::SpeedPalette;
use crate::orbit::planet::Planet;
use crate::orbit::trail::Trail;

/// Nose-up triangle, in pixels relative to the craft centre.
const FALLBACK_HULL: [Vec2; 3] = [
    Vec2::new(0.0, -10.0),
    Vec2::new(-6.0, 8.0),
    Vec2::new(6.0, 8.0),
];

const WAKE_PARTICLES: usize = 3;

/// A small dot left behind a fast craft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeParticle {
    pub position: Vec2,
    pub radius: f32,
}

/// A launched point mass falling around the planet.
#[derive(Debug, Clone)]
pub struct Craft {
    pub position: Vec2,
    pub velocity: Vec2,
    mass: f32,
    /// Degrees, 0 = nose up, clockwise on screen.
    heading: f32,
    size: f32,
    trail: Trail,
}

impl Craft {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32, size: f32, max_trail_length: usize) -> Self {
        Self {
            position,
            velocity,
            mass,
            heading: 0.0,
            size,
            trail: Trail::new(max_trail_length),
        }
    }

    pub fn from_config(position: Vec2, velocity: Vec2, config: &SimConfig) -> Self {
        Self::new(
            position,
            velocity,
            config.craft_mass,
            config.craft_size,
            config.max_trail_length,
        )
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn collision_radius(&self) -> f32 {
        (self.size / 2.0).floor()
    }

    pub fn collider(&self) -> Collider {
        Collider::new_circle(self.position, self.collision_radius())
    }

    /// Advances one tick.
    ///
    /// Velocity picks up the planet's pull first, the resulting speed is
    /// recorded against the position the craft is leaving, then the craft
    /// moves. The heading only follows velocity while the craft is moving.
    pub fn update(&mut self, planet: &Planet) {
        let acceleration = planet.field().acceleration_at(self.position, self.mass);
        self.velocity += acceleration;

        let speed = self.speed();
        self.trail.record(self.position, speed);

        self.position += self.velocity;

        if self.velocity != Vec2::ZERO {
            self.heading = self.velocity.y.atan2(self.velocity.x).to_degrees() + 90.0;
        }
    }

    /// Three dots trailing opposite the velocity, nearest first, each
    /// nudged diagonally by its index. Empty below `threshold`.
    pub fn wake_particles(&self, threshold: f32) -> Vec<WakeParticle> {
        let speed = self.speed();
        if speed <= threshold || speed <= 0.0 {
            return Vec::new();
        }

        let behind = self.velocity.y.atan2(self.velocity.x) + std::f32::consts::PI;
        let direction = Vec2::new(behind.cos(), behind.sin());

        (0..WAKE_PARTICLES)
            .map(|i| {
                let offset_distance = 10.0 + i as f32 * 5.0;
                let jitter = Vec2::splat((i as f32 - 1.0) * 3.0);
                WakeParticle {
                    position: self.position + direction * offset_distance + jitter,
                    radius: (3.0 - i as f32).max(1.0),
                }
            })
            .collect()
    }

    /// Fallback hull turned to the current heading, in screen coordinates.
    pub fn hull(&self) -> [Vec2; 3] {
        let angle = self.heading.to_radians();
        FALLBACK_HULL.map(|p| self.position + rotate(p, angle))
    }

    /// Trail, wake, body and speed label, in that order.
    pub fn draw(
        &self,
        surface: &mut dyn DrawSurface,
        palette: &SpeedPalette,
        image: Option<TextureId>,
        config: &SimConfig,
    ) {
        self.trail.draw(surface, palette, config.glow_speed_threshold);

        let speed = self.speed();
        let wake = self.wake_particles(config.particle_speed_threshold);
        if !wake.is_empty() {
            let color = palette.color(speed, 0.8);
            for particle in wake {
                surface.fill_circle(particle.position.trunc(), particle.radius, color);
            }
        }

        match image {
            Some(texture) => {
                surface.blit(
                    texture,
                    self.position,
                    Vec2::splat(self.size),
                    self.heading.to_radians(),
                );
            }
            None => {
                let hull = self.hull();
                surface.fill_polygon(&hull, Color::RED);
                surface.outline_polygon(&hull, 2.0, Color::WHITE);
            }
        }

        let label = format!("{:.1} km/s", speed * config.speed_display_factor);
        surface.text(
            (self.position - Vec2::splat(25.0)).trunc(),
            &label,
            18.0,
            palette.color(speed, 1.0),
        );
    }
}
