use glam::Vec2;

use crate::engine::collision::Collider;
use crate::engine::gravity::GravityField;
use crate::engine::{Color, DrawSurface, TextureId};
use crate::orbit::config::SimConfig;

/// The one fixed attracting body. Never changes after construction.
#[derive(Debug, Clone, Copy)]
pub struct Planet {
    position: Vec2,
    mass: f32,
    radius: f32,
    field: GravityField,
}

impl Planet {
    pub fn new(position: Vec2, mass: f32, radius: f32, gravity_constant: f32) -> Self {
        Self {
            position,
            mass,
            radius,
            field: GravityField::new(gravity_constant, position, mass),
        }
    }

    /// Centred on the screen, with the configured mass and radius.
    pub fn from_config(config: &SimConfig) -> Self {
        let center = Vec2::new(
            (config.screen_width / 2.0).floor(),
            (config.screen_height / 2.0).floor(),
        );
        Self::new(center, config.planet_mass, config.planet_radius, config.gravity_constant)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn field(&self) -> &GravityField {
        &self.field
    }

    pub fn collider(&self) -> Collider {
        Collider::new_circle(self.position, self.radius)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, image: Option<TextureId>) {
        match image {
            Some(texture) => {
                surface.blit(texture, self.position, Vec2::splat(self.radius * 2.0), 0.0);
            }
            None => {
                surface.fill_circle(self.position, self.radius, Color::BLUE);
                // Highlight towards the upper left
                surface.fill_circle(self.position - Vec2::splat(15.0), 10.0, Color::WHITE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::recording::{DrawCall, RecordingSurface};

    #[test]
    fn sits_in_the_middle_of_the_screen() {
        let planet = Planet::from_config(&SimConfig::default());
        assert_eq!(planet.position(), Vec2::new(400.0, 300.0));
        assert_eq!(planet.field().source_position, planet.position());
        assert_eq!(planet.field().source_mass, 100.0);
    }

    #[test]
    fn fallback_is_disk_with_highlight() {
        let planet = Planet::from_config(&SimConfig::default());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        planet.draw(&mut surface, None);

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Circle {
                    center: Vec2::new(400.0, 300.0),
                    radius: 50.0,
                    color: Color::BLUE
                },
                DrawCall::Circle {
                    center: Vec2::new(385.0, 285.0),
                    radius: 10.0,
                    color: Color::WHITE
                },
            ]
        );
    }

    #[test]
    fn image_is_scaled_to_diameter() {
        let planet = Planet::from_config(&SimConfig::default());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        planet.draw(&mut surface, Some(TextureId(3)));

        assert_eq!(
            surface.calls,
            vec![DrawCall::Blit {
                texture: TextureId(3),
                center: Vec2::new(400.0, 300.0),
                size: Vec2::splat(100.0),
                rotation: 0.0
            }]
        );
    }
}
