use glam::Vec2;

use crate::engine::{Color, DrawSurface, TextureId};

pub const SKY_TOP: Color = Color::rgb(0, 0, 50);
pub const SKY_BOTTOM: Color = Color::rgb(10, 20, 150);
const STAR_COUNT: u32 = 50;

/// Fixed star positions scattered over a `width` x `height` area.
pub fn star_positions(width: f32, height: f32) -> Vec<Vec2> {
    let (w, h) = (width.max(1.0) as u32, height.max(1.0) as u32);
    (0..STAR_COUNT)
        .map(|i| Vec2::new(((i * 37) % w) as f32, ((i * 67) % h) as f32))
        .collect()
}

/// Full-screen image when available, otherwise a night-sky gradient with stars.
pub fn draw_background(surface: &mut dyn DrawSurface, image: Option<TextureId>, screen: Vec2) {
    match image {
        Some(texture) => surface.blit(texture, screen * 0.5, screen, 0.0),
        None => {
            surface.fill_vertical_gradient(SKY_TOP, SKY_BOTTOM);
            for star in star_positions(screen.x, screen.y) {
                surface.fill_circle(star, 1.0, Color::WHITE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::recording::{DrawCall, RecordingSurface};

    #[test]
    fn stars_are_stable_and_on_screen() {
        let stars = star_positions(800.0, 600.0);
        assert_eq!(stars.len(), 50);
        assert_eq!(stars[1], Vec2::new(37.0, 67.0));
        assert_eq!(stars[10], Vec2::new(370.0, 70.0));
        assert!(stars.iter().all(|s| s.x < 800.0 && s.y < 600.0));
        assert_eq!(stars, star_positions(800.0, 600.0));
    }

    #[test]
    fn fallback_is_gradient_then_stars() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_background(&mut surface, None, Vec2::new(800.0, 600.0));

        assert_eq!(
            surface.calls[0],
            DrawCall::Gradient { top: SKY_TOP, bottom: SKY_BOTTOM }
        );
        assert_eq!(surface.circles().len(), 50);
    }

    #[test]
    fn image_covers_the_screen() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_background(&mut surface, Some(TextureId(0)), Vec2::new(800.0, 600.0));
        assert_eq!(
            surface.calls,
            vec![DrawCall::Blit {
                texture: TextureId(0),
                center: Vec2::new(400.0, 300.0),
                size: Vec2::new(800.0, 600.0),
                rotation: 0.0
            }]
        );
    }
}
