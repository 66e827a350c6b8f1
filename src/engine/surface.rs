use glam::{Vec2, Vec4};

use crate::engine::texture::TextureId;

/// 8-bit RGB colour, the unit every draw call is coloured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 100, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Integer division of every channel, used for dimmed copies of a colour.
    pub fn divided(self, by: u8) -> Self {
        let by = by.max(1);
        Self::rgb(self.r / by, self.g / by, self.b / by)
    }

    /// Normalized RGBA for the GPU vertex format.
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        )
    }
}

/// The draw vocabulary the game issues each frame.
///
/// Coordinates are screen pixels with the origin in the top-left corner and
/// y growing downwards. Implementations never feed anything back into the
/// simulation; presenting the frame is the caller's business.
pub trait DrawSurface {
    /// Size of the drawable area in pixels.
    fn size(&self) -> Vec2;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn outline_polygon(&mut self, points: &[Vec2], width: f32, color: Color);

    /// Single line of text with its top-left corner at `position`.
    /// `size` is the glyph height in pixels.
    fn text(&mut self, position: Vec2, text: &str, size: f32, color: Color);

    /// Draws a loaded image of `size` centred on `center`, rotated clockwise
    /// (on screen) by `rotation` radians.
    fn blit(&mut self, texture: TextureId, center: Vec2, size: Vec2, rotation: f32);

    /// Fills the whole surface with a top-to-bottom gradient, one colour
    /// per pixel row.
    fn fill_vertical_gradient(&mut self, top: Color, bottom: Color);
}

/// Rotates `point` by `angle` radians using the screen-space convention
/// (y down, positive angles turn clockwise on screen).
pub fn rotate(point: Vec2, angle: f32) -> Vec2 {
    let (sin_a, cos_a) = angle.sin_cos();
    Vec2::new(
        point.x * cos_a - point.y * sin_a,
        point.x * sin_a + point.y * cos_a,
    )
}
