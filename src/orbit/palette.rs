use glam::Vec3;

use crate::engine::Color;

pub const SLOW: Color = Color::rgb(138, 43, 226); // violet
pub const MEDIUM: Color = Color::rgb(0, 255, 255); // cyan
pub const FAST: Color = Color::rgb(255, 100, 0); // orange-red

/// Maps a speed onto the violet -> cyan -> orange-red ramp.
#[derive(Debug, Clone, Copy)]
pub struct SpeedPalette {
    reference_max_speed: f32,
}

impl SpeedPalette {
    pub fn new(reference_max_speed: f32) -> Self {
        Self {
            reference_max_speed: reference_max_speed.max(f32::EPSILON),
        }
    }

    /// Speed scaled into `[0, 1]`.
    pub fn normalize(&self, speed: f32) -> f32 {
        (speed / self.reference_max_speed).clamp(0.0, 1.0)
    }

    /// Colour for `speed`, with every channel scaled by `alpha` (0..1).
    pub fn color(&self, speed: f32, alpha: f32) -> Color {
        let t = self.normalize(speed);
        let (from, to, progress) = if t < 0.5 {
            (SLOW, MEDIUM, t / 0.5)
        } else {
            (MEDIUM, FAST, (t - 0.5) / 0.5)
        };

        let from = channels(from);
        let rgb = (from + (channels(to) - from) * progress) * alpha;

        // Truncate like an integer cast, then clamp
        Color::rgb(to_channel(rgb.x), to_channel(rgb.y), to_channel(rgb.z))
    }
}

fn channels(color: Color) -> Vec3 {
    Vec3::new(color.r as f32, color.g as f32, color.b as f32)
}

fn to_channel(value: f32) -> u8 {
    value.trunc().clamp(0.0, 255.0) as u8
}
