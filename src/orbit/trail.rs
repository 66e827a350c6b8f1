use glam::{IVec2, Vec2};
use std::collections::VecDeque;

use crate::engine::DrawSurface;
use crate::orbit::palette::SpeedPalette;

/// One recorded point: where the craft was and how fast it was going.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub point: IVec2,
    pub speed: f32,
}

/// Bounded position + speed history of one craft, oldest first.
///
/// Points and speeds are stored together, so both sequences always have
/// the same length.
#[derive(Debug, Clone)]
pub struct Trail {
    samples: VecDeque<TrailSample>,
    max_len: usize,
}

impl Trail {
    pub fn new(max_len: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    /// Appends a sample, evicting the oldest once the bound is exceeded.
    /// Positions are truncated to whole pixels.
    pub fn record(&mut self, position: Vec2, speed: f32) {
        self.samples.push_back(TrailSample {
            point: position.as_ivec2(),
            speed,
        });
        while self.samples.len() > self.max_len {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn samples(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    pub fn points(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.samples.iter().map(|s| s.point)
    }

    pub fn speeds(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| s.speed)
    }

    /// Draws one segment per consecutive pair of points.
    ///
    /// Older segments are dimmer, colour follows the speed recorded at the
    /// segment start, and fast segments get thicker with a dark glow beneath.
    pub fn draw(&self, surface: &mut dyn DrawSurface, palette: &SpeedPalette, glow_threshold: f32) {
        let len = self.samples.len();
        if len < 2 {
            return;
        }

        for i in 1..len {
            let start = self.samples[i - 1];
            let end = self.samples[i];

            let alpha = i as f32 / len as f32;
            let speed = start.speed;
            let color = palette.color(speed, alpha);
            let thickness = segment_thickness(speed);

            let (from, to) = (start.point.as_vec2(), end.point.as_vec2());
            if speed > glow_threshold {
                surface.line(from, to, thickness + 2.0, color.divided(3));
            }
            surface.line(from, to, thickness, color);
        }
    }
}

/// `max(1, 2 + speed / 5 * 3)` in whole pixels.
pub fn segment_thickness(speed: f32) -> f32 {
    (2.0 + speed / 5.0 * 3.0).trunc().max(1.0)
}
