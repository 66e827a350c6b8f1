// src/engine/debug.rs

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct DebugFlags {
    pub debug_text: AtomicBool,
    pub show_overlay: AtomicBool,
}

impl DebugFlags {
    pub const fn new() -> Self {
        Self {
            debug_text: AtomicBool::new(false),
            show_overlay: AtomicBool::new(false),
        }
    }

    pub fn set_debug_text(&self, enabled: bool) {
        self.debug_text.store(enabled, Ordering::Relaxed);
    }

    pub fn set_show_overlay(&self, enabled: bool) {
        self.show_overlay.store(enabled, Ordering::Relaxed);
    }

    pub fn is_debug_text_enabled(&self) -> bool {
        self.debug_text.load(Ordering::Relaxed)
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.show_overlay.load(Ordering::Relaxed)
    }
}

static DEBUG_FLAGS: DebugFlags = DebugFlags::new();

pub fn debug_flags() -> &'static DebugFlags {
    &DEBUG_FLAGS
}

/// Rolling frame-time statistics for the debug overlay
pub struct FrameStats {
    frame_times: VecDeque<f32>,
    max_frame_samples: usize,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameStats {
    pub fn new(max_frame_samples: usize) -> Self {
        let max_frame_samples = max_frame_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_frame_samples + 1),
            max_frame_samples,
        }
    }

    pub fn update_frame_stats(&mut self, dt: f32) {
        self.frame_times.push_back(dt * 1000.0); // ms
        while self.frame_times.len() > self.max_frame_samples {
            self.frame_times.pop_front();
        }
    }

    pub fn average_frame_ms(&self) -> Option<f32> {
        if self.frame_times.is_empty() {
            return None;
        }
        Some(self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32)
    }

    pub fn fps(&self) -> Option<f32> {
        self.average_frame_ms().map(|ms| 1000.0 / ms.max(0.001))
    }
}

#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::engine::debug::debug_flags().is_debug_text_enabled() {
            println!("[DEBUG {}:{}] {}", file!(), line!(), format!($($arg)*));
        }
    };
}

/// Recovered faults. Always printed, to stderr.
#[macro_export]
macro_rules! warn_print {
    ($($arg:tt)*) => {
        eprintln!("[WARN {}:{}] {}", file!(), line!(), format!($($arg)*));
    };
}

/// Toggle debug text
pub fn toggle_debug_text() {
    let current = DEBUG_FLAGS.is_debug_text_enabled();
    DEBUG_FLAGS.set_debug_text(!current);
    println!("Debug text: {}", if !current { "ON" } else { "OFF" });
}

/// Toggle the fps overlay
pub fn toggle_debug_overlay() {
    let current = DEBUG_FLAGS.is_overlay_visible();
    DEBUG_FLAGS.set_show_overlay(!current);
    println!("Debug overlay: {}", if !current { "ON" } else { "OFF" });
}

pub fn set_debug_text(enabled: bool) {
    DEBUG_FLAGS.set_debug_text(enabled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_stats_keep_a_bounded_window() {
        let mut stats = FrameStats::new(3);
        assert!(stats.fps().is_none());

        for dt in [1.0, 1.0, 0.01, 0.01, 0.01] {
            stats.update_frame_stats(dt);
        }

        assert_relative_eq!(stats.average_frame_ms().unwrap(), 10.0, epsilon = 1e-3);
        assert_relative_eq!(stats.fps().unwrap(), 100.0, epsilon = 1e-2);
    }

    #[test]
    fn long_runs_stay_within_the_window() {
        let mut stats = FrameStats::new(60);
        for _ in 0..10_000 {
            stats.update_frame_stats(0.5);
        }
        stats.update_frame_stats(0.02);

        assert_eq!(stats.frame_times.len(), 60);
        assert_eq!(stats.frame_times.back(), Some(&20.0));
        assert_relative_eq!(stats.average_frame_ms().unwrap(), (59.0 * 500.0 + 20.0) / 60.0, epsilon = 1e-2);
    }
}
