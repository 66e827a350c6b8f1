pub mod app;
pub mod collision;
pub mod debug;
pub mod graphics;
pub mod input;
pub mod physics;
pub mod surface;
pub mod text;
pub mod texture;
pub mod time;

use sokol::gfx as sg;
pub use app::*;
pub use debug::{debug_flags, toggle_debug_overlay, toggle_debug_text, FrameStats};
pub use graphics::*;
pub use input::*;
pub use physics::{gravity, world_bounds};
pub use surface::{Color, DrawSurface};
pub use texture::{AssetError, TextureId, TextureManager};

#[derive(Clone)]
pub struct GameConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub background_color: sg::Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "My new Game".to_string(),
            window_width: 800,
            window_height: 600,
            background_color: sg::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 },
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.window_title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_background(mut self, color: sg::Color) -> Self {
        self.background_color = color;
        self
    }
}

/// What the engine lends a game for the duration of one callback
pub struct EngineServices<'a> {
    pub renderer: &'a mut Renderer,
    pub frame_stats: &'a FrameStats,
}

// Trait that games must implement
pub trait Game {
    fn config(&self) -> GameConfig;

    /// Called once the graphics context exists. Load textures here.
    fn init(&mut self, config: &GameConfig, services: &mut EngineServices);

    /// Called once per frame with the wall-clock frame duration in seconds.
    fn update(&mut self, dt: f32, input: &InputManager, services: &mut EngineServices);

    fn render(&mut self, services: &mut EngineServices);

    /// Raw sokol events that are not gameplay input (focus, resize, ...)
    fn handle_event(&mut self, _event: &sokol::app::Event) {}

    /// Polled after every update; returning true closes the window.
    fn wants_quit(&self) -> bool {
        false
    }

    fn shutdown(&mut self) {}
}
