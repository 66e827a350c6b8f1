use glam::Vec2;
use sokol::{app as sapp, gfx as sg};

use crate::debug_print;
use crate::engine::time::FixedTimestep;
use crate::engine::{
    debug_flags, toggle_debug_overlay, toggle_debug_text, Color, DrawSurface, EngineServices, Game,
    GameConfig, InputEvent, InputManager,
};
use crate::orbit::assets::Assets;
use crate::orbit::config::SimConfig;
use crate::orbit::simulation::{SimContext, Simulation};

const CONTROLS: &str = "\
Gravity Assist Simulation
Controls:
  - Click and drag to launch a spacecraft
  - Press R to reset the simulation
  - Press ESC to quit";

/// The gravity-assist toy as an engine game.
pub struct GravityAssist {
    config: SimConfig,
    simulation: Simulation,
    timestep: FixedTimestep,
    pointer: Vec2,
}

impl GravityAssist {
    pub fn new(config: SimConfig) -> Self {
        let simulation = Simulation::new(SimContext {
            config: config.clone(),
            assets: Assets::none(),
        });
        Self {
            timestep: FixedTimestep::new(config.fps),
            config,
            simulation,
            pointer: Vec2::ZERO,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Applies this frame's input, then runs every fixed tick that is due.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32, events: &[InputEvent], pointer: Vec2) -> u32 {
        self.pointer = pointer;

        for event in events {
            match event {
                InputEvent::KeyPressed(sapp::Keycode::F1) => toggle_debug_text(),
                InputEvent::KeyPressed(sapp::Keycode::F3) => toggle_debug_overlay(),
                _ => self.simulation.handle_event(event),
            }
        }

        if !self.simulation.is_running() {
            return 0;
        }

        let ticks = self.timestep.advance(dt);
        for _ in 0..ticks {
            self.simulation.tick();
        }
        ticks
    }

    fn draw_overlay(&self, surface: &mut dyn DrawSurface, fps: Option<f32>) {
        let fps = fps.map_or_else(|| "--".to_string(), |fps| format!("{fps:.0}"));
        let text = format!("FPS {} | crafts {}", fps, self.simulation.crafts().len());
        let y = self.config.screen_height - 20.0;
        surface.text(Vec2::new(10.0, y), &text, 14.0, Color::rgb(255, 255, 0));
    }
}

impl Game for GravityAssist {
    fn config(&self) -> GameConfig {
        GameConfig::new()
            .with_title(&self.config.window_title)
            .with_size(self.config.screen_width as i32, self.config.screen_height as i32)
            .with_background(sg::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 })
    }

    fn init(&mut self, _config: &GameConfig, services: &mut EngineServices) {
        let assets = Assets::load(&self.config, &mut services.renderer.textures);
        debug_print!("assets: {:?}", assets);

        self.simulation = Simulation::new(SimContext {
            config: self.config.clone(),
            assets,
        });

        println!("{CONTROLS}");
    }

    fn update(&mut self, dt: f32, input: &InputManager, _services: &mut EngineServices) {
        self.advance(dt, input.events(), input.mouse_position());
    }

    fn render(&mut self, services: &mut EngineServices) {
        let fps = services.frame_stats.fps();
        let surface: &mut dyn DrawSurface = &mut *services.renderer;

        self.simulation.render(surface, self.pointer);
        if debug_flags().is_overlay_visible() {
            self.draw_overlay(surface, fps);
        }
    }

    fn wants_quit(&self) -> bool {
        !self.simulation.is_running()
    }

    fn shutdown(&mut self) {
        println!("Simulation ended!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::recording::{DrawCall, RecordingSurface};

    const FRAME: f32 = 1.0 / 60.0;

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerPressed {
            button: sapp::Mousebutton::Left,
            position: Vec2::new(x, y),
        }
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerReleased {
            button: sapp::Mousebutton::Left,
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn window_matches_screen() {
        let game = GravityAssist::new(SimConfig::default());
        let config = game.config();
        assert_eq!(config.window_title, "Gravity Assist Simulation");
        assert_eq!((config.window_width, config.window_height), (800, 600));
    }

    #[test]
    fn launch_then_tick_in_same_frame() {
        let mut game = GravityAssist::new(SimConfig::default());
        let ticks = game.advance(
            FRAME,
            &[press(100.0, 100.0), release(200.0, 100.0)],
            Vec2::new(200.0, 100.0),
        );

        assert_eq!(ticks, 1);
        let crafts = game.simulation().crafts();
        assert_eq!(crafts.len(), 1);
        assert_eq!(crafts[0].trail().len(), 1);
    }

    #[test]
    fn half_frames_accumulate() {
        let mut game = GravityAssist::new(SimConfig::default());
        assert_eq!(game.advance(FRAME / 2.0, &[], Vec2::ZERO), 0);
        assert_eq!(game.advance(FRAME / 2.0, &[], Vec2::ZERO), 1);
    }

    #[test]
    fn escape_requests_quit_and_stops_ticking() {
        let mut game = GravityAssist::new(SimConfig::default());
        let ticks = game.advance(
            FRAME,
            &[InputEvent::KeyPressed(sapp::Keycode::Escape)],
            Vec2::ZERO,
        );
        assert_eq!(ticks, 0);
        assert!(game.wants_quit());
    }

    #[test]
    fn overlay_reports_fps_and_count() {
        let game = GravityAssist::new(SimConfig::default());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        game.draw_overlay(&mut surface, Some(59.6));
        match &surface.calls[..] {
            [DrawCall::Text { text, position, .. }] => {
                assert_eq!(text, "FPS 60 | crafts 0");
                assert_eq!(*position, Vec2::new(10.0, 580.0));
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }
}
