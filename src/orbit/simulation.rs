use glam::Vec2;
use sokol::app as sapp;

use crate::debug_print;
use crate::engine::collision::check_collision;
use crate::engine::world_bounds::{BoundsViolation, WorldBounds};
use crate::engine::{Color, DrawSurface, InputEvent};
use crate::orbit::assets::Assets;
use crate::orbit::background::draw_background;
use crate::orbit::config::SimConfig;
use crate::orbit::craft::Craft;
use crate::orbit::launch::{launch_craft, LaunchGesture};
use crate::orbit::palette::SpeedPalette;
use crate::orbit::planet::Planet;

/// Everything a simulation needs from the outside world, handed over once.
#[derive(Debug, Clone, Default)]
pub struct SimContext {
    pub config: SimConfig,
    pub assets: Assets,
}

/// What the simulation understands from user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Reset,
    Press(Vec2),
    Release(Vec2),
}

impl Command {
    /// Escape or closing the window quits, R resets, the left button drags.
    /// Anything else is not a command.
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match *event {
            InputEvent::QuitRequested => Some(Command::Quit),
            InputEvent::KeyPressed(sapp::Keycode::Escape) => Some(Command::Quit),
            InputEvent::KeyPressed(sapp::Keycode::R) => Some(Command::Reset),
            InputEvent::PointerPressed { button: sapp::Mousebutton::Left, position } => {
                Some(Command::Press(position))
            }
            InputEvent::PointerReleased { button: sapp::Mousebutton::Left, position } => {
                Some(Command::Release(position))
            }
            _ => None,
        }
    }
}

/// Why a craft left the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Removal {
    OutOfBounds(BoundsViolation),
    HitPlanet,
}

/// The planet, the active crafts and the pending launch.
pub struct Simulation {
    config: SimConfig,
    assets: Assets,
    planet: Planet,
    bounds: WorldBounds,
    palette: SpeedPalette,
    crafts: Vec<Craft>,
    gesture: LaunchGesture,
    running: bool,
}

impl Simulation {
    pub fn new(context: SimContext) -> Self {
        let SimContext { config, assets } = context;
        Self {
            planet: Planet::from_config(&config),
            bounds: WorldBounds::from_size(config.screen_width, config.screen_height),
            palette: SpeedPalette::new(config.reference_max_speed),
            crafts: Vec::new(),
            gesture: LaunchGesture::Idle,
            running: true,
            config,
            assets,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn crafts(&self) -> &[Craft] {
        &self.crafts
    }

    pub fn gesture(&self) -> LaunchGesture {
        self.gesture
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Puts a craft straight into play, bypassing the launch gesture.
    pub fn add_craft(&mut self, craft: Craft) {
        self.crafts.push(craft);
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Some(command) = Command::from_event(event) {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::Reset => {
                self.crafts.clear();
                println!("Simulation reset!");
            }
            Command::Press(position) => self.gesture.press(position),
            Command::Release(position) => {
                if let Some((start, end)) = self.gesture.release(position) {
                    self.crafts.push(launch_craft(start, end, &self.config));
                    println!("Spacecraft launched! Total: {}", self.crafts.len());
                }
            }
        }
    }

    /// One fixed step: move every craft, then keep only the ones that are
    /// still on screen and clear of the planet.
    pub fn tick(&mut self) {
        let planet = self.planet;
        let crafts = std::mem::take(&mut self.crafts);

        self.crafts = crafts
            .into_iter()
            .filter_map(|mut craft| {
                craft.update(&planet);
                match self.removal(&craft) {
                    Some(reason) => {
                        debug_print!("craft removed at {:?}: {:?}", craft.position, reason);
                        None
                    }
                    None => Some(craft),
                }
            })
            .collect();
    }

    /// Drops crafts that are out of bounds or touching the planet, without
    /// moving anything.
    pub fn prune(&mut self) {
        let survivors: Vec<Craft> = std::mem::take(&mut self.crafts)
            .into_iter()
            .filter(|craft| self.removal(craft).is_none())
            .collect();
        self.crafts = survivors;
    }

    /// Whether `craft` has to go, and why.
    pub fn removal(&self, craft: &Craft) -> Option<Removal> {
        if let Some(violation) = self.bounds.violation(craft.position, self.config.boundary_margin) {
            return Some(Removal::OutOfBounds(violation));
        }
        if check_collision(&craft.collider(), &self.planet.collider()) {
            return Some(Removal::HitPlanet);
        }
        None
    }

    /// Background, launch preview, crafts, planet, HUD.
    pub fn render(&self, surface: &mut dyn DrawSurface, pointer: Vec2) {
        let screen = Vec2::new(self.config.screen_width, self.config.screen_height);
        draw_background(surface, self.assets.background, screen);

        if let Some(start) = self.gesture.start() {
            surface.line(start, pointer, 2.0, Color::WHITE);
            match self.assets.craft {
                Some(texture) => {
                    surface.blit(texture, start, Vec2::splat(self.config.craft_size), 0.0)
                }
                None => surface.fill_circle(start, 8.0, Color::RED),
            }
        }

        for craft in &self.crafts {
            craft.draw(surface, &self.palette, self.assets.craft, &self.config);
        }

        self.planet.draw(surface, self.assets.planet);

        surface.text(Vec2::new(10.0, 10.0), &self.hud_text(), 24.0, Color::WHITE);
    }

    pub fn hud_text(&self) -> String {
        format!(
            "Spacecraft: {} | Press R to reset | ESC to quit",
            self.crafts.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::recording::{DrawCall, RecordingSurface};
    use crate::engine::TextureId;

    fn sim() -> Simulation {
        Simulation::new(SimContext::default())
    }

    fn craft_at(sim: &Simulation, position: Vec2) -> Craft {
        Craft::from_config(position, Vec2::ZERO, sim.config())
    }

    #[test]
    fn drag_launches_one_craft() {
        let mut sim = sim();
        sim.apply(Command::Press(Vec2::new(100.0, 100.0)));
        assert!(sim.crafts().is_empty());
        assert_eq!(sim.gesture().start(), Some(Vec2::new(100.0, 100.0)));

        sim.apply(Command::Release(Vec2::new(200.0, 50.0)));
        assert_eq!(sim.crafts().len(), 1);
        assert_eq!(sim.crafts()[0].velocity, Vec2::new(1.0, -0.5));
        assert_eq!(sim.gesture(), LaunchGesture::Idle);
    }

    #[test]
    fn release_without_press_does_nothing() {
        let mut sim = sim();
        sim.apply(Command::Release(Vec2::new(200.0, 50.0)));
        assert!(sim.crafts().is_empty());
    }

    #[test]
    fn reset_clears_crafts_but_keeps_gesture_and_planet() {
        let mut sim = sim();
        for x in [100.0, 150.0, 200.0] {
            let craft = craft_at(&sim, Vec2::new(x, 100.0));
            sim.add_craft(craft);
        }
        sim.apply(Command::Press(Vec2::new(5.0, 5.0)));
        let planet_before = sim.planet().position();

        sim.apply(Command::Reset);
        assert!(sim.crafts().is_empty());
        assert_eq!(sim.gesture().start(), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(sim.planet().position(), planet_before);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut sim = sim();
        assert!(sim.is_running());
        sim.handle_event(&InputEvent::KeyPressed(sapp::Keycode::Escape));
        assert!(!sim.is_running());
    }

    #[test]
    fn events_map_to_commands() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(Command::from_event(&InputEvent::QuitRequested), Some(Command::Quit));
        assert_eq!(
            Command::from_event(&InputEvent::KeyPressed(sapp::Keycode::R)),
            Some(Command::Reset)
        );
        assert_eq!(
            Command::from_event(&InputEvent::PointerPressed {
                button: sapp::Mousebutton::Left,
                position: p
            }),
            Some(Command::Press(p))
        );
        assert_eq!(
            Command::from_event(&InputEvent::PointerReleased {
                button: sapp::Mousebutton::Left,
                position: p
            }),
            Some(Command::Release(p))
        );
        assert_eq!(Command::from_event(&InputEvent::KeyPressed(sapp::Keycode::Space)), None);
        assert_eq!(
            Command::from_event(&InputEvent::PointerPressed {
                button: sapp::Mousebutton::Right,
                position: p
            }),
            None
        );
    }

    #[test]
    fn removal_rules() {
        let sim = sim();
        let planet = sim.planet().position();

        let outside = craft_at(&sim, Vec2::new(800.0 + 51.0, 300.0));
        assert_eq!(
            sim.removal(&outside),
            Some(Removal::OutOfBounds(BoundsViolation::Right(1.0)))
        );

        // planet radius + craft radius - 1
        let grazing = craft_at(&sim, planet + Vec2::new(59.0, 0.0));
        assert_eq!(sim.removal(&grazing), Some(Removal::HitPlanet));

        let safe = craft_at(&sim, Vec2::new(100.0, 100.0));
        assert_eq!(sim.removal(&safe), None);
    }

    #[test]
    fn prune_keeps_only_safe_crafts() {
        let mut sim = sim();
        let planet = sim.planet().position();
        for position in [
            Vec2::new(851.0, 300.0),
            Vec2::new(-60.0, 300.0),
            planet + Vec2::new(0.0, 59.0),
            Vec2::new(100.0, 100.0),
        ] {
            let craft = craft_at(&sim, position);
            sim.add_craft(craft);
        }

        sim.prune();
        assert_eq!(sim.crafts().len(), 1);
        assert_eq!(sim.crafts()[0].position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn tick_moves_then_removes() {
        let mut sim = sim();
        // About to cross the right margin
        sim.add_craft(Craft::from_config(Vec2::new(849.0, 300.0), Vec2::new(5.0, 0.0), sim.config()));
        sim.add_craft(craft_at(&sim, Vec2::new(100.0, 100.0)));

        sim.tick();
        assert_eq!(sim.crafts().len(), 1);
        assert_eq!(sim.crafts()[0].trail().len(), 1);
    }

    #[test]
    fn render_order() {
        let mut sim = sim();
        sim.add_craft(Craft::from_config(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), sim.config()));
        sim.apply(Command::Press(Vec2::new(50.0, 50.0)));

        let mut surface = RecordingSurface::new(800.0, 600.0);
        sim.render(&mut surface, Vec2::new(80.0, 60.0));

        assert!(matches!(surface.calls[0], DrawCall::Gradient { .. }));

        // Preview sits right after the 50 stars
        assert_eq!(
            surface.calls[51],
            DrawCall::Line {
                from: Vec2::new(50.0, 50.0),
                to: Vec2::new(80.0, 60.0),
                width: 2.0,
                color: Color::WHITE
            }
        );
        assert_eq!(
            surface.calls[52],
            DrawCall::Circle { center: Vec2::new(50.0, 50.0), radius: 8.0, color: Color::RED }
        );

        let planet_idx = surface
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::Circle { radius, .. } if *radius == 50.0))
            .unwrap();
        let craft_idx = surface
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::Polygon { .. }))
            .unwrap();
        assert!(craft_idx < planet_idx);

        match surface.calls.last() {
            Some(DrawCall::Text { text, position, .. }) => {
                assert_eq!(text, "Spacecraft: 1 | Press R to reset | ESC to quit");
                assert_eq!(*position, Vec2::new(10.0, 10.0));
            }
            other => panic!("HUD should be last, got {other:?}"),
        }
    }

    #[test]
    fn preview_uses_craft_image_when_loaded() {
        let mut sim = Simulation::new(SimContext {
            config: SimConfig::default(),
            assets: Assets { craft: Some(TextureId(2)), ..Assets::none() },
        });
        sim.apply(Command::Press(Vec2::new(50.0, 50.0)));

        let mut surface = RecordingSurface::new(800.0, 600.0);
        sim.render(&mut surface, Vec2::new(80.0, 60.0));
        assert_eq!(
            surface.calls[52],
            DrawCall::Blit {
                texture: TextureId(2),
                center: Vec2::new(50.0, 50.0),
                size: Vec2::splat(20.0),
                rotation: 0.0
            }
        );
    }
}
