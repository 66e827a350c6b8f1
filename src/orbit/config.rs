use std::path::PathBuf;

/// Every tunable of the simulation. Units are screen pixels and ticks.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub window_title: String,
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,

    pub gravity_constant: f32,
    pub planet_radius: f32,
    pub planet_mass: f32,

    pub craft_mass: f32,
    /// Edge length of the craft sprite; half of it is the collision radius.
    pub craft_size: f32,
    pub velocity_divisor: f32,
    pub max_trail_length: usize,
    pub boundary_margin: f32,

    /// Speed at which the trail colour saturates to the hot end.
    pub reference_max_speed: f32,
    pub particle_speed_threshold: f32,
    pub glow_speed_threshold: f32,
    /// Multiplier from simulation speed to the km/s shown on screen.
    pub speed_display_factor: f32,

    pub assets_dir: PathBuf,
    pub background_file: String,
    pub planet_file: String,
    pub craft_file: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window_title: "Gravity Assist Simulation".to_string(),
            screen_width: 800.0,
            screen_height: 600.0,
            fps: 60,

            gravity_constant: 5.0,
            planet_radius: 50.0,
            planet_mass: 100.0,

            craft_mass: 5.0,
            craft_size: 20.0,
            velocity_divisor: 100.0,
            max_trail_length: 50,
            boundary_margin: 50.0,

            reference_max_speed: 15.0,
            particle_speed_threshold: 3.0,
            glow_speed_threshold: 5.0,
            speed_display_factor: 2.5,

            assets_dir: PathBuf::from("."),
            background_file: "background.jpg".to_string(),
            planet_file: "jupiter.png".to_string(),
            craft_file: "spaceship.png".to_string(),
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_width = width.max(1.0);
        self.screen_height = height.max(1.0);
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    pub fn with_max_trail_length(mut self, len: usize) -> Self {
        self.max_trail_length = len;
        self
    }

    pub fn craft_collision_radius(&self) -> f32 {
        // Integer half, matching the sprite grid
        (self.craft_size / 2.0).floor()
    }

    pub fn background_path(&self) -> PathBuf {
        self.assets_dir.join(&self.background_file)
    }

    pub fn planet_path(&self) -> PathBuf {
        self.assets_dir.join(&self.planet_file)
    }

    pub fn craft_path(&self) -> PathBuf {
        self.assets_dir.join(&self.craft_file)
    }
}
