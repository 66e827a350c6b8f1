use std::path::Path;

use crate::engine::{AssetError, TextureId, TextureManager};
use crate::orbit::config::SimConfig;
use crate::warn_print;

/// Images the simulation may draw with. Any of them can be missing, in
/// which case the procedural fallback is drawn instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Assets {
    pub background: Option<TextureId>,
    pub planet: Option<TextureId>,
    pub craft: Option<TextureId>,
}

impl Assets {
    /// No images at all; everything is drawn procedurally.
    pub fn none() -> Self {
        Self::default()
    }

    /// Loads the three images named in `config`, each scaled to the size it
    /// is drawn at. Failures are reported and leave that slot empty; a
    /// missing asset directory leaves all of them empty.
    pub fn load(config: &SimConfig, textures: &mut TextureManager) -> Self {
        if !config.assets_dir.is_dir() {
            warn_print!(
                "assets directory {} not found, using default shapes",
                config.assets_dir.display()
            );
            return Self::none();
        }

        let background = load_optional(
            textures,
            "background",
            &config.background_path(),
            (config.screen_width as u32, config.screen_height as u32),
        );
        let planet_px = (config.planet_radius * 2.0) as u32;
        let planet = load_optional(textures, "planet", &config.planet_path(), (planet_px, planet_px));
        let craft_px = config.craft_size as u32;
        let craft = load_optional(textures, "craft", &config.craft_path(), (craft_px, craft_px));

        Self { background, planet, craft }
    }
}

fn load_optional(
    textures: &mut TextureManager,
    name: &str,
    path: &Path,
    (width, height): (u32, u32),
) -> Option<TextureId> {
    match textures.load_texture(name, path, width.max(1), height.max(1)) {
        Ok(id) => Some(id),
        Err(AssetError::NotFound(path)) => {
            warn_print!("{} not found, using default shape", path.display());
            None
        }
        Err(err) => {
            warn_print!("Error loading {}: {}", name, err);
            None
        }
    }
}
