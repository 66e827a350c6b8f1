use image::{imageops::FilterType, RgbaImage};
use sokol::gfx as sg;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Handle to an image uploaded through the `TextureManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Reads an image from disk and scales it to exactly `width` x `height`.
pub fn load_scaled(path: &Path, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(img.resize_exact(width, height, FilterType::Triangle).to_rgba8())
}

pub struct TextureManager {
    textures: HashMap<TextureId, sg::Image>,
    names: HashMap<String, TextureId>,
    next_id: u32,
    white_texture: sg::Image,
    sampler: sg::Sampler,
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            names: HashMap::new(),
            next_id: 0,
            white_texture: sg::Image::default(),
            sampler: sg::Sampler::default(),
        }
    }

    pub fn init(&mut self) {
        let white_pixels = [255u8, 255, 255, 255];
        self.white_texture = make_rgba_image(1, 1, &white_pixels);

        self.sampler = sg::make_sampler(&sg::SamplerDesc {
            min_filter: sg::Filter::Linear,
            mag_filter: sg::Filter::Linear,
            wrap_u: sg::Wrap::ClampToEdge,
            wrap_v: sg::Wrap::ClampToEdge,
            ..Default::default()
        });
    }

    /// Loads `path` scaled to `width` x `height` and uploads it under `name`.
    /// A name that was already loaded returns the cached handle.
    pub fn load_texture(
        &mut self,
        name: &str,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<TextureId, AssetError> {
        if let Some(&id) = self.names.get(name) {
            return Ok(id);
        }

        let rgba = load_scaled(path, width, height)?;
        let (w, h) = rgba.dimensions();
        let image = make_rgba_image(w as i32, h as i32, rgba.as_raw());

        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, image);
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get_texture(&self, id: TextureId) -> Option<sg::Image> {
        self.textures.get(&id).copied()
    }

    pub fn get_white_texture(&self) -> sg::Image {
        self.white_texture
    }

    pub fn sampler(&self) -> sg::Sampler {
        self.sampler
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

fn make_rgba_image(width: i32, height: i32, pixels: &[u8]) -> sg::Image {
    let mut data = sg::ImageData::new();
    data.subimage[0][0] = sg::Range {
        ptr: pixels.as_ptr() as *const _,
        size: pixels.len(),
    };

    sg::make_image(&sg::ImageDesc {
        width,
        height,
        pixel_format: sg::PixelFormat::Rgba8,
        data,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gravity_assist_{}_{}", std::process::id(), name))
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = Path::new("definitely/not/here.png");
        match load_scaled(path, 10, 10) {
            Err(AssetError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn loaded_image_is_scaled_to_request() {
        let path = scratch_path("scale_test.png");
        RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let scaled = load_scaled(&path, 20, 20).unwrap();
        assert_eq!(scaled.dimensions(), (20, 20));
        let px = scaled.get_pixel(5, 5).0;
        for (got, want) in px.iter().zip([10u8, 20, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", px);
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let path = scratch_path("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            load_scaled(&path, 8, 8),
            Err(AssetError::Decode { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn scratch_paths_are_per_process_and_per_test() {
        let a = scratch_path("a.png");
        assert_ne!(a, scratch_path("b.png"));
        assert!(a
            .to_string_lossy()
            .contains(&std::process::id().to_string()));
    }
}
