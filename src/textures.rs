//! Sprite texture data.
//!
//! All particles share one circular sprite. It is rasterized offscreen into
//! raw RGBA rather than shipped as an asset; [`TextureConfig::from_file`]
//! exists for anyone who wants a custom sprite image instead.

use std::path::Path;

use crate::error::TextureError;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// CPU-side texture: raw pixels plus sampling configuration, ready for
/// upload by the renderer.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
}

impl TextureConfig {
    /// Create a texture from raw RGBA data (4 bytes per pixel).
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Load a texture from a PNG or JPEG file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(img.into_raw(), width, height))
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Rasterize a white circle with a one-pixel antialiased rim into a
    /// square `size` x `size` texture. The circle is centered, so a sprite
    /// with a centered pivot renders it around the particle position.
    pub fn circle(size: u32) -> Self {
        assert!(size >= 2, "circle texture needs at least 2x2 pixels");
        let mut data = vec![0u8; (size * size * 4) as usize];
        let center = size as f32 / 2.0;
        let radius = center - 1.0;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - center;
                let dy = y as f32 + 0.5 - center;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                let i = ((y * size + x) * 4) as usize;
                data[i] = 255;
                data[i + 1] = 255;
                data[i + 2] = 255;
                data[i + 3] = (coverage * 255.0) as u8;
            }
        }

        Self::from_rgba(data, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(tex: &TextureConfig, x: u32, y: u32) -> u8 {
        tex.data[((y * tex.width + x) * 4 + 3) as usize]
    }

    #[test]
    fn test_circle_is_opaque_center_transparent_corners() {
        let tex = TextureConfig::circle(8);
        assert_eq!(tex.width, 8);
        assert_eq!(tex.height, 8);
        assert_eq!(alpha_at(&tex, 4, 4), 255);
        assert_eq!(alpha_at(&tex, 0, 0), 0);
        assert_eq!(alpha_at(&tex, 7, 7), 0);
    }

    #[test]
    fn test_circle_is_symmetric() {
        let tex = TextureConfig::circle(16);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(alpha_at(&tex, x, y), alpha_at(&tex, 15 - x, y));
                assert_eq!(alpha_at(&tex, x, y), alpha_at(&tex, x, 15 - y));
            }
        }
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_checks_size() {
        TextureConfig::from_rgba(vec![0u8; 5], 2, 2);
    }

    #[test]
    fn test_from_file_round_trips_png() {
        let tex = TextureConfig::circle(8);
        let path = std::env::temp_dir().join("puddle_sprite_roundtrip.png");
        image::RgbaImage::from_raw(tex.width, tex.height, tex.data.clone())
            .unwrap()
            .save(&path)
            .unwrap();

        let loaded = TextureConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.width, tex.width);
        assert_eq!(loaded.height, tex.height);
        // PNG is lossless, so the pixels survive unchanged.
        assert_eq!(loaded.data, tex.data);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = TextureConfig::from_file("no_such_sprite.png").unwrap_err();
        assert!(matches!(err, crate::error::TextureError::Io(_)));
    }

    #[test]
    fn test_with_filter_overrides_the_default() {
        let tex = TextureConfig::circle(4);
        assert_eq!(tex.filter, FilterMode::Linear);
        let tex = tex.with_filter(FilterMode::Nearest);
        assert_eq!(tex.filter, FilterMode::Nearest);
    }
}
