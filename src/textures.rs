//! Texture loading and procedural fallbacks.
//!
//! The effect samples two 2D textures: a fire color ramp (`gradient`)
//! and a noise mask (`blend_pattern`) that drives the dissolve. Both are
//! addressed by file path and decoded with the `image` crate. A missing
//! or unreadable file is never fatal: the failure is logged and a
//! procedural stand-in is used so the simulation keeps running.
//!
//! # Supported formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::Path;

use crate::error::TextureError;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default). Good for gradients and noise.
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// Address mode for texture wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Clamp to edge color (default).
    #[default]
    ClampToEdge,
    /// Repeat/tile the texture. Coordinates wrap around.
    Repeat,
}

/// CPU-side image data plus sampling configuration.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
    pub address_mode: AddressMode,
}

impl TextureConfig {
    /// Create a texture from raw RGBA data.
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
            address_mode: AddressMode::ClampToEdge,
        }
    }

    /// Decode a texture from an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(img.into_raw(), width, height))
    }

    /// Set the address mode for UV coordinates outside 0-1.
    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }

    /// Set the filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// A 1x1 solid color texture.
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
            filter: FilterMode::Nearest,
            address_mode: AddressMode::ClampToEdge,
        }
    }

    /// Built-in fire color ramp: dark red through orange to near-white
    /// yellow. Used when no `fire_image` is configured or the configured
    /// file fails to load.
    pub fn fire_gradient(width: u32) -> Self {
        const STOPS: [[f32; 3]; 5] = [
            [0.1, 0.0, 0.0],
            [0.5, 0.0, 0.0],
            [1.0, 0.3, 0.0],
            [1.0, 0.7, 0.0],
            [1.0, 1.0, 0.8],
        ];
        let mut data = Vec::with_capacity((width * 4) as usize);
        for x in 0..width {
            let t = x as f32 / width.saturating_sub(1).max(1) as f32 * (STOPS.len() - 1) as f32;
            let i = (t as usize).min(STOPS.len() - 2);
            let f = t - i as f32;
            for c in 0..3 {
                let v = STOPS[i][c] + (STOPS[i + 1][c] - STOPS[i][c]) * f;
                data.push((v * 255.0).round() as u8);
            }
            data.push(255);
        }
        Self {
            data,
            width,
            height: 1,
            filter: FilterMode::Linear,
            address_mode: AddressMode::Repeat,
        }
    }

    /// Hash-based grayscale noise, the stand-in for a missing dissolve
    /// mask.
    pub fn noise(size: u32, seed: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = hash_noise(x, y, seed);
                data.push(v);
                data.push(v);
                data.push(v);
                data.push(255);
            }
        }
        Self {
            data,
            width: size,
            height: size,
            filter: FilterMode::Linear,
            address_mode: AddressMode::Repeat,
        }
    }
}

fn hash_noise(x: u32, y: u32, seed: u32) -> u8 {
    let mut n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1013904223));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n = n ^ (n >> 16);
    (n & 255) as u8
}

/// The two textures the fire shader samples.
#[derive(Debug, Clone)]
pub struct FireTextures {
    /// Color ramp walked by the fragment fade. Repeat-wrapped.
    pub gradient: TextureConfig,
    /// Noise/dissolve mask. Repeat-wrapped on both axes.
    pub blend_pattern: TextureConfig,
}

impl FireTextures {
    /// Load the configured images, substituting procedural fallbacks on
    /// failure. Load failures only log; they never abort the effect.
    pub fn load(fire_image: Option<&Path>, dissolve_image: Option<&Path>) -> Self {
        let gradient = match fire_image {
            Some(path) => match TextureConfig::load(path) {
                Ok(tex) => tex,
                Err(e) => {
                    eprintln!(
                        "Failed to load fire gradient '{}': {}; using built-in ramp",
                        path.display(),
                        e
                    );
                    TextureConfig::fire_gradient(256)
                }
            },
            None => TextureConfig::fire_gradient(256),
        }
        .with_address_mode(AddressMode::Repeat);

        let blend_pattern = match dissolve_image {
            Some(path) => match TextureConfig::load(path) {
                Ok(tex) => tex,
                Err(e) => {
                    eprintln!(
                        "Failed to load dissolve mask '{}': {}; using procedural noise",
                        path.display(),
                        e
                    );
                    TextureConfig::noise(256, 0x9E3779B9)
                }
            },
            None => TextureConfig::noise(256, 0x9E3779B9),
        }
        .with_address_mode(AddressMode::Repeat);

        Self {
            gradient,
            blend_pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_is_one_pixel() {
        let tex = TextureConfig::solid(255, 85, 0, 255);
        assert_eq!(tex.data, vec![255, 85, 0, 255]);
        assert_eq!((tex.width, tex.height), (1, 1));
    }

    #[test]
    fn fire_gradient_ramps_upward_in_red() {
        let tex = TextureConfig::fire_gradient(256);
        assert_eq!(tex.data.len(), 256 * 4);
        // Dark at the start, bright at the end.
        assert!(tex.data[0] < 64);
        assert!(tex.data[255 * 4] > 200);
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let a = TextureConfig::noise(32, 7);
        let b = TextureConfig::noise(32, 7);
        let c = TextureConfig::noise(32, 8);
        assert_eq!(a.data, b.data);
        assert_ne!(a.data, c.data);
    }

    #[test]
    fn missing_files_fall_back_without_error() {
        let textures = FireTextures::load(
            Some(Path::new("/nonexistent/fire.png")),
            Some(Path::new("/nonexistent/dissolve.png")),
        );
        // Fallbacks are the procedural ramp and noise, repeat-wrapped.
        assert_eq!(textures.gradient.height, 1);
        assert_eq!(textures.gradient.address_mode, AddressMode::Repeat);
        assert_eq!(textures.blend_pattern.width, 256);
        assert_eq!(textures.blend_pattern.address_mode, AddressMode::Repeat);
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn from_rgba_checks_size() {
        TextureConfig::from_rgba(vec![0; 3], 1, 1);
    }
}
