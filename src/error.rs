//! Error types for the fire effect.
//!
//! Construction validates its configuration, texture decoding can fail
//! (non-fatally), and the windowed presentation path can fail to set up
//! a surface or device.

use std::fmt;

/// Invalid construction configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `density` must be at least 1.
    ZeroDensity,
    /// `height` must be positive; carries the rejected value.
    NonPositiveHeight(f32),
    /// `radius` must be nonnegative; carries the rejected value.
    NegativeRadius(f32),
    /// `resolution` above this level allocates unreasonable geometry.
    ResolutionTooHigh(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDensity => write!(f, "density must be at least 1"),
            ConfigError::NonPositiveHeight(h) => {
                write!(f, "height must be positive, got {}", h)
            }
            ConfigError::NegativeRadius(r) => {
                write!(f, "radius must be nonnegative, got {}", r)
            }
            ConfigError::ResolutionTooHigh(r) => {
                write!(f, "resolution {} exceeds the maximum of 5", r)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during texture loading.
#[derive(Debug)]
pub enum TextureError {
    /// Failed to decode the image file.
    ImageLoad(image::ImageError),
    /// Failed to read the file from disk.
    Io(std::io::Error),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageLoad(e) => write!(f, "failed to decode image: {}", e),
            TextureError::Io(e) => write!(f, "failed to read texture file: {}", e),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageLoad(e) => Some(e),
            TextureError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageLoad(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "no compatible GPU adapter found; a Vulkan/Metal/DX12 capable GPU is required"
            ),
            GpuError::DeviceCreation(e) => write!(f, "failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the windowed effect.
#[derive(Debug)]
pub enum EffectError {
    /// Invalid construction configuration.
    Config(ConfigError),
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::Config(e) => write!(f, "invalid configuration: {}", e),
            EffectError::EventLoop(e) => write!(f, "failed to create event loop: {}", e),
            EffectError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for EffectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffectError::Config(e) => Some(e),
            EffectError::EventLoop(e) => Some(e),
            EffectError::Gpu(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EffectError {
    fn from(e: ConfigError) -> Self {
        EffectError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for EffectError {
    fn from(e: winit::error::EventLoopError) -> Self {
        EffectError::EventLoop(e)
    }
}

impl From<GpuError> for EffectError {
    fn from(e: GpuError) -> Self {
        EffectError::Gpu(e)
    }
}
