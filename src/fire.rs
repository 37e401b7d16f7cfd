//! The fire effect: configuration builder, per-frame update, the
//! exposed scene node, and a self-contained windowed runner.
//!
//! # Quick Start
//!
//! ```ignore
//! use pyre::FireConfig;
//!
//! FireConfig::new()
//!     .with_density(100)
//!     .with_fire_image("textures/fire.png")
//!     .with_dissolve_image("textures/dissolve.png")
//!     .build()?
//!     .run()?;
//! ```
//!
//! Hosts with their own render loop skip `run()`: construct the effect,
//! call [`Fire::update`] once per frame, and consume the instance
//! matrices after the dirty hand-off.

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::{ConfigError, EffectError};
use crate::field::FireField;
use crate::geometry::FireMesh;
use crate::gpu::GpuState;
use crate::light::LightFlicker;
use crate::rng::FireRng;
use crate::scene::{NodeKind, PointLight, SceneNode};
use crate::textures::FireTextures;
use crate::time::Time;

/// Vertical offset of the instanced mesh below the effect origin.
const MESH_OFFSET_Y: f32 = -0.75;
/// Height of the point light above the effect origin.
const LIGHT_OFFSET_Y: f32 = 0.4;

/// Construction options for a [`Fire`] effect.
///
/// All options have usable defaults; unset texture paths fall back to
/// procedural stand-ins.
#[derive(Debug, Clone)]
pub struct FireConfig {
    density: u32,
    height: f32,
    radius: f32,
    resolution: u32,
    dissolve_image: Option<PathBuf>,
    fire_image: Option<PathBuf>,
    seed: u32,
    blend: f32,
    light_intensity: f32,
}

impl FireConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            density: 30,
            height: 5.0,
            radius: 1.0,
            resolution: 2,
            dissolve_image: None,
            fire_image: None,
            seed: 0x00F12E,
            blend: 1.0,
            light_intensity: 1.0,
        }
    }

    /// Set the instance count.
    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density;
        self
    }

    /// Set the recycle height (also the shading normalization height).
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the spawn disk half-extent.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the icosphere subdivision level of the instance geometry.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Path to the noise/dissolve mask texture.
    pub fn with_dissolve_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.dissolve_image = Some(path.into());
        self
    }

    /// Path to the fire color-ramp texture.
    pub fn with_fire_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.fire_image = Some(path.into());
        self
    }

    /// Seed the random source. Two effects built with the same seed and
    /// options produce identical particle trajectories.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the global fade control uniform.
    pub fn with_blend(mut self, blend: f32) -> Self {
        self.blend = blend;
        self
    }

    /// Set the point light's baseline intensity.
    pub fn with_light_intensity(mut self, intensity: f32) -> Self {
        self.light_intensity = intensity;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.density == 0 {
            return Err(ConfigError::ZeroDensity);
        }
        if !(self.height > 0.0) {
            return Err(ConfigError::NonPositiveHeight(self.height));
        }
        if !(self.radius >= 0.0) {
            return Err(ConfigError::NegativeRadius(self.radius));
        }
        if self.resolution > 5 {
            return Err(ConfigError::ResolutionTooHigh(self.resolution));
        }
        Ok(())
    }

    /// Validate the options and construct the effect.
    pub fn build(self) -> Result<Fire, ConfigError> {
        self.validate()?;

        let mut rng = FireRng::new(self.seed);
        let field = FireField::new(self.density, self.radius, self.height, &mut rng);
        let light = LightFlicker::new(&mut rng).with_intensity(self.light_intensity);
        let mesh = FireMesh::icosphere(self.resolution);
        let textures = FireTextures::load(
            self.fire_image.as_deref(),
            self.dissolve_image.as_deref(),
        );

        Ok(Fire {
            rng,
            field,
            light,
            mesh,
            textures,
            blend: self.blend,
        })
    }
}

impl Default for FireConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A running fire effect: the particle field, the flickering light, the
/// instance geometry and the loaded textures.
pub struct Fire {
    rng: FireRng,
    field: FireField,
    light: LightFlicker,
    mesh: FireMesh,
    textures: FireTextures,
    blend: f32,
}

impl Fire {
    /// Advance the simulation by one frame. Call once per rendered
    /// frame; takes no arguments and returns nothing.
    pub fn update(&mut self) {
        self.field.step(&mut self.rng);
        self.light.step(&mut self.rng);
    }

    /// The particle field.
    pub fn field(&self) -> &FireField {
        &self.field
    }

    /// Mutable field access, for hosts that reposition instances or
    /// consume the dirty flag themselves.
    pub fn field_mut(&mut self) -> &mut FireField {
        &mut self.field
    }

    /// The flickering light state.
    pub fn light(&self) -> &LightFlicker {
        &self.light
    }

    /// The shared instance geometry.
    pub fn mesh(&self) -> &FireMesh {
        &self.mesh
    }

    /// The loaded (or fallback) textures.
    pub fn textures(&self) -> &FireTextures {
        &self.textures
    }

    /// Global fade control.
    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn set_blend(&mut self, blend: f32) {
        self.blend = blend;
    }

    /// The effect as a plain scene node: a group holding the point
    /// light (raised above the base) and the instanced-geometry draw
    /// object (sunk slightly below it). The light's intensity reflects
    /// the current flicker state.
    pub fn node(&self) -> SceneNode {
        SceneNode::group()
            .with_child(
                SceneNode::new(NodeKind::Light(PointLight::fire(self.light.intensity())))
                    .at(Vec3::new(0.0, LIGHT_OFFSET_Y, 0.0)),
            )
            .with_child(
                SceneNode::new(NodeKind::InstancedMesh {
                    instances: self.field.density(),
                })
                .at(Vec3::new(0.0, MESH_OFFSET_Y, 0.0)),
            )
    }

    /// Open a window and run the effect until the window closes,
    /// stepping the simulation once per redraw. This blocks.
    pub fn run(self) -> Result<(), EffectError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        if let Some(e) = app.setup_error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

/// winit application driving the windowed effect.
struct App {
    fire: Fire,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    time: Time,
    setup_error: Option<crate::error::GpuError>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    fn new(fire: Fire) -> Self {
        Self {
            fire,
            window: None,
            gpu_state: None,
            time: Time::new(),
            setup_error: None,
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("pyre")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(
            window,
            self.fire.mesh(),
            self.fire.field().density(),
            self.fire.textures(),
            self.fire.field().height(),
        )) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(e) => {
                self.setup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;

                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.yaw -= dx as f32 * 0.005;
                            gpu_state.camera.pitch += dy as f32 * 0.005;
                            gpu_state.camera.pitch = gpu_state.camera.pitch.clamp(-1.5, 1.5);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.distance -= scroll * 0.3;
                    gpu_state.camera.distance = gpu_state.camera.distance.clamp(0.5, 40.0);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    let (elapsed, _delta) = self.time.update();

                    // One simulation step per rendered frame.
                    self.fire.update();
                    if self.fire.field_mut().take_dirty() {
                        gpu_state.upload_instances(&self.fire.field().matrices());
                    }
                    gpu_state.update_uniforms(
                        self.fire.field().height(),
                        self.fire.blend(),
                        elapsed,
                    );

                    match gpu_state.render() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu_state.resize(winit::dpi::PhysicalSize {
                                width: gpu_state.config.width,
                                height: gpu_state.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let fire = FireConfig::new().build().unwrap();
        assert_eq!(fire.field().density(), 30);
        assert_eq!(fire.field().height(), 5.0);
        assert_eq!(fire.field().radius(), 1.0);
        assert_eq!(fire.blend(), 1.0);
        // resolution 2 icosphere
        assert_eq!(fire.mesh().vertices.len(), 162);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert_eq!(
            FireConfig::new().with_density(0).build().err(),
            Some(ConfigError::ZeroDensity)
        );
        assert_eq!(
            FireConfig::new().with_height(0.0).build().err(),
            Some(ConfigError::NonPositiveHeight(0.0))
        );
        assert_eq!(
            FireConfig::new().with_radius(-1.0).build().err(),
            Some(ConfigError::NegativeRadius(-1.0))
        );
        assert_eq!(
            FireConfig::new().with_resolution(9).build().err(),
            Some(ConfigError::ResolutionTooHigh(9))
        );
    }

    #[test]
    fn node_exposes_light_and_instanced_mesh() {
        let fire = FireConfig::new().with_density(64).build().unwrap();
        let node = fire.node();
        assert_eq!(node.children.len(), 2);
        assert!(matches!(node.children[0].kind, NodeKind::Light(_)));
        assert_eq!(node.children[0].transform.position.y, LIGHT_OFFSET_Y);
        assert_eq!(
            node.children[1].kind,
            NodeKind::InstancedMesh { instances: 64 }
        );
        assert_eq!(node.children[1].transform.position.y, MESH_OFFSET_Y);
    }

    #[test]
    fn update_advances_field_and_light() {
        let mut fire = FireConfig::new().with_seed(5).build().unwrap();
        let before = fire.field().instances().to_vec();
        let light_before = fire.light().intensity();
        fire.update();
        assert_ne!(fire.field().instances(), &before[..]);
        assert_ne!(fire.light().intensity(), light_before);
    }
}
