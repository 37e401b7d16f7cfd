//! # pyre — procedural fire as GPU-instanced particles
//!
//! A campfire-style effect built from a fixed field of recycled
//! particles. Each particle is one instance of a shared icosphere whose
//! shader fades and dissolves with height and a noise pattern; a point
//! light flickers along with the flames.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pyre::prelude::*;
//!
//! fn main() -> Result<(), pyre::EffectError> {
//!     FireConfig::new()
//!         .with_density(100)
//!         .with_fire_image("textures/fire.png")
//!         .with_dissolve_image("textures/dissolve.png")
//!         .build()?
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle lifecycle
//!
//! The field allocates `density` instances once and never grows or
//! shrinks. Every frame each particle sways, rises, and scales up as it
//! climbs; a particle that crosses the `height` ceiling is recycled in
//! place: dropped to the base with a fresh random [`KineticDescriptor`].
//!
//! ### Shading
//!
//! The renderer draws all instances in one call. The shader offsets a
//! noise ("dissolve") sample by each instance's position, displaces the
//! silhouette with it, and walks a fire color ramp by a height-based
//! smoothstep fade. Blending is additive; the fire only ever adds
//! light. The formulas live in [`shading`] as testable Rust functions
//! and in `fire.wgsl` as the GPU program.
//!
//! ### Determinism
//!
//! All randomness flows through a seedable [`FireRng`]; the same seed
//! and options reproduce the exact same particle trajectories, which is
//! how the regression tests pin the simulation down.
//!
//! ## Hosting
//!
//! [`Fire::run`] opens a window and drives everything. Embedding in an
//! existing engine instead: call [`Fire::update`] once per frame, check
//! the field's dirty flag, and upload [`FireField::matrices`] to your
//! own instance buffer. [`Fire::node`] describes the effect as a plain
//! scene node (point light + instanced mesh) for hosts with a scene
//! graph.

pub mod descriptor;
pub mod error;
pub mod field;
pub mod fire;
pub mod geometry;
mod gpu;
pub mod light;
pub mod rng;
pub mod scene;
pub mod shading;
pub mod textures;
pub mod time;

pub use descriptor::KineticDescriptor;
pub use error::{ConfigError, EffectError, GpuError, TextureError};
pub use field::{FireField, InstanceState};
pub use fire::{Fire, FireConfig};
pub use geometry::{FireMesh, MeshVertex};
pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use light::LightFlicker;
pub use rng::FireRng;
pub use scene::{NodeKind, PointLight, SceneNode, Transform};
pub use textures::{AddressMode, FilterMode, FireTextures, TextureConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pyre::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ConfigError, EffectError};
    pub use crate::field::{FireField, InstanceState};
    pub use crate::fire::{Fire, FireConfig};
    pub use crate::light::LightFlicker;
    pub use crate::rng::FireRng;
    pub use crate::scene::{NodeKind, PointLight, SceneNode};
    pub use crate::textures::{FireTextures, TextureConfig};
    pub use crate::time::Time;
    pub use crate::{Mat4, Quat, Vec2, Vec3};
}
