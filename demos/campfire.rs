//! Windowed campfire demo.
//!
//! Drag to orbit, scroll to zoom. Texture paths are optional; without
//! them the built-in gradient and noise stand-ins are used.
//!
//! Run with: `cargo run --example campfire`

use pyre::FireConfig;

fn main() -> Result<(), pyre::EffectError> {
    FireConfig::new()
        .with_density(100)
        .with_height(5.0)
        .with_radius(1.0)
        .with_resolution(2)
        .with_fire_image("assets/fire.png")
        .with_dissolve_image("assets/dissolve.png")
        .with_seed(7)
        .build()?
        .run()
}
