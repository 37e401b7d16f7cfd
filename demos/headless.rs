//! Headless stepping demo: no window, no GPU.
//!
//! Shows the embedding surface a host engine would use — build the
//! effect, call `update()` once per frame, read back matrices and light
//! intensity after the dirty hand-off.
//!
//! Run with: `cargo run --example headless`

use pyre::FireConfig;

fn main() -> Result<(), pyre::ConfigError> {
    let mut fire = FireConfig::new().with_density(8).with_seed(42).build()?;

    for frame in 0..10 {
        fire.update();

        if fire.field_mut().take_dirty() {
            let matrices = fire.field().matrices();
            let lead = fire.field().instance(0);
            println!(
                "frame {:2}: {} instances dirty, instance 0 at y={:.3} scale={:.3}, light={:.3}",
                frame,
                matrices.len(),
                lead.position.y,
                lead.scale,
                fire.light().intensity(),
            );
        }
    }

    Ok(())
}
