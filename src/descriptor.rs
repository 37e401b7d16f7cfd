//! Per-instance kinetic descriptors.
//!
//! A descriptor holds everything that makes one flame particle move
//! differently from its neighbours: horizontal drift amplitudes, rise
//! rate, an incremental spin quaternion, and a base scale. A fresh
//! descriptor is drawn at spawn and again every time a particle is
//! recycled past the height ceiling.

use glam::{EulerRot, Quat};

use crate::rng::FireRng;

/// Kinetic parameters for a single particle, fixed until it is recycled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticDescriptor {
    /// Horizontal sway amplitude on X, in `[-0.5, 0.5)`.
    pub dir_x: f32,
    /// Vertical rise per step, in `[0.01, 0.04)`.
    pub dir_y: f32,
    /// Horizontal sway amplitude on Z, in `[-0.5, 0.5)`.
    pub dir_z: f32,
    /// Small incremental rotation right-multiplied onto the instance
    /// rotation every step, producing a slow continuous tumble.
    pub spin: Quat,
    /// Scale offset added to the height-driven growth term.
    pub base_scale: f32,
}

impl KineticDescriptor {
    /// Draw a fresh descriptor.
    ///
    /// `current_y` biases `base_scale`: particles respawned at the base
    /// of the fire (`current_y = 0`) start small, particles seeded
    /// mid-column at construction start proportionally larger.
    pub fn random(rng: &mut FireRng, current_y: f32) -> Self {
        let spin = Quat::from_euler(
            EulerRot::XYZ,
            rng.range(-0.0005, 0.0005),
            rng.range(-0.0015, 0.0015),
            rng.range(-0.0005, 0.0005),
        );
        Self {
            dir_x: rng.range(-0.5, 0.5),
            dir_y: rng.range(0.01, 0.04),
            dir_z: rng.range(-0.5, 0.5),
            spin,
            base_scale: 0.2 + current_y * rng.next_f32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_ranges() {
        let mut rng = FireRng::new(42);
        for _ in 0..1000 {
            let d = KineticDescriptor::random(&mut rng, 2.5);
            assert!((-0.5..0.5).contains(&d.dir_x));
            assert!((0.01..0.04).contains(&d.dir_y));
            assert!((-0.5..0.5).contains(&d.dir_z));
            assert!((0.2..0.2 + 2.5).contains(&d.base_scale));
        }
    }

    #[test]
    fn spin_is_near_identity_unit_quaternion() {
        let mut rng = FireRng::new(7);
        for _ in 0..100 {
            let d = KineticDescriptor::random(&mut rng, 0.0);
            assert!((d.spin.length() - 1.0).abs() < 1e-5);
            // Half-angle of 0.0015 rad keeps w extremely close to 1.
            assert!(d.spin.w > 0.999_99);
        }
    }

    #[test]
    fn base_scale_at_floor_when_spawned_low() {
        let mut rng = FireRng::new(3);
        for _ in 0..100 {
            let d = KineticDescriptor::random(&mut rng, 0.0);
            assert_eq!(d.base_scale, 0.2);
        }
    }
}
