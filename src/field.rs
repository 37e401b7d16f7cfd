//! The particle field: instance state, the per-frame stepper, and the
//! dirty-buffer hand-off to the renderer.
//!
//! `FireField` owns a fixed-size array of instance transforms and their
//! kinetic descriptors. Particles are never created or destroyed after
//! construction; a particle that rises past the height ceiling is
//! recycled in place (dropped back to the base with a fresh descriptor).
//!
//! # Stepping
//!
//! ```ignore
//! let mut rng = FireRng::new(7);
//! let mut field = FireField::new(100, 1.0, 5.0, &mut rng);
//!
//! // Once per rendered frame:
//! field.step(&mut rng);
//! if field.take_dirty() {
//!     upload(&field.matrices());
//! }
//! ```

use glam::{Mat4, Quat, Vec3};

use crate::descriptor::KineticDescriptor;
use crate::rng::FireRng;

/// Scale assigned to a particle the moment it is recycled.
const RECYCLE_SCALE: f32 = 0.1;

/// One particle's transform, stored decomposed.
///
/// Keeping position/rotation/scale separate (instead of a composed
/// matrix that gets decomposed every step) avoids numeric drift; the
/// matrix is derived only at upload time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceState {
    pub position: Vec3,
    pub rotation: Quat,
    /// Uniform scale on all axes, never below 0.1.
    pub scale: f32,
}

impl InstanceState {
    /// Compose the instance matrix for upload.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.position,
        )
    }
}

/// A fixed-size field of recycled fire particles.
pub struct FireField {
    instances: Vec<InstanceState>,
    descriptors: Vec<KineticDescriptor>,
    radius: f32,
    height: f32,
    dirty: bool,
}

impl FireField {
    /// Allocate `density` instances, each spawned with a position uniform
    /// over `[-radius/2, radius/2] x [0, height] x [-radius/2, radius/2]`
    /// and a fresh descriptor biased by the sampled height.
    pub fn new(density: u32, radius: f32, height: f32, rng: &mut FireRng) -> Self {
        let mut instances = Vec::with_capacity(density as usize);
        let mut descriptors = Vec::with_capacity(density as usize);

        for _ in 0..density {
            let position = Vec3::new(
                rng.range(-0.5, 0.5) * radius,
                rng.next_f32() * height,
                rng.range(-0.5, 0.5) * radius,
            );
            let descriptor = KineticDescriptor::random(rng, position.y);
            instances.push(InstanceState {
                position,
                rotation: descriptor.spin,
                scale: descriptor.base_scale,
            });
            descriptors.push(descriptor);
        }

        Self {
            instances,
            descriptors,
            radius,
            height,
            dirty: true,
        }
    }

    /// Number of instances. Fixed for the lifetime of the field.
    pub fn density(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Spawn disk half-extent.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Recycle ceiling; also the shading normalization height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Read one instance transform.
    pub fn instance(&self, index: usize) -> InstanceState {
        self.instances[index]
    }

    /// Overwrite one instance transform. Marks the transform buffer dirty.
    pub fn set_instance(&mut self, index: usize, state: InstanceState) {
        self.instances[index] = state;
        self.dirty = true;
    }

    /// All instance transforms, in index order.
    pub fn instances(&self) -> &[InstanceState] {
        &self.instances
    }

    /// Kinetic descriptor of one instance.
    pub fn descriptor(&self, index: usize) -> &KineticDescriptor {
        &self.descriptors[index]
    }

    /// Advance every instance by one frame.
    ///
    /// Per instance, in order: sway, rise, scale, recycle-on-overflow,
    /// spin. Sway is recomputed from the current height rather than
    /// integrated, so horizontal motion stays bounded by the descriptor
    /// amplitudes. The recycle check runs before the spin so the field
    /// always exits a step with `position.y < height`.
    pub fn step(&mut self, rng: &mut FireRng) {
        for (inst, desc) in self.instances.iter_mut().zip(self.descriptors.iter_mut()) {
            let y = inst.position.y;
            inst.position.x = (y * 0.5).sin() * desc.dir_x;
            inst.position.z = (y * 0.25).cos() * desc.dir_z;
            inst.position.y += desc.dir_y + (y * 0.002).sin();

            inst.scale = desc.base_scale
                + (inst.position.y.max(1.0) / self.height).max(0.2).powi(2);

            if inst.position.y > self.height {
                inst.position.y = 0.0;
                inst.scale = RECYCLE_SCALE;
                *desc = KineticDescriptor::random(rng, 0.0);
            }

            inst.rotation = inst.rotation.normalize() * desc.spin;
        }
        // One hand-off per frame, never per instance.
        self.dirty = true;
    }

    /// True if the transform buffer changed since the last call.
    ///
    /// Clears the flag: the caller is expected to re-upload the instance
    /// matrices when this returns true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Compose the per-instance matrices for upload, in index order.
    pub fn matrices(&self) -> Vec<Mat4> {
        self.instances.iter().map(InstanceState::matrix).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_field(density: u32) -> (FireField, FireRng) {
        let mut rng = FireRng::new(42);
        let field = FireField::new(density, 1.0, 5.0, &mut rng);
        (field, rng)
    }

    #[test]
    fn spawn_positions_inside_bounds() {
        let (field, _) = test_field(200);
        for inst in field.instances() {
            assert!((-0.5..=0.5).contains(&inst.position.x));
            assert!((0.0..=5.0).contains(&inst.position.y));
            assert!((-0.5..=0.5).contains(&inst.position.z));
        }
    }

    #[test]
    fn height_invariant_holds_over_many_steps() {
        let (mut field, mut rng) = test_field(100);
        for _ in 0..2000 {
            field.step(&mut rng);
            for inst in field.instances() {
                assert!(inst.position.y >= 0.0);
                assert!(inst.position.y < field.height());
            }
        }
    }

    #[test]
    fn scale_never_below_recycle_floor() {
        let (mut field, mut rng) = test_field(100);
        for inst in field.instances() {
            assert!(inst.scale >= 0.1);
        }
        for _ in 0..2000 {
            field.step(&mut rng);
            for inst in field.instances() {
                assert!(inst.scale >= 0.1);
            }
        }
    }

    #[test]
    fn recycle_resets_position_scale_and_descriptor() {
        let (mut field, mut rng) = test_field(1);
        let mut inst = field.instance(0);
        inst.position.y = field.height() + 0.001;
        field.set_instance(0, inst);

        field.step(&mut rng);

        let inst = field.instance(0);
        assert_eq!(inst.position.y, 0.0);
        assert_eq!(inst.scale, 0.1);
        // Descriptor regenerated with current_y = 0.
        assert_eq!(field.descriptor(0).base_scale, 0.2);
    }

    #[test]
    fn rotation_stays_normalized() {
        let (mut field, mut rng) = test_field(10);
        for _ in 0..500 {
            field.step(&mut rng);
        }
        for inst in field.instances() {
            assert!((inst.rotation.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn dirty_flag_set_once_per_step_and_cleared_on_take() {
        let (mut field, mut rng) = test_field(10);
        assert!(field.take_dirty()); // construction marks the buffer dirty
        assert!(!field.take_dirty());
        field.step(&mut rng);
        assert!(field.take_dirty());
        assert!(!field.take_dirty());
    }

    #[test]
    fn matrix_composition_matches_components() {
        let (field, _) = test_field(5);
        let inst = field.instance(3);
        let m = field.matrices()[3];
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        assert!((scale.x - inst.scale).abs() < 1e-5);
        assert!((translation - inst.position).length() < 1e-5);
        assert!(rotation.dot(inst.rotation).abs() > 0.999_99);
    }
}
