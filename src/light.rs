//! Flickering point-light intensity coupled to the fire.
//!
//! Two continuous variables, no discrete states: the current intensity
//! eases toward a target, and the target is stochastically resampled so
//! the light never settles.

use crate::rng::FireRng;

/// Fraction of the remaining distance to the target covered per step.
const EASE: f32 = 0.02;
/// Per-step probability of picking a new target intensity.
const RESAMPLE_CHANCE: f32 = 0.2;
/// Targets are drawn from `[0, MAX_INTENSITY)`.
const MAX_INTENSITY: f32 = 5.0;

/// Eased random flicker for a single point light.
#[derive(Debug, Clone)]
pub struct LightFlicker {
    intensity: f32,
    target: f32,
}

impl LightFlicker {
    /// Create an unlit flicker (`intensity = 0`) with a random initial
    /// target in `[0, 5)`.
    pub fn new(rng: &mut FireRng) -> Self {
        Self {
            intensity: 0.0,
            target: rng.next_f32() * MAX_INTENSITY,
        }
    }

    /// Start from a caller-chosen baseline intensity instead of unlit.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Current eased intensity.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Intensity currently being eased toward.
    pub fn target_intensity(&self) -> f32 {
        self.target
    }

    /// Advance one frame: ease toward the target, then (independently,
    /// with probability 0.2) resample the target.
    pub fn step(&mut self, rng: &mut FireRng) {
        self.intensity += (self.target - self.intensity) * EASE;
        if rng.chance(RESAMPLE_CHANCE) {
            self.target = rng.next_f32() * MAX_INTENSITY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unlit_with_bounded_target() {
        let mut rng = FireRng::new(42);
        let light = LightFlicker::new(&mut rng);
        assert_eq!(light.intensity(), 0.0);
        assert!((0.0..5.0).contains(&light.target_intensity()));
    }

    #[test]
    fn intensity_stays_bounded_once_seeded_inside() {
        let mut rng = FireRng::new(123);
        let mut light = LightFlicker::new(&mut rng).with_intensity(1.0);
        for _ in 0..100_000 {
            light.step(&mut rng);
            assert!((0.0..5.0).contains(&light.intensity()));
            assert!((0.0..5.0).contains(&light.target_intensity()));
        }
    }

    #[test]
    fn eases_toward_a_fixed_target() {
        let mut rng = FireRng::new(1);
        let mut light = LightFlicker::new(&mut rng);
        let target = light.target_intensity();
        // First step before any resample can land: exactly 2% of the gap.
        let before = light.intensity();
        light.step(&mut rng);
        let expected = before + (target - before) * 0.02;
        // The resample draw may have replaced the target, but the eased
        // intensity for this step used the old one.
        assert!((light.intensity() - expected).abs() < 1e-6);
    }
}
