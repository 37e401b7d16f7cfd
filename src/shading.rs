//! The shading model: uniform layout, embedded WGSL, and the reference
//! math the shader implements.
//!
//! The WGSL program in `fire.wgsl` is the substrate; the functions here
//! are the authoritative formulas it must match, kept in Rust so the
//! numeric contract is unit-testable without a GPU.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// The fire shader program, embedded at compile time.
pub const SHADER_SOURCE: &str = include_str!("fire.wgsl");

/// Half-width of the fade transition band in the fragment stage.
pub const SPREAD: f32 = 0.2;

/// How far the dissolve sample pushes a vertex outward.
pub const DISSOLVE_DISPLACEMENT: f32 = 0.1;

/// Per-frame uniforms, shared by the vertex and fragment stages.
/// Matches the `Uniforms` struct in `fire.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct FireUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Recycle ceiling; normalizes the pattern UV.
    pub height: f32,
    /// Global intensity-of-fade control.
    pub blend: f32,
    pub time: f32,
    pub _padding: f32,
}

/// Cubic Hermite interpolation producing a smooth 0..1 transition
/// between `edge0` and `edge1`. Matches WGSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Pattern UV for a vertex: the mesh UV shifted by the instance's XY
/// translation, recentered, stretched by 1.4 and normalized by the
/// field height. Shifting by the instance position is what gives each
/// particle its own patch of the dissolve mask.
pub fn pattern_uv(uv: Vec2, instance_translation_xy: Vec2, height: f32) -> Vec2 {
    ((uv + instance_translation_xy - Vec2::ONE) * 1.4) / height
}

/// Height-normalized fade factor for a vertex at local-space `y`.
/// The mesh spans roughly `y in [-3, 3]` in the source formulation.
pub fn vertex_fade(local_y: f32) -> f32 {
    ((local_y + 3.0) / 6.0).clamp(0.0, 1.0)
}

/// Fragment fade: a smoothstep band of width `2 * SPREAD` centered on
/// the vertex fade, driven by the global blend plus amplified dissolve
/// noise.
pub fn fade_amount(v_fade: f32, blend: f32, dissolve: f32) -> f32 {
    smoothstep(
        (v_fade - SPREAD).max(0.0),
        (v_fade + SPREAD).min(1.0),
        blend + dissolve * 1.2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn fire_shader_is_valid_wgsl() {
        validate_wgsl(SHADER_SOURCE).unwrap();
    }

    #[test]
    fn fade_amount_matches_closed_form() {
        // v_fade = 0.5, blend = 0.3, dissolve = 0.1:
        // edges are (0.3, 0.7), x = 0.3 + 0.12 = 0.42,
        // t = (0.42 - 0.3) / 0.4 = 0.3, result = 0.09 * (3 - 0.6) = 0.216.
        let fade = fade_amount(0.5, 0.3, 0.1);
        assert!((fade - 0.216).abs() < 1e-6, "fade = {}", fade);
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fade_band_edges_clamp_to_unit_interval() {
        // At the bottom of the mesh the lower edge clamps to 0.
        assert_eq!(fade_amount(0.0, 0.0, 0.0), 0.0);
        // A large blend saturates the fade.
        assert_eq!(fade_amount(0.5, 2.0, 0.0), 1.0);
    }

    #[test]
    fn vertex_fade_clamps_mesh_extremes() {
        assert_eq!(vertex_fade(-3.0), 0.0);
        assert_eq!(vertex_fade(3.0), 1.0);
        assert_eq!(vertex_fade(0.0), 0.5);
        assert_eq!(vertex_fade(-10.0), 0.0);
    }

    #[test]
    fn pattern_uv_shifts_with_instance_position() {
        let a = pattern_uv(Vec2::new(0.5, 0.5), Vec2::new(0.0, 0.0), 5.0);
        let b = pattern_uv(Vec2::new(0.5, 0.5), Vec2::new(0.3, 0.0), 5.0);
        assert!(a.x != b.x);
        assert_eq!(a.y, b.y);
        // Closed form for the unshifted case: (0.5 - 1) * 1.4 / 5.
        assert!((a.x - (-0.14)).abs() < 1e-6);
    }

    #[test]
    fn uniforms_are_sixteen_byte_aligned() {
        assert_eq!(std::mem::size_of::<FireUniforms>() % 16, 0);
    }
}
