//! Instance geometry: a UV-mapped icosphere.
//!
//! Every particle draws the same unit icosphere; the `resolution`
//! construction option controls how many times the base icosahedron is
//! subdivided before the vertices are pushed onto the sphere.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex layout for the instance mesh. Matches `VertexInput` in
/// `fire.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh shared by all instances.
pub struct FireMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl FireMesh {
    /// Build a unit icosphere with `resolution` subdivision passes.
    ///
    /// Resolution 0 is the bare icosahedron (12 vertices, 20 faces);
    /// each pass quadruples the face count.
    pub fn icosphere(resolution: u32) -> Self {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let mut positions: Vec<Vec3> = [
            Vec3::new(-1.0, phi, 0.0),
            Vec3::new(1.0, phi, 0.0),
            Vec3::new(-1.0, -phi, 0.0),
            Vec3::new(1.0, -phi, 0.0),
            Vec3::new(0.0, -1.0, phi),
            Vec3::new(0.0, 1.0, phi),
            Vec3::new(0.0, -1.0, -phi),
            Vec3::new(0.0, 1.0, -phi),
            Vec3::new(phi, 0.0, -1.0),
            Vec3::new(phi, 0.0, 1.0),
            Vec3::new(-phi, 0.0, -1.0),
            Vec3::new(-phi, 0.0, 1.0),
        ]
        .iter()
        .map(|v| v.normalize())
        .collect();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..resolution {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut next_faces = Vec::with_capacity(faces.len() * 4);

            let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
                    positions.push(mid);
                    positions.len() as u32 - 1
                })
            };

            for [a, b, c] in faces {
                let ab = midpoint(a, b, &mut positions);
                let bc = midpoint(b, c, &mut positions);
                let ca = midpoint(c, a, &mut positions);
                next_faces.push([a, ab, ca]);
                next_faces.push([b, bc, ab]);
                next_faces.push([c, ca, bc]);
                next_faces.push([ab, bc, ca]);
            }
            faces = next_faces;
        }

        let vertices = positions
            .iter()
            .map(|p| MeshVertex {
                position: p.to_array(),
                uv: spherical_uv(*p),
            })
            .collect();
        let indices = faces.iter().flatten().copied().collect();

        Self { vertices, indices }
    }
}

/// Equirectangular UV for a point on the unit sphere.
fn spherical_uv(p: Vec3) -> [f32; 2] {
    let u = 0.5 + p.z.atan2(p.x) / std::f32::consts::TAU;
    let v = 0.5 - p.y.clamp(-1.0, 1.0).asin() / std::f32::consts::PI;
    [u, v]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron_counts() {
        let mesh = FireMesh::icosphere(0);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.indices.len(), 20 * 3);
    }

    #[test]
    fn subdivision_counts() {
        // 10 * 4^n + 2 vertices, 20 * 4^n faces.
        for n in 0..4u32 {
            let mesh = FireMesh::icosphere(n);
            let factor = 4u32.pow(n) as usize;
            assert_eq!(mesh.vertices.len(), 10 * factor + 2);
            assert_eq!(mesh.indices.len(), 20 * factor * 3);
        }
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        let mesh = FireMesh::icosphere(2);
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn uvs_inside_unit_square() {
        let mesh = FireMesh::icosphere(3);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn indices_reference_valid_vertices() {
        let mesh = FireMesh::icosphere(2);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }
}
