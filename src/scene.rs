//! Minimal scene-node representation for the exposed effect artifact.
//!
//! The effect is a plain composed node (transform plus children) rather
//! than a subclass of any engine's scene-graph type: a host that knows
//! how to draw point lights and instanced meshes can walk the tree and
//! mount it anywhere in its own hierarchy.

use glam::{Mat4, Quat, Vec3};

/// Decomposed local transform of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Compose the local matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A point light, warm orange by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear RGB in 0..1.
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

impl PointLight {
    /// The fire's light: 0xFF5500 with a 100-unit range.
    pub fn fire(intensity: f32) -> Self {
        Self {
            color: [1.0, 1.0 / 3.0, 0.0],
            intensity,
            range: 100.0,
        }
    }
}

/// What a node contributes to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure grouping transform.
    Group,
    /// A point light.
    Light(PointLight),
    /// An instanced-geometry draw object with this many instances.
    InstancedMesh { instances: u32 },
}

/// One node in the composed effect tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub transform: Transform,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group() -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    pub fn new(kind: NodeKind) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind,
            children: Vec::new(),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_matrix_roundtrip() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(0.5),
            scale: Vec3::splat(2.0),
        };
        let (scale, rotation, translation) = t.matrix().to_scale_rotation_translation();
        assert!((scale - t.scale).length() < 1e-5);
        assert!((translation - t.position).length() < 1e-5);
        assert!(rotation.dot(t.rotation).abs() > 0.999_99);
    }

    #[test]
    fn fire_light_color_is_ff5500() {
        let light = PointLight::fire(1.0);
        assert_eq!(
            [
                (light.color[0] * 255.0).round() as u8,
                (light.color[1] * 255.0).round() as u8,
                (light.color[2] * 255.0).round() as u8,
            ],
            [0xFF, 0x55, 0x00]
        );
    }

    #[test]
    fn tree_composition() {
        let node = SceneNode::group()
            .with_child(SceneNode::new(NodeKind::Light(PointLight::fire(1.0))).at(Vec3::Y * 0.4))
            .with_child(SceneNode::new(NodeKind::InstancedMesh { instances: 30 }));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].transform.position.y, 0.4);
    }
}
