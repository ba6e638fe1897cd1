// Per-frame extraction of GPU instance data from the ECS world.
//
// Meshes are drawn instanced: one instance buffer per MeshKind, filled with
// every part of every model that uses it. Point clouds draw once each with a
// single instance carrying the entity transform.

use bevy_ecs::prelude::*;
use glam::{Mat3, Mat4, Vec4};

use super::components::*;
use super::model::{MeshKind, Model};

// ============================================================================
// INSTANCE DATA (per part)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    /// Mesh parts: linear RGB + emissive strength. Point clouds: linear RGB + opacity.
    pub color: [f32; 4],
    /// Inverse-transpose of the model's linear part, columns padded to vec4.
    pub normal: [[f32; 4]; 3],
}

impl InstanceData {
    pub fn new(model: Mat4, color: Vec4) -> Self {
        let normal = normal_matrix(model);
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
            normal: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const VEC4: wgpu::BufferAddress = std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress;
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // Model matrix columns (locations 2-5)
                wgpu::VertexAttribute { offset: 0, shader_location: 2, format: wgpu::VertexFormat::Float32x4 },
                wgpu::VertexAttribute { offset: VEC4, shader_location: 3, format: wgpu::VertexFormat::Float32x4 },
                wgpu::VertexAttribute { offset: VEC4 * 2, shader_location: 4, format: wgpu::VertexFormat::Float32x4 },
                wgpu::VertexAttribute { offset: VEC4 * 3, shader_location: 5, format: wgpu::VertexFormat::Float32x4 },
                // Color (location 6)
                wgpu::VertexAttribute { offset: VEC4 * 4, shader_location: 6, format: wgpu::VertexFormat::Float32x4 },
                // Normal matrix columns (locations 7-9)
                wgpu::VertexAttribute { offset: VEC4 * 5, shader_location: 7, format: wgpu::VertexFormat::Float32x4 },
                wgpu::VertexAttribute { offset: VEC4 * 6, shader_location: 8, format: wgpu::VertexFormat::Float32x4 },
                wgpu::VertexAttribute { offset: VEC4 * 7, shader_location: 9, format: wgpu::VertexFormat::Float32x4 },
            ],
        }
    }
}

/// Matrix that keeps normals perpendicular under non-uniform scale.
/// Degenerate transforms keep their linear part.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(model);
    if linear.determinant().abs() > f32::EPSILON {
        linear.inverse().transpose()
    } else {
        linear
    }
}

pub struct DrawList {
    /// Indexed by `MeshKind::index()`.
    pub meshes: [Vec<InstanceData>; MeshKind::COUNT],
    pub clouds: Vec<(Entity, InstanceData)>,
}

impl DrawList {
    pub fn instances(&self, kind: MeshKind) -> &[InstanceData] {
        &self.meshes[kind.index()]
    }

    pub fn instance_count(&self) -> usize {
        self.meshes.iter().map(Vec::len).sum()
    }
}

/// Collect instance data for everything currently in the world.
pub fn collect(world: &mut World) -> DrawList {
    let mut list = DrawList {
        meshes: std::array::from_fn(|_| Vec::new()),
        clouds: Vec::new(),
    };

    let mut models = world.query::<(&Transform, &Model, Option<&Hover>, Option<&AsteroidField>)>();
    for (transform, model, hover, field) in models.iter(world) {
        let mut root = transform.matrix();
        if let Some(hover) = hover {
            root *= hover.offset;
        }

        // Asteroid fields repeat their model once per body.
        let placements: Vec<Mat4> = match field {
            Some(field) => field.bodies.iter().map(|b| root * b.matrix()).collect(),
            None => vec![root],
        };

        for placement in placements {
            for part in &model.parts {
                list.meshes[part.mesh.index()].push(InstanceData::new(
                    placement * part.local,
                    part.color.extend(part.emissive),
                ));
            }
        }
    }

    let mut clouds = world.query::<(Entity, &Transform, &PointCloud)>();
    for (entity, transform, cloud) in clouds.iter(world) {
        list.clouds.push((entity, InstanceData::new(transform.matrix(), cloud.color)));
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::engine::scene::{spawn_scene, ASTEROID_COUNT};
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn instance_layout_is_eight_vec4s() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 128);
    }

    #[test]
    fn stretched_parts_keep_normals_perpendicular() {
        // Hull stretch: twice as long along Y.
        let model = Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0));
        let surface = Vec3::new(1.0, -1.0, 0.0);
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!(surface.dot(normal).abs() < 1e-6);

        let stretched_surface = model.transform_vector3(surface);
        let naive = model.transform_vector3(normal);
        let corrected = normal_matrix(model) * normal;
        assert!(stretched_surface.dot(naive).abs() > 0.1);
        assert!(stretched_surface.dot(corrected).abs() < 1e-6);

        let instance = InstanceData::new(model, Vec4::ONE);
        assert_eq!(instance.normal[1], [0.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn full_scene_instance_counts() {
        let mut world = World::new();
        let config = SceneConfig { seed: None, star_count: 10, particle_count: 10 };
        spawn_scene(&mut world, &config, &mut StdRng::seed_from_u64(0));
        let list = collect(&mut world);

        // 3 ships × 1 wing cube, 2 stations × 4 spokes, 50 asteroids
        assert_eq!(list.instances(MeshKind::Cube).len(), 3 + 8 + ASTEROID_COUNT);
        // 3 engine glows, 2 hubs, 2 planets
        assert_eq!(list.instances(MeshKind::Sphere).len(), 7);
        assert_eq!(list.instances(MeshKind::Hull).len(), 3);
        assert_eq!(list.instances(MeshKind::Ring).len(), 2);
        assert_eq!(list.clouds.len(), 2);
    }

    #[test]
    fn asteroids_follow_the_field_rotation() {
        let mut world = World::new();
        let body = AsteroidBody { position: Vec3::new(10.0, 0.0, 0.0), scale: 0.5, rotation: Vec3::ZERO };
        let mut transform = Transform::from_position(Vec3::new(0.0, 0.0, -40.0));
        transform.rotation.y = std::f32::consts::FRAC_PI_2;
        world.spawn((transform, Model::asteroid(), AsteroidField { bodies: vec![body] }));

        let list = collect(&mut world);
        let m = Mat4::from_cols_array_2d(&list.instances(MeshKind::Cube)[0].model);
        let centre = m.transform_point3(Vec3::ZERO);
        // +X rotated a quarter turn about Y lands on -Z.
        assert!((centre - Vec3::new(0.0, 0.0, -50.0)).length() < 1e-4, "{centre:?}");
    }
}
