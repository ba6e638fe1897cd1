// Procedural mesh types, primitive builders and triangulation.
//
// Pipeline:
//   cuboid() / uv_sphere() / cylinder() / open_ring() → PolyMesh → triangulate_smooth() → RenderMesh → GPU
//
// All builders produce unit-sized shapes centred on the origin with CCW winding
// seen from outside. Size and placement come from the model part matrices.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

// ============================================================================
// GPU VERTICES
// ============================================================================

/// GPU-ready vertex with position and normal.
///   @location(0) position: vec3<f32>
///   @location(1) normal:   vec3<f32>
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal:   [f32; 3],
}

impl GpuVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// One point of a star or particle cloud.
///   @location(0) position:   vec3<f32>
///   @location(1) brightness: f32
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position:   [f32; 3],
    pub brightness: f32,
}

impl PointVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

// ============================================================================
// POLY MESH
// ============================================================================

/// Intermediate polygon mesh for procedural construction.
/// Supports n-gon faces; faces use CCW winding viewed from outside.
/// Only used at startup; heap allocation per face is acceptable.
pub struct PolyMesh {
    pub positions: Vec<Vec3>,
    pub faces:     Vec<Vec<usize>>,
}

impl PolyMesh {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces:     Vec::new(),
        }
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, pos: Vec3) -> usize {
        let idx = self.positions.len();
        self.positions.push(pos);
        idx
    }

    /// Add a face by vertex indices (CCW order).
    pub fn add_face(&mut self, indices: Vec<usize>) {
        debug_assert!(indices.len() >= 3, "Face must have at least 3 vertices");
        self.faces.push(indices);
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() }

    /// Add a ring of `segments` vertices at height `y` and return their indices.
    fn add_ring(&mut self, radius: f32, y: f32, segments: u32) -> Vec<usize> {
        (0..segments)
            .map(|j| {
                let theta = TAU * j as f32 / segments as f32;
                self.add_vertex(Vec3::new(radius * theta.cos(), y, radius * theta.sin()))
            })
            .collect()
    }

    /// Quad strip between an upper and a lower ring, facing outward.
    fn stitch_outward(&mut self, upper: &[usize], lower: &[usize]) {
        let n = upper.len();
        for j in 0..n {
            let k = (j + 1) % n;
            self.add_face(vec![upper[j], upper[k], lower[k], lower[j]]);
        }
    }

    /// Quad strip between an upper and a lower ring, facing the axis.
    fn stitch_inward(&mut self, upper: &[usize], lower: &[usize]) {
        let n = upper.len();
        for j in 0..n {
            let k = (j + 1) % n;
            self.add_face(vec![upper[j], lower[j], lower[k], upper[k]]);
        }
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Axis-aligned unit cube (side 1). Each face owns its four vertices so
/// smooth triangulation still yields flat shading.
pub fn cuboid() -> PolyMesh {
    // (normal, u, v) with u × v = normal
    let faces = [
        (Vec3::X,     Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y,     Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z,     Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = PolyMesh::new();
    for (normal, u, v) in faces {
        let c = normal * 0.5;
        let a = mesh.add_vertex(c + (-u - v) * 0.5);
        let b = mesh.add_vertex(c + (u - v) * 0.5);
        let d = mesh.add_vertex(c + (u + v) * 0.5);
        let e = mesh.add_vertex(c + (-u + v) * 0.5);
        mesh.add_face(vec![a, b, d, e]);
    }
    mesh
}

/// Unit-radius sphere with `segments` columns and `rings` latitude bands.
/// Vertices are shared across the seam so normals stay smooth.
pub fn uv_sphere(segments: u32, rings: u32) -> PolyMesh {
    debug_assert!(segments >= 3 && rings >= 2);

    let mut mesh = PolyMesh::new();
    let top = mesh.add_vertex(Vec3::Y);

    let bands: Vec<Vec<usize>> = (1..rings)
        .map(|i| {
            let phi = PI * i as f32 / rings as f32;
            mesh.add_ring(phi.sin(), phi.cos(), segments)
        })
        .collect();

    let bottom = mesh.add_vertex(Vec3::NEG_Y);
    let n = segments as usize;

    let first = &bands[0];
    for j in 0..n {
        mesh.add_face(vec![top, first[(j + 1) % n], first[j]]);
    }
    for pair in bands.windows(2) {
        mesh.stitch_outward(&pair[0], &pair[1]);
    }
    let last = &bands[bands.len() - 1];
    for j in 0..n {
        mesh.add_face(vec![last[j], last[(j + 1) % n], bottom]);
    }
    mesh
}

/// Capped cylinder along Y, height 1, centred on the origin.
/// `radius_top` sits at +Y, `radius_bottom` at -Y.
pub fn cylinder(radius_top: f32, radius_bottom: f32, segments: u32) -> PolyMesh {
    let mut mesh = PolyMesh::new();

    let upper = mesh.add_ring(radius_top, 0.5, segments);
    let lower = mesh.add_ring(radius_bottom, -0.5, segments);
    mesh.stitch_outward(&upper, &lower);

    // Caps get their own vertices so the rim stays sharp.
    let mut top_cap = mesh.add_ring(radius_top, 0.5, segments);
    top_cap.reverse();
    mesh.add_face(top_cap);

    let bottom_cap = mesh.add_ring(radius_bottom, -0.5, segments);
    mesh.add_face(bottom_cap);

    mesh
}

/// Open tube of unit radius and height 1 with both an outer and an inner wall,
/// so it reads from either side with back-face culling on.
pub fn open_ring(segments: u32) -> PolyMesh {
    let mut mesh = PolyMesh::new();

    let outer_top = mesh.add_ring(1.0, 0.5, segments);
    let outer_bottom = mesh.add_ring(1.0, -0.5, segments);
    mesh.stitch_outward(&outer_top, &outer_bottom);

    let inner_top = mesh.add_ring(1.0, 0.5, segments);
    let inner_bottom = mesh.add_ring(1.0, -0.5, segments);
    mesh.stitch_inward(&inner_top, &inner_bottom);

    mesh
}

// ============================================================================
// RENDER MESH
// ============================================================================

/// GPU-ready triangulated mesh with per-vertex normals.
/// Upload vertex_bytes() to a VERTEX buffer, index_bytes() to an INDEX buffer.
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices:  Vec<u32>,
}

impl RenderMesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> usize  { self.indices.len() }
}

// ============================================================================
// TRIANGULATION + SMOOTH NORMALS
// ============================================================================

/// Convert a PolyMesh to a GPU-ready RenderMesh using smooth (area-weighted) normals.
///
///   1. Accumulate area-weighted face normals into each vertex.
///      The cross product magnitude = 2×triangle_area, giving automatic area-weighting.
///   2. Normalize each accumulated normal.
///   3. Fan-triangulate each face (from vertex 0) into the index buffer.
pub fn triangulate_smooth(poly: &PolyMesh) -> RenderMesh {
    let n_verts = poly.vertex_count();

    let mut normal_accum: Vec<Vec3> = vec![Vec3::ZERO; n_verts];

    for face in &poly.faces {
        let n = face.len();
        for i in 1..(n - 1) {
            let a = poly.positions[face[0]];
            let b = poly.positions[face[i]];
            let c = poly.positions[face[i + 1]];
            let weighted_normal = (b - a).cross(c - a);
            normal_accum[face[0]]     += weighted_normal;
            normal_accum[face[i]]     += weighted_normal;
            normal_accum[face[i + 1]] += weighted_normal;
        }
    }

    let vertices: Vec<GpuVertex> = poly.positions.iter()
        .zip(normal_accum.iter())
        .map(|(pos, n)| GpuVertex {
            position: pos.to_array(),
            normal:   n.normalize_or_zero().to_array(),
        })
        .collect();

    let mut indices: Vec<u32> = Vec::new();
    for face in &poly.faces {
        let n = face.len();
        for i in 1..(n - 1) {
            indices.push(face[0]     as u32);
            indices.push(face[i]     as u32);
            indices.push(face[i + 1] as u32);
        }
    }

    RenderMesh { vertices, indices }
}
