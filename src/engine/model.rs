// Decorative models assembled from a handful of shared primitive meshes.
// A model is a list of parts; each part places one primitive in the object's local space.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3};

use super::components::srgb_hex;
use super::mesh::{self, RenderMesh};

/// Shared GPU meshes. Every part of every model draws one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
    /// Tapered cylinder used for spaceship bodies (radius 0.3 → 0.1).
    Hull,
    /// Open double-walled tube used for station rings.
    Ring,
}

impl MeshKind {
    pub const ALL: [MeshKind; 4] = [MeshKind::Cube, MeshKind::Sphere, MeshKind::Hull, MeshKind::Ring];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn build(self) -> RenderMesh {
        let poly = match self {
            MeshKind::Cube => mesh::cuboid(),
            MeshKind::Sphere => mesh::uv_sphere(32, 32),
            MeshKind::Hull => mesh::cylinder(0.3, 0.1, 32),
            MeshKind::Ring => mesh::open_ring(32),
        };
        mesh::triangulate_smooth(&poly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub mesh: MeshKind,
    pub local: Mat4,
    /// Linear RGB.
    pub color: Vec3,
    /// Multiplier for self-illumination; 0 = lit only by scene lights.
    pub emissive: f32,
}

impl Part {
    fn new(mesh: MeshKind, local: Mat4, color: u32) -> Self {
        Self { mesh, local, color: srgb_hex(color), emissive: 0.0 }
    }

    fn glowing(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

#[derive(Component, Debug, Clone)]
pub struct Model {
    pub parts: Vec<Part>,
}

impl Model {
    pub fn spaceship() -> Self {
        Self {
            parts: vec![
                // Body: length 2 along Z, wide end at +Z tapering toward the engine at -Z
                Part::new(
                    MeshKind::Hull,
                    Mat4::from_rotation_x(FRAC_PI_2) * Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0)),
                    0x666666,
                ),
                // Wings
                Part::new(
                    MeshKind::Cube,
                    Mat4::from_scale_rotation_translation(
                        Vec3::new(2.0, 0.1, 0.5),
                        glam::Quat::IDENTITY,
                        Vec3::new(0.0, 0.0, 0.5),
                    ),
                    0x444444,
                ),
                // Engine glow
                Part::new(
                    MeshKind::Sphere,
                    Mat4::from_scale_rotation_translation(
                        Vec3::splat(0.2),
                        glam::Quat::IDENTITY,
                        Vec3::new(0.0, 0.0, -1.2),
                    ),
                    0x00ff88,
                )
                .glowing(2.0),
            ],
        }
    }

    pub fn space_station() -> Self {
        let mut parts = vec![
            Part::new(MeshKind::Sphere, Mat4::IDENTITY, 0x888888),
            Part::new(
                MeshKind::Ring,
                Mat4::from_rotation_x(FRAC_PI_2) * Mat4::from_scale(Vec3::new(2.0, 0.1, 2.0)),
                0x666666,
            ),
        ];
        for angle in [0.0, FRAC_PI_2, PI, PI * 1.5_f32] {
            parts.push(Part::new(
                MeshKind::Cube,
                Mat4::from_scale_rotation_translation(
                    Vec3::new(0.2, 0.2, 2.0),
                    glam::Quat::IDENTITY,
                    Vec3::new(angle.cos() * 1.5, angle.sin() * 1.5, 0.0),
                ),
                0x555555,
            ));
        }
        Self { parts }
    }

    pub fn planet(color: u32) -> Self {
        Self {
            parts: vec![Part::new(MeshKind::Sphere, Mat4::IDENTITY, color)],
        }
    }

    /// A single rock; the asteroid field draws one per body.
    pub fn asteroid() -> Self {
        Self {
            parts: vec![Part::new(MeshKind::Cube, Mat4::IDENTITY, 0x777777)],
        }
    }
}
