// Core ECS components for the space scene.
// Each decorative object is one entity; its animation is one component.

use bevy_ecs::prelude::*;
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

use super::mesh::PointVertex;

/// Position, rotation and uniform scale of an entity in world space.
/// Rotation is Euler angles in radians applied in XYZ order.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            euler_xyz(self.rotation),
            self.position,
        )
    }
}

pub fn euler_xyz(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Which kind of decorative object an entity is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    StarField,
    ParticleField,
    Spaceship,
    SpaceStation,
    Planet,
    AsteroidField,
}

/// Present once the renderer has GPU resources for the scene.
/// Animation systems skip entities without it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Mounted;

/// Absolute rotation driven by elapsed time.
///
/// Every axis with a non-zero rate is set to `rate * t`; the other axes keep
/// the rotation the object was spawned with.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub rates: Vec3,
    pub base: Vec3,
}

impl Spin {
    pub const PARTICLE_FIELD: Vec3 = Vec3::new(0.05, 0.02, 0.0);
    pub const STATION: Vec3 = Vec3::new(0.0, 0.05, 0.0);
    pub const PLANET: Vec3 = Vec3::new(0.0, 0.1, 0.0);
    pub const ASTEROID_FIELD: Vec3 = Vec3::new(0.01, 0.02, 0.0);

    pub fn new(rates: Vec3, base: Vec3) -> Self {
        Self { rates, base }
    }

    pub fn rotation_at(&self, t: f32) -> Vec3 {
        let spun = self.rates * t;
        Vec3::select(self.rates.cmpne(Vec3::ZERO), spun, self.base)
    }
}

/// Integrator-style wander used by the spaceships.
///
/// Each frame adds a time-dependent delta to the current transform, so the
/// result depends on the frame history, not on `t` alone.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Drift;

impl Drift {
    /// Frame duration the per-frame amplitudes were tuned for.
    pub const REFERENCE_FRAME: f32 = 1.0 / 60.0;
    /// Longest frame that still advances the drift in full. A stall (first
    /// frame, hidden window, modal dialog) only advances by this much.
    pub const MAX_FRAME: f32 = 0.1;

    /// Returns (rotation delta, position delta) for one frame of length `dt` at time `t`.
    pub fn step(t: f32, dt: f32) -> (Vec3, Vec3) {
        let k = dt.clamp(0.0, Self::MAX_FRAME) / Self::REFERENCE_FRAME;
        let rotation = Vec3::new((0.3 * t).sin() * 0.003, 0.0, (0.5 * t).sin() * 0.005);
        let position = Vec3::new((0.2 * t).sin() * 0.01, (0.3 * t).cos() * 0.01, 0.0);
        (rotation * k, position * k)
    }
}

/// Gentle floating wobble applied inside an object's own transform.
/// `offset` is recomputed every frame from elapsed time and `phase`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hover {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub phase: f32,
    pub offset: Mat4,
}

impl Hover {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32, phase: f32) -> Self {
        let mut hover = Self {
            speed,
            rotation_intensity,
            float_intensity,
            phase,
            offset: Mat4::IDENTITY,
        };
        hover.offset = hover.offset_at(0.0);
        hover
    }

    pub fn spaceship(phase: f32) -> Self {
        Self::new(3.0, 0.2, 0.8, phase)
    }

    pub fn station(phase: f32) -> Self {
        Self::new(1.0, 0.1, 0.2, phase)
    }

    pub fn offset_at(&self, t: f32) -> Mat4 {
        let s = (t + self.phase) / 4.0 * self.speed;
        let rotation = Vec3::new(s.cos() / 8.0, s.sin() / 8.0, s.sin() / 20.0) * self.rotation_intensity;
        let lift = s.sin() / 10.0 * self.float_intensity;
        Mat4::from_rotation_translation(euler_xyz(rotation), Vec3::new(0.0, lift, 0.0))
    }
}

/// One rock of the asteroid field, in the field's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidBody {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: Vec3,
}

impl AsteroidBody {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            euler_xyz(self.rotation),
            self.position,
        )
    }
}

/// Bodies are fixed at creation; only the owning entity's transform moves.
#[derive(Component, Debug, Clone)]
pub struct AsteroidField {
    pub bodies: Vec<AsteroidBody>,
}

/// Static point positions drawn as a single cloud, rotated by the entity transform.
#[derive(Component, Debug, Clone)]
pub struct PointCloud {
    pub points: Vec<PointVertex>,
    /// Linear RGB plus opacity.
    pub color: Vec4,
}

/// Convert a `0xRRGGBB` sRGB color to linear RGB.
pub fn srgb_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        c.powf(2.2)
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_overrides_only_driven_axes() {
        let spin = Spin::new(Spin::STATION, Vec3::new(0.5, 0.3, 0.2));
        let r = spin.rotation_at(10.0);
        assert_eq!(r.x, 0.5);
        assert!((r.y - 0.5).abs() < 1e-6);
        assert_eq!(r.z, 0.2);
    }

    #[test]
    fn drift_at_reference_rate_matches_per_frame_amplitudes() {
        let t = 2.0_f32;
        let (rot, pos) = Drift::step(t, Drift::REFERENCE_FRAME);
        assert!((rot.z - (0.5 * t).sin() * 0.005).abs() < 1e-7);
        assert!((rot.x - (0.3 * t).sin() * 0.003).abs() < 1e-7);
        assert!((pos.x - (0.2 * t).sin() * 0.01).abs() < 1e-7);
        assert!((pos.y - (0.3 * t).cos() * 0.01).abs() < 1e-7);
        assert_eq!(rot.y, 0.0);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn drift_scales_with_frame_length() {
        let (rot_60, pos_60) = Drift::step(1.3, 1.0 / 60.0);
        let (rot_120, pos_120) = Drift::step(1.3, 1.0 / 120.0);
        assert!((rot_60 - rot_120 * 2.0).length() < 1e-6);
        assert!((pos_60 - pos_120 * 2.0).length() < 1e-6);
    }

    #[test]
    fn drift_step_is_capped_for_long_frames() {
        let (rot_cap, pos_cap) = Drift::step(4.0, Drift::MAX_FRAME);
        let (rot_stall, pos_stall) = Drift::step(4.0, 30.0);
        assert_eq!(rot_stall, rot_cap);
        assert_eq!(pos_stall, pos_cap);
        assert!(pos_stall.length() <= 0.01 * 2.0_f32.sqrt() * Drift::MAX_FRAME / Drift::REFERENCE_FRAME + 1e-6);
    }

    #[test]
    fn hover_is_pure_function_of_time() {
        let hover = Hover::spaceship(42.0);
        assert_eq!(hover.offset_at(3.5), hover.offset_at(3.5));
        let lift = hover.offset_at(3.5).w_axis.y;
        let s: f32 = (3.5 + 42.0) / 4.0 * 3.0;
        assert!((lift - s.sin() / 10.0 * 0.8).abs() < 1e-5);
    }

    #[test]
    fn hex_colors_convert_to_linear() {
        assert_eq!(srgb_hex(0x000000), Vec3::ZERO);
        assert_eq!(srgb_hex(0xffffff), Vec3::ONE);
        let c = srgb_hex(0xff4a4a);
        assert_eq!(c.x, 1.0);
        assert!(c.y > 0.0 && c.y < 0.1);
    }
}
