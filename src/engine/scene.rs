// Scene construction: spawns every decorative object once at startup.
//
// All randomized layout draws from the caller's Rng so a seeded generator
// reproduces the same scene.

use std::f32::consts::{PI, TAU};

use bevy_ecs::prelude::*;
use glam::{Vec3, Vec4};
use rand::Rng;

use super::components::*;
use super::mesh::PointVertex;
use super::model::Model;
use crate::config::SceneConfig;

pub const ASTEROID_COUNT: usize = 50;
/// Asteroid positions are spread over a cube of this side, centred on the field.
pub const ASTEROID_SPREAD: f32 = 60.0;
pub const ASTEROID_SCALE_MIN: f32 = 0.2;
pub const ASTEROID_SCALE_MAX: f32 = 0.7;

pub const PARTICLE_SPREAD: f32 = 200.0;
pub const PARTICLE_OPACITY: f32 = 0.6;

pub const STAR_RADIUS: f32 = 300.0;
pub const STAR_DEPTH: f32 = 60.0;

const HOVER_PHASE_MAX: f32 = 10_000.0;

/// Spawn the full scene. Entities start unmounted; see [`mount_scene`].
pub fn spawn_scene(world: &mut World, config: &SceneConfig, rng: &mut impl Rng) {
    world.spawn((
        SceneObject::StarField,
        Transform::default(),
        PointCloud {
            points: star_points(rng, config.star_count),
            color: Vec4::ONE,
        },
    ));

    world.spawn((
        SceneObject::ParticleField,
        Transform::default(),
        Spin::new(Spin::PARTICLE_FIELD, Vec3::ZERO),
        PointCloud {
            points: particle_points(rng, config.particle_count),
            color: srgb_hex(0x4a90ff).extend(PARTICLE_OPACITY),
        },
    ));

    let ships = [
        (Vec3::new(-5.0, 3.0, -10.0), 0.8, Vec3::new(0.2, 0.5, 0.0)),
        (Vec3::new(8.0, -4.0, -15.0), 1.2, Vec3::new(-0.3, -0.2, 0.1)),
        (Vec3::new(0.0, 7.0, -20.0), 1.5, Vec3::new(0.1, 0.8, -0.2)),
    ];
    for (position, scale, rotation) in ships {
        world.spawn((
            SceneObject::Spaceship,
            Transform::from_position(position).with_scale(scale).with_rotation(rotation),
            Drift,
            Hover::spaceship(rng.gen_range(0.0..HOVER_PHASE_MAX)),
            Model::spaceship(),
        ));
    }

    let stations = [
        (Vec3::new(-10.0, -8.0, -25.0), 2.0, Vec3::ZERO),
        (Vec3::new(15.0, 10.0, -30.0), 3.0, Vec3::new(0.5, 0.3, 0.2)),
    ];
    for (position, scale, rotation) in stations {
        world.spawn((
            SceneObject::SpaceStation,
            Transform::from_position(position).with_scale(scale).with_rotation(rotation),
            Spin::new(Spin::STATION, rotation),
            Hover::station(rng.gen_range(0.0..HOVER_PHASE_MAX)),
            Model::space_station(),
        ));
    }

    let planets = [
        (Vec3::new(-20.0, 5.0, -50.0), 5.0, 0xff4a4a),
        (Vec3::new(25.0, -15.0, -70.0), 8.0, 0x4aff4a),
    ];
    for (position, scale, color) in planets {
        world.spawn((
            SceneObject::Planet,
            Transform::from_position(position).with_scale(scale),
            Spin::new(Spin::PLANET, Vec3::ZERO),
            Model::planet(color),
        ));
    }

    world.spawn((
        SceneObject::AsteroidField,
        Transform::from_position(Vec3::new(0.0, 0.0, -40.0)),
        Spin::new(Spin::ASTEROID_FIELD, Vec3::ZERO),
        AsteroidField { bodies: asteroid_bodies(rng, ASTEROID_COUNT) },
        Model::asteroid(),
    ));

    let count = world.query::<&SceneObject>().iter(world).count();
    log::info!(
        "Spawned {} scene objects ({} stars, {} particles, {} asteroids)",
        count, config.star_count, config.particle_count, ASTEROID_COUNT
    );
}

/// Mark every scene object as ready to animate.
pub fn mount_scene(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, (With<SceneObject>, Without<Mounted>)>()
        .iter(world)
        .collect();
    for entity in entities {
        world.entity_mut(entity).insert(Mounted);
    }
}

/// Uniform `(u - 0.5) * spread` on each axis.
fn centred(rng: &mut impl Rng, spread: f32) -> Vec3 {
    Vec3::new(
        (rng.gen_range(0.0..1.0_f32) - 0.5) * spread,
        (rng.gen_range(0.0..1.0_f32) - 0.5) * spread,
        (rng.gen_range(0.0..1.0_f32) - 0.5) * spread,
    )
}

pub fn asteroid_bodies(rng: &mut impl Rng, count: usize) -> Vec<AsteroidBody> {
    (0..count)
        .map(|_| AsteroidBody {
            position: centred(rng, ASTEROID_SPREAD),
            scale: rng.gen_range(ASTEROID_SCALE_MIN..ASTEROID_SCALE_MAX),
            rotation: Vec3::new(
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
            ),
        })
        .collect()
}

pub fn particle_points(rng: &mut impl Rng, count: usize) -> Vec<PointVertex> {
    (0..count)
        .map(|_| PointVertex {
            position: centred(rng, PARTICLE_SPREAD).to_array(),
            brightness: 1.0,
        })
        .collect()
}

/// Stars on a spherical shell; the radius creeps inward from the outer edge
/// so the shell fills from STAR_RADIUS + STAR_DEPTH down toward STAR_RADIUS.
pub fn star_points(rng: &mut impl Rng, count: usize) -> Vec<PointVertex> {
    let mut radius = STAR_RADIUS + STAR_DEPTH;
    let increment = if count > 0 { STAR_DEPTH / count as f32 } else { 0.0 };

    (0..count)
        .map(|_| {
            radius -= increment * rng.gen_range(0.0..1.0_f32);
            let polar = (1.0 - rng.gen_range(0.0..2.0_f32)).acos();
            let azimuth = rng.gen_range(0.0..TAU);
            let position = Vec3::new(
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.cos(),
            );
            PointVertex {
                position: position.to_array(),
                brightness: 0.9 * (0.5 + 0.5 * rng.gen_range(0.0..1.0_f32)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_config() -> SceneConfig {
        SceneConfig {
            seed: Some(1),
            star_count: 500,
            particle_count: 200,
        }
    }

    #[test]
    fn asteroid_field_has_fifty_bounded_bodies() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let bodies = asteroid_bodies(&mut rng, ASTEROID_COUNT);
            assert_eq!(bodies.len(), 50);
            for body in &bodies {
                for c in body.position.to_array() {
                    assert!((-30.0..=30.0).contains(&c), "position {c} out of range");
                }
                assert!((0.2..=0.7).contains(&body.scale));
                for r in body.rotation.to_array() {
                    assert!((0.0..=PI).contains(&r));
                }
            }
        }
    }

    #[test]
    fn spawned_field_keeps_exactly_fifty_bodies() {
        let mut world = World::new();
        spawn_scene(&mut world, &small_config(), &mut StdRng::seed_from_u64(9));
        let fields: Vec<usize> = world
            .query::<&AsteroidField>()
            .iter(&world)
            .map(|f| f.bodies.len())
            .collect();
        assert_eq!(fields, vec![50]);
    }

    #[test]
    fn particles_stay_inside_their_cube() {
        let points = particle_points(&mut StdRng::seed_from_u64(3), 1000);
        assert_eq!(points.len(), 1000);
        for p in &points {
            assert!(p.position.iter().all(|c| c.abs() <= 100.0));
        }
    }

    #[test]
    fn stars_lie_in_the_shell() {
        let points = star_points(&mut StdRng::seed_from_u64(5), 2000);
        for p in &points {
            let r = Vec3::from_array(p.position).length();
            assert!(r >= STAR_RADIUS - 1e-2 && r <= STAR_RADIUS + STAR_DEPTH + 1e-2, "radius {r}");
            assert!(p.brightness > 0.0 && p.brightness <= 0.9);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = asteroid_bodies(&mut StdRng::seed_from_u64(11), ASTEROID_COUNT);
        let b = asteroid_bodies(&mut StdRng::seed_from_u64(11), ASTEROID_COUNT);
        assert_eq!(a, b);
    }

    #[test]
    fn scene_contains_the_fixed_cast() {
        let mut world = World::new();
        spawn_scene(&mut world, &small_config(), &mut StdRng::seed_from_u64(2));

        let kinds: Vec<SceneObject> = world.query::<&SceneObject>().iter(&world).copied().collect();
        let count = |kind| kinds.iter().filter(|k| **k == kind).count();
        assert_eq!(count(SceneObject::Spaceship), 3);
        assert_eq!(count(SceneObject::SpaceStation), 2);
        assert_eq!(count(SceneObject::Planet), 2);
        assert_eq!(count(SceneObject::AsteroidField), 1);
        assert_eq!(count(SceneObject::ParticleField), 1);
        assert_eq!(count(SceneObject::StarField), 1);
    }

    #[test]
    fn mounting_marks_every_object() {
        let mut world = World::new();
        spawn_scene(&mut world, &small_config(), &mut StdRng::seed_from_u64(4));
        assert_eq!(world.query::<&Mounted>().iter(&world).count(), 0);

        mount_scene(&mut world);
        let objects = world.query::<&SceneObject>().iter(&world).count();
        assert_eq!(world.query::<&Mounted>().iter(&world).count(), objects);
    }
}
