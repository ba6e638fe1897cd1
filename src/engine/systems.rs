// ECS systems that animate the scene.
// All of them read the shared SceneClock and only touch Mounted entities.

use bevy_ecs::prelude::*;

use super::components::*;

/// Shared animation clock, advanced once per frame before the schedule runs.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneClock {
    /// Seconds since the scene was created. Never decreases.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl SceneClock {
    pub fn advance_to(&mut self, elapsed: f32) {
        let elapsed = elapsed.max(self.elapsed);
        self.delta = elapsed - self.elapsed;
        self.elapsed = elapsed;
    }
}

/// Absolute rotations: particle field, stations, planets, asteroid field.
pub fn spin_system(
    clock: Res<SceneClock>,
    mut query: Query<(&mut Transform, &Spin), With<Mounted>>,
) {
    for (mut transform, spin) in &mut query {
        transform.rotation = spin.rotation_at(clock.elapsed);
    }
}

/// Per-frame accumulated wander of the spaceships.
pub fn drift_system(
    clock: Res<SceneClock>,
    mut query: Query<&mut Transform, (With<Drift>, With<Mounted>)>,
) {
    let (rotation, position) = Drift::step(clock.elapsed, clock.delta);
    for mut transform in &mut query {
        transform.rotation += rotation;
        transform.position += position;
    }
}

/// Floating wobble of ships and stations.
pub fn hover_system(
    clock: Res<SceneClock>,
    mut query: Query<&mut Hover, With<Mounted>>,
) {
    for mut hover in &mut query {
        hover.offset = hover.offset_at(clock.elapsed);
    }
}

/// Build the per-frame animation schedule.
pub fn animation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((spin_system, drift_system, hover_system));
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn world_at(elapsed: f32) -> World {
        let mut world = World::new();
        world.insert_resource(SceneClock { elapsed, delta: 0.0 });
        world
    }

    fn run_frames(world: &mut World, schedule: &mut Schedule, frames: u32, dt: f32) {
        for _ in 0..frames {
            let next = world.resource::<SceneClock>().elapsed + dt;
            world.resource_mut::<SceneClock>().advance_to(next);
            schedule.run(world);
        }
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut clock = SceneClock::default();
        clock.advance_to(2.0);
        clock.advance_to(1.0);
        assert_eq!(clock.elapsed, 2.0);
        assert_eq!(clock.delta, 0.0);
    }

    #[test]
    fn station_angle_is_independent_of_frame_rate() {
        let mut schedule = animation_schedule();
        let mut fast = world_at(0.0);
        let mut slow = world_at(0.0);
        let station = (
            Transform::default(),
            Spin::new(Spin::STATION, Vec3::ZERO),
            Mounted,
        );
        let a = fast.spawn(station).id();
        let b = slow.spawn(station).id();

        run_frames(&mut fast, &mut schedule, 600, 1.0 / 120.0);
        let mut schedule = animation_schedule();
        run_frames(&mut slow, &mut schedule, 50, 0.1);

        let expected = (0.05_f32 * 5.0).rem_euclid(std::f32::consts::TAU);
        for (world, entity) in [(&fast, a), (&slow, b)] {
            let y = world.get::<Transform>(entity).unwrap().rotation.y;
            assert!((y.rem_euclid(std::f32::consts::TAU) - expected).abs() < 1e-3, "got {y}");
        }
    }

    #[test]
    fn particle_field_spins_on_two_axes_without_moving() {
        let mut world = world_at(0.0);
        let field = world
            .spawn((Transform::default(), Spin::new(Spin::PARTICLE_FIELD, Vec3::ZERO), Mounted))
            .id();
        world.resource_mut::<SceneClock>().advance_to(20.0);
        animation_schedule().run(&mut world);

        let t = world.get::<Transform>(field).unwrap();
        assert!((t.rotation.x - 1.0).abs() < 1e-5);
        assert!((t.rotation.y - 0.4).abs() < 1e-5);
        assert_eq!(t.position, Vec3::ZERO);
    }

    #[test]
    fn planet_and_asteroid_field_rates() {
        let mut world = world_at(0.0);
        let planet = world.spawn((Transform::default(), Spin::new(Spin::PLANET, Vec3::ZERO), Mounted)).id();
        let field = world
            .spawn((Transform::default(), Spin::new(Spin::ASTEROID_FIELD, Vec3::ZERO), Mounted))
            .id();
        world.resource_mut::<SceneClock>().advance_to(10.0);
        animation_schedule().run(&mut world);

        assert!((world.get::<Transform>(planet).unwrap().rotation.y - 1.0).abs() < 1e-5);
        let r = world.get::<Transform>(field).unwrap().rotation;
        assert!((r.y - 0.2).abs() < 1e-5);
        assert!((r.x - 0.1).abs() < 1e-5);
    }

    #[test]
    fn unmounted_objects_are_skipped() {
        let mut world = world_at(0.0);
        let idle = world.spawn((Transform::default(), Spin::new(Spin::PLANET, Vec3::ZERO))).id();
        let ship = world.spawn((Transform::default(), Drift)).id();
        world.resource_mut::<SceneClock>().advance_to(3.0);
        animation_schedule().run(&mut world);

        assert_eq!(*world.get::<Transform>(idle).unwrap(), Transform::default());
        assert_eq!(*world.get::<Transform>(ship).unwrap(), Transform::default());
    }

    #[test]
    fn spaceship_accumulates_deltas() {
        let mut world = world_at(0.0);
        let start = Transform::from_position(Vec3::new(-5.0, 3.0, -10.0));
        let ship = world.spawn((start, Drift, Mounted)).id();
        let mut schedule = animation_schedule();

        let dt = Drift::REFERENCE_FRAME;
        let mut expected = start;
        let mut t = 0.0;
        for _ in 0..30 {
            t += dt;
            let (rot, pos) = Drift::step(t, dt);
            expected.rotation += rot;
            expected.position += pos;
        }
        run_frames(&mut world, &mut schedule, 30, dt);

        let actual = world.get::<Transform>(ship).unwrap();
        assert!((actual.position - expected.position).length() < 1e-4);
        assert!((actual.rotation - expected.rotation).length() < 1e-4);
        assert_ne!(actual.position, start.position);
    }

    #[test]
    fn stalled_frame_moves_a_ship_at_most_one_capped_step() {
        let mut world = world_at(0.0);
        let ship = world.spawn((Transform::default(), Drift, Mounted)).id();
        let mut schedule = animation_schedule();
        run_frames(&mut world, &mut schedule, 1, Drift::REFERENCE_FRAME);
        let before = *world.get::<Transform>(ship).unwrap();

        // Thirty seconds pass between two frames.
        world.resource_mut::<SceneClock>().advance_to(30.0 + Drift::REFERENCE_FRAME);
        schedule.run(&mut world);
        let after = *world.get::<Transform>(ship).unwrap();

        let steps = Drift::MAX_FRAME / Drift::REFERENCE_FRAME;
        assert!((after.position - before.position).length() <= 0.01 * 2.0_f32.sqrt() * steps + 1e-5);
        assert!((after.rotation - before.rotation).length() <= 0.006 * steps + 1e-5);
    }

    #[test]
    fn hover_offset_follows_clock() {
        let mut world = world_at(0.0);
        let entity = world.spawn((Hover::station(12.0), Mounted)).id();
        world.resource_mut::<SceneClock>().advance_to(7.0);
        animation_schedule().run(&mut world);

        let hover = world.get::<Hover>(entity).unwrap();
        assert_eq!(hover.offset, hover.offset_at(7.0));
    }
}
