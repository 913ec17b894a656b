//! Junction topology, spawning and whole-world ticks

use intersection_sim::simulation::layout::{self, lane, LANES};
use intersection_sim::simulation::{
    run, FrameLimiter, HeadlessPresenter, LightState, Orientation, Position, Presenter, Rgb,
    SceneSnapshot, Side, SimConfig, SimVehicle, SimWorld, SpawnDraw, SpawnPolicy, Velocity,
    VehicleId, VEHICLE_SPEED,
};

fn quiet_world(seed: u64) -> SimWorld {
    let config = SimConfig {
        spawn_probability: 0.0,
        ..SimConfig::default().with_seed(seed)
    };
    SimWorld::new(config).expect("quiet config is valid")
}

/// Spawn through the normal path on a world that never spawns by itself
fn force_spawn(world: &mut SimWorld, side: Side, slot: usize) -> VehicleId {
    let quiet = world.config.spawn_probability;
    world.config.spawn_probability = 1.0;
    let id = world.apply_spawn(draw(side, slot));
    world.config.spawn_probability = quiet;
    id.expect("slot is wired")
}

fn draw(side: Side, slot: usize) -> SpawnDraw {
    SpawnDraw {
        roll: 0.01,
        side,
        slot,
    }
}

#[test]
fn test_fixed_topology() {
    let world = SimWorld::new_with_seed(1);

    assert_eq!(world.roads().len(), 4);
    assert_eq!(world.lights().len(), 4);
    assert_eq!(world.lanes().len(), 12);
    assert_eq!(world.vehicle_count(), 0);

    for (lane, spec) in world.lanes().iter().zip(LANES.iter()) {
        assert_eq!(lane.light, spec.light);
        assert!(world.light(lane.light).is_some());
    }

    let horizontal = [1, 2, 3, 7, 8, 9];
    for number in 1..=12 {
        let expected = if horizontal.contains(&number) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        assert_eq!(world.lane(lane(number)).unwrap().orientation(), expected);
    }
}

#[test]
fn test_lights_start_red() {
    let world = SimWorld::new_with_seed(2);
    for light in world.lights() {
        assert_eq!(light.state(), LightState::Stopped);
        assert!((3..=7).contains(&light.interval()));
    }
}

#[test]
fn test_forced_spawn_lands_in_expected_lane() {
    let mut world = SimWorld::new_with_seed(3);

    let id = world.apply_spawn(draw(Side::Left, 0));
    assert!(id.is_some());
    assert_eq!(world.vehicle_count(), 1);

    let lane_one = world.lane(lane(1)).unwrap();
    assert_eq!(lane_one.vehicle_count(), 1);
    let vehicle = &lane_one.vehicles()[0];
    assert_eq!(Some(vehicle.id), id);
    assert_eq!(vehicle.position, Position::new(200.0, 260.0));
    assert_eq!(vehicle.velocity, Velocity::new(VEHICLE_SPEED, 0.0));
    assert_eq!(vehicle.color, Rgb::RED);
}

#[test]
fn test_partial_wiring_table() {
    let expected = [
        (Side::Left, 0, 1, Position::new(200.0, 260.0), Velocity::new(0.5, 0.0)),
        (Side::Left, 1, 2, Position::new(200.0, 290.0), Velocity::new(0.5, 0.0)),
        (Side::Right, 1, 8, Position::new(600.0, 290.0), Velocity::new(-0.5, 0.0)),
        (Side::Right, 2, 9, Position::new(600.0, 320.0), Velocity::new(-0.5, 0.0)),
        (Side::Top, 1, 5, Position::new(390.0, 100.0), Velocity::new(0.0, 0.5)),
        (Side::Top, 2, 6, Position::new(420.0, 100.0), Velocity::new(0.0, 0.5)),
        (Side::Bottom, 0, 12, Position::new(360.0, 500.0), Velocity::new(0.0, -0.5)),
        (Side::Bottom, 1, 11, Position::new(390.0, 500.0), Velocity::new(0.0, -0.5)),
    ];

    for (side, slot, number, position, velocity) in expected {
        let mut world = SimWorld::new_with_seed(4);
        assert!(world.apply_spawn(draw(side, slot)).is_some());

        let target = world.lane(lane(number)).unwrap();
        assert_eq!(target.vehicle_count(), 1, "{:?} slot {}", side, slot);
        assert_eq!(target.vehicles()[0].position, position);
        assert_eq!(target.vehicles()[0].velocity, velocity);
        assert_eq!(world.vehicle_count(), 1);
    }
}

#[test]
fn test_unwired_slots_spawn_nothing() {
    let mut world = SimWorld::new_with_seed(5);
    let unwired = [
        (Side::Left, 2),
        (Side::Right, 0),
        (Side::Top, 0),
        (Side::Bottom, 2),
    ];

    for (side, slot) in unwired {
        assert!(world.apply_spawn(draw(side, slot)).is_none());
    }

    assert_eq!(world.vehicle_count(), 0);
    assert_eq!(world.stats.spawn_attempts, 4);
    assert_eq!(world.stats.unwired_spawns, 4);
    assert_eq!(world.stats.vehicles_spawned, 0);
    assert_eq!(world.stats.spawned_by_side, [0; 4]);
}

#[test]
fn test_failed_roll_is_not_an_attempt() {
    let mut world = SimWorld::new_with_seed(6);
    let miss = SpawnDraw {
        roll: 0.02,
        side: Side::Left,
        slot: 0,
    };

    assert!(world.apply_spawn(miss).is_none());
    assert_eq!(world.stats.spawn_attempts, 0);
    assert_eq!(world.vehicle_count(), 0);
}

#[test]
fn test_all_lanes_policy_wires_every_slot() {
    let config = SimConfig {
        spawn_policy: SpawnPolicy::AllLanes,
        ..SimConfig::default().with_seed(7)
    };
    let mut world = SimWorld::new(config).unwrap();

    assert!(world.apply_spawn(draw(Side::Left, 2)).is_some());
    assert!(world.apply_spawn(draw(Side::Right, 0)).is_some());
    assert!(world.apply_spawn(draw(Side::Top, 0)).is_some());
    assert!(world.apply_spawn(draw(Side::Bottom, 2)).is_some());
    for side in Side::ALL {
        assert_eq!(world.stats.spawned_from(side), 1, "{:?}", side);
    }

    assert_eq!(
        world.lane(lane(3)).unwrap().vehicles()[0].position,
        Position::new(200.0, 320.0)
    );
    assert_eq!(
        world.lane(lane(7)).unwrap().vehicles()[0].position,
        Position::new(600.0, 260.0)
    );
    assert_eq!(
        world.lane(lane(4)).unwrap().vehicles()[0].position,
        Position::new(360.0, 100.0)
    );
    assert_eq!(
        world.lane(lane(10)).unwrap().vehicles()[0].position,
        Position::new(420.0, 500.0)
    );
}

#[test]
fn test_entry_point_rejects_out_of_range_slot() {
    assert!(layout::entry_point(Side::Left, 3, SpawnPolicy::AllLanes, 0.5).is_none());
}

#[test]
fn test_spawn_rate_is_roughly_two_percent() {
    let mut world = SimWorld::new_with_seed(8);
    let ticks = 50_000;
    for _ in 0..ticks {
        world.spawn_tick();
    }

    let attempts = world.stats.spawn_attempts as f64;
    assert!(attempts > 0.015 * ticks as f64, "attempts = {}", attempts);
    assert!(attempts < 0.025 * ticks as f64, "attempts = {}", attempts);

    // Two of three slots are wired on every side
    let wired = world.stats.vehicles_spawned as f64 / attempts;
    assert!(wired > 0.55 && wired < 0.78, "wired share = {}", wired);
}

#[test]
fn test_same_seed_gives_same_run() {
    let mut a = SimWorld::new_with_seed(9);
    let mut b = SimWorld::new_with_seed(9);
    for _ in 0..3_000 {
        a.tick(1.0 / 165.0);
        b.tick(1.0 / 165.0);
    }

    assert_eq!(a.stats, b.stats);
    assert_eq!(a.scene(), b.scene());
}

#[test]
fn test_vehicle_exit_is_counted() {
    let mut world = quiet_world(10);
    let id = world.allocate_vehicle_id();
    world.add_vehicle(
        lane(1),
        SimVehicle::new(id, Position::new(799.9, 270.0), Velocity::new(0.5, 0.0)),
    );

    let report = world.tick(1.0 / 165.0);

    assert_eq!(report.lanes.removed, 1);
    assert_eq!(world.vehicle_count(), 0);
    assert_eq!(world.stats.vehicles_exited, 1);
}

#[test]
fn test_turning_vehicle_leaves_through_the_top() {
    let mut world = quiet_world(11);
    let id = world.allocate_vehicle_id();
    world.add_vehicle(
        lane(1),
        SimVehicle::new(id, Position::new(359.5, 260.0), Velocity::new(0.5, 0.0)),
    );

    world.tick(1.0 / 165.0);
    assert_eq!(world.stats.vehicles_turned, 1);

    // 260 units of vertical creep at half a unit per tick
    for _ in 0..600 {
        world.tick(1.0 / 165.0);
    }
    assert_eq!(world.stats.vehicles_turned, 1);
    assert_eq!(world.stats.vehicles_exited, 1);
    assert_eq!(world.vehicle_count(), 0);
}

#[test]
fn test_red_light_queues_entering_vehicles() {
    let mut world = quiet_world(12);
    let id = force_spawn(&mut world, Side::Left, 1);

    // Keep the west light red while ticking without touching its timer
    for _ in 0..1_000 {
        if let Some(light) = world.light_mut(layout::WEST_LIGHT) {
            light.set_state(LightState::Stopped);
        }
        world.tick(0.0);
    }

    let queued = world.lane(lane(2)).unwrap().vehicles();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].id, id);
    assert_eq!(queued[0].position.x, 200.0);
    assert_eq!(world.stats.vehicles_spawned, 1);
}

#[test]
fn test_green_light_lets_vehicles_through() {
    let mut world = quiet_world(13);
    let id = force_spawn(&mut world, Side::Left, 1);

    for _ in 0..100 {
        if let Some(light) = world.light_mut(layout::WEST_LIGHT) {
            light.set_state(LightState::Go);
        }
        world.tick(0.0);
    }

    let moving = world.lane(lane(2)).unwrap().vehicles();
    assert_eq!(moving.len(), 1);
    assert_eq!(moving[0].id, id);
    assert_eq!(moving[0].position.x, 250.0);
}

#[test]
fn test_ticked_lights_toggle_with_simulated_time() {
    let mut world = quiet_world(14);

    // Just short of the shortest possible interval: nothing flips
    let report = world.tick(2.9);
    assert_eq!(report.light_toggles, 0);

    // Past the longest interval every light has flipped once, and lights that
    // drew a short first interval may have flipped back
    let report = world.tick(4.2);
    assert!((4..=8).contains(&report.light_toggles), "{:?}", report);
    assert_eq!(world.stats.light_toggles as usize, report.light_toggles);
}

#[test]
fn test_scene_reflects_world() {
    let mut world = quiet_world(15);
    let id = force_spawn(&mut world, Side::Top, 1);
    let report = world.tick(1.0 / 165.0);
    assert_eq!(report.spawned, None);

    let scene = world.scene();
    assert_eq!(scene.roads.len(), 4);
    assert_eq!(scene.roads[0].label, "Road A");
    assert_eq!(scene.lanes.len(), 12);
    assert_eq!(scene.lights.len(), 4);
    assert_eq!(scene.vehicle_count(), 1);

    let snapshot = scene.vehicles().next().unwrap();
    assert_eq!(snapshot.id, id);
    let vehicle = &world.lane(lane(5)).unwrap().vehicles()[0];
    assert_eq!(snapshot.position, vehicle.position);
    assert_eq!(snapshot.color, Rgb::BLUE);

    for light in &scene.lights {
        assert_eq!(light.color, light.state.color());
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let bad_probability = SimConfig {
        spawn_probability: 1.5,
        ..SimConfig::default()
    };
    assert!(SimWorld::new(bad_probability).is_err());

    let zero_interval = SimConfig {
        light_interval: 0..=3,
        ..SimConfig::default()
    };
    assert!(SimWorld::new(zero_interval).is_err());

    let stalled_speed = SimConfig {
        vehicle_speed: 0.0,
        ..SimConfig::default()
    };
    assert!(SimWorld::new(stalled_speed).is_err());
}

#[test]
fn test_headless_run_stops_after_budget() {
    let mut world = quiet_world(16);
    let mut presenter = HeadlessPresenter::new(25, 0);
    let mut limiter = FrameLimiter::unlimited();

    let ticks = run(&mut world, &mut presenter, &mut limiter, 1.0 / 165.0);

    assert_eq!(ticks, 25);
    assert_eq!(world.stats.ticks, 25);
    let scene = presenter.last_scene.expect("at least one frame presented");
    assert_eq!(scene.lights.len(), 4);
}

struct ExitOnFirstVehicle {
    frames: usize,
}

impl Presenter for ExitOnFirstVehicle {
    fn exit_requested(&mut self) -> bool {
        self.frames >= 1
    }

    fn present(&mut self, scene: &SceneSnapshot) {
        if scene.vehicle_count() > 0 {
            self.frames += 1;
        }
    }
}

#[test]
fn test_presenter_controls_exit() {
    let config = SimConfig {
        spawn_probability: 1.0,
        ..SimConfig::default().with_seed(17)
    };
    let mut world = SimWorld::new(config).unwrap();
    let mut presenter = ExitOnFirstVehicle { frames: 0 };

    let ticks = run(&mut world, &mut presenter, &mut FrameLimiter::unlimited(), 0.01);

    assert!(ticks >= 1);
    assert_eq!(world.vehicle_count(), 1);
}

#[test]
fn test_frame_limiter_period() {
    let limiter = FrameLimiter::new(165);
    let period = limiter.period().unwrap();
    assert!((period.as_secs_f64() - 1.0 / 165.0).abs() < 1e-9);

    assert!(FrameLimiter::unlimited().period().is_none());
}

#[test]
fn test_spawns_are_counted_per_side() {
    let mut world = SimWorld::new_with_seed(17);
    for _ in 0..20_000 {
        world.tick(1.0 / 165.0);
    }

    let per_side: u64 = Side::ALL
        .iter()
        .map(|&side| world.stats.spawned_from(side))
        .sum();
    assert_eq!(per_side, world.stats.vehicles_spawned);
    for side in Side::ALL {
        assert!(world.stats.spawned_from(side) > 0, "{:?}", side);
    }
}
