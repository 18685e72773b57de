//! Invariants of the propagation engine checked over whole runs.

mod common;

use common::{flat_terrain, lake_terrain, run_checked};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;
use sandfire_core::{EarlySpread, FireConfig, FireModel, GridPoint, HeightField, Vec2};

fn hill_model(seed: u64) -> FireModel<HeightField> {
    let terrain = HeightField::single_hill(101, 101, 5.0, 60.0, 25.0);
    let mut model = FireModel::seeded(terrain, seed);
    model.set_wind_speed(5.0);
    model.set_wind_direction(30.0);
    model.ignite(Vec2::new(50.0, 50.0), None);
    model.ignite(Vec2::new(40.0, 60.0), Some(200.0));
    model
}

#[test]
fn burned_cells_stay_burned() {
    let mut model = hill_model(1);
    let mut seen: FxHashSet<GridPoint> = FxHashSet::default();

    run_checked(&mut model, 80, |model| {
        let now: FxHashSet<GridPoint> = model.burned().burned_cells().collect();
        assert!(seen.is_subset(&now), "a burned cell was cleared");
        assert_eq!(model.burned_count(), now.len());
        seen = now;
    });
    assert!(!seen.is_empty());
}

#[test]
fn fuel_only_decreases_and_burned_cells_are_empty() {
    let mut model = hill_model(2);
    let mut previous = model.fuel().as_slice().to_vec();

    run_checked(&mut model, 80, |model| {
        let current = model.fuel().as_slice();
        for (now, before) in current.iter().zip(&previous) {
            assert!(now <= before);
        }
        for cell in model.burned().burned_cells() {
            assert_eq!(model.fuel().get(cell), Some(0));
        }
        previous = current.to_vec();
    });
}

#[test]
fn percent_burned_is_clamped() {
    let config = FireConfig {
        early_spread: Some(EarlySpread {
            ticks: 40,
            percent: 100,
        }),
        ..FireConfig::default()
    };
    let mut model = FireModel::with_config(
        HeightField::flat(31, 31, 5.0),
        ChaCha8Rng::seed_from_u64(3),
        config,
    )
    .expect("valid config");
    model.ignite(Vec2::new(15.0, 15.0), None);

    run_checked(&mut model, 60, |model| {
        let pct = model.percent_burned();
        assert!((0.0..=100.0).contains(&pct), "percent out of range: {pct}");
    });
}

#[test]
fn water_ignition_never_adds_agents() {
    let mut model = FireModel::seeded(lake_terrain(), 4);
    model.ignite(Vec2::new(50.0, 60.0), Some(90.0));

    run_checked(&mut model, 20, |_| {});
    for y in [0.0, 10.0, 25.0, 40.0] {
        let before = model.agent_count();
        assert!(!model.ignite(Vec2::new(50.0, y), None));
        assert_eq!(model.agent_count(), before);
    }
}

#[test]
fn headings_stay_normalised() {
    let mut model = hill_model(5);
    run_checked(&mut model, 80, |model| {
        for agent in model.agents() {
            assert!((0.0..360.0).contains(&agent.angle()), "angle {}", agent.angle());
        }
    });
}

#[test]
fn branches_are_perpendicular_to_parent() {
    let config = FireConfig {
        early_spread: Some(EarlySpread {
            ticks: 1,
            percent: 100,
        }),
        ..FireConfig::default()
    };
    let mut model =
        FireModel::with_config(flat_terrain(), ChaCha8Rng::seed_from_u64(6), config).expect("valid config");
    let parents = [
        (Vec2::new(40.0, 40.0), 0.0),
        (Vec2::new(50.0, 60.0), 100.0),
        (Vec2::new(60.0, 45.0), 300.0),
    ];
    for (position, angle) in parents {
        assert!(model.ignite(position, Some(angle)));
    }

    model.tick();

    // Survivors first, then one pair of branches per parent in parent order
    assert_eq!(model.agent_count(), parents.len() * 3);
    let branches = &model.agents()[parents.len()..];
    for ((position, angle), pair) in parents.iter().zip(branches.chunks(2)) {
        assert_eq!(pair[0].position(), *position);
        assert_eq!(pair[1].position(), *position);
        assert_eq!(pair[0].angle(), (angle + 90.0) % 360.0);
        assert_eq!(pair[1].angle(), (angle + 270.0) % 360.0);
        assert_eq!(pair[0].velocity(), Vec2::zeros(), "branches are not stepped on their first tick");
    }
}

#[test]
fn stopped_agents_fade_out() {
    let mut model = FireModel::seeded(flat_terrain(), 7);
    // Inside the region but outside the safety rectangle
    assert!(model.ignite(Vec2::new(10.0, 10.0), Some(45.0)));

    model.tick();
    let agent = &model.agents()[0];
    assert!(!agent.is_alive());
    assert!(agent.steering().at_border());
    assert_eq!(agent.velocity(), Vec2::zeros());

    let intensity = i32::from(model.config().ember_intensity);
    let mut ticks = 1;
    while model.is_running() {
        model.tick();
        ticks += 1;
        for ember in model.embers() {
            assert!(!ember.is_alive());
            assert!((1..intensity).contains(&ember.intensity()));
        }
        assert!(ticks < 20, "simulation never went idle");
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = hill_model(8);
    let mut b = hill_model(8);
    for _ in 0..50 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.fuel(), b.fuel());
}
