//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use sandfire_core::{FireModel, HeightField, Region};
use tracing_subscriber::EnvFilter;

/// Route engine logs through the test harness (`RUST_LOG=sandfire_core=debug`).
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shore runs along y = 40: rows 0..=40 lie under water, the rest is dry and level.
pub fn lake_terrain() -> HeightField {
    HeightField::flat(101, 101, 2.0).with_basin(Region::new(0, 0, 100, 40), -5.0)
}

/// Level dry surface.
pub fn flat_terrain() -> HeightField {
    HeightField::flat(101, 101, 5.0)
}

/// Steep south-facing slope (falls 0.5 per row), risky everywhere inside.
pub fn south_slope() -> HeightField {
    HeightField::plane(101, 101, 100.0, 0.0, -0.5)
}

/// Run `ticks` ticks, handing the model to `check` after each one.
pub fn run_checked<F>(model: &mut FireModel<HeightField>, ticks: usize, mut check: F)
where
    F: FnMut(&FireModel<HeightField>),
{
    for _ in 0..ticks {
        model.tick();
        check(model);
    }
}
