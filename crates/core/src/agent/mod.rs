//! Fire agents, their steering, and the embers they leave behind.

pub mod ember;
pub mod fire;
pub mod steering;

pub use ember::{Ember, EmberSet};
pub use fire::{FireAgent, FlameColor};
pub use steering::{BeachContact, Blend, Steering, Surroundings};

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a fire, as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moving and spreading.
    Active,
    /// Dead and fading.
    Ember,
    /// Fully faded; no longer tracked.
    Removed,
}
