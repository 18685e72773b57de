//! Fading remnants of fire agents.
//!
//! Every tick each live agent leaves a frozen copy of itself behind. Embers
//! never move and never rejoin the active set; they only lose one unit of
//! intensity per tick and disappear once it reaches zero.

use super::fire::FlameColor;
use super::Phase;
use crate::core_types::Vec2;

/// Frozen copy of an agent, used only for visual decay.
#[derive(Debug, Clone, PartialEq)]
pub struct Ember {
    position: Vec2,
    angle: f32,
    intensity: i32,
    alive: bool,
}

impl Ember {
    pub(crate) fn new(position: Vec2, angle: f32, intensity: i32, alive: bool) -> Self {
        Self {
            position,
            angle,
            intensity,
            alive,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn intensity(&self) -> i32 {
        self.intensity
    }

    /// Whether the agent was still alive when this copy was taken.
    /// Cleared on the first decay step.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn color(&self) -> FlameColor {
        FlameColor::from_intensity(self.intensity)
    }

    pub fn phase(&self) -> Phase {
        if self.intensity > 0 {
            Phase::Ember
        } else {
            Phase::Removed
        }
    }

    /// Kill if still alive, then fade one step.
    pub fn decay(&mut self) {
        self.alive = false;
        self.intensity -= 1;
    }
}

/// All embers, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmberSet {
    embers: Vec<Ember>,
}

impl EmberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ember: Ember) {
        self.embers.push(ember);
    }

    /// Fade every ember one step and drop the ones that burned out.
    ///
    /// Returns the number removed.
    pub fn decay(&mut self) -> usize {
        let before = self.embers.len();
        self.embers.retain_mut(|ember| {
            ember.decay();
            ember.phase() != Phase::Removed
        });
        before - self.embers.len()
    }

    pub fn len(&self) -> usize {
        self.embers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embers.is_empty()
    }

    pub fn clear(&mut self) {
        self.embers.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ember> {
        self.embers.iter()
    }
}

impl<'a> IntoIterator for &'a EmberSet {
    type Item = &'a Ember;
    type IntoIter = std::slice::Iter<'a, Ember>;

    fn into_iter(self) -> Self::IntoIter {
        self.embers.iter()
    }
}
