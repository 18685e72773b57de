//! Render-facing views of the engine state.

use crate::agent::{Ember, FireAgent, FlameColor, Phase};
use crate::core_types::{GridPoint, Vec2, Wind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One agent or ember as drawn on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub position: Vec2,
    /// Heading in degrees
    pub angle: f32,
    pub intensity: i32,
    pub color: FlameColor,
    pub alive: bool,
    pub phase: Phase,
}

impl From<&FireAgent> for AgentView {
    fn from(agent: &FireAgent) -> Self {
        Self {
            position: agent.position(),
            angle: agent.angle(),
            intensity: agent.intensity(),
            color: agent.color(),
            alive: agent.is_alive(),
            phase: Phase::Active,
        }
    }
}

impl From<&Ember> for AgentView {
    fn from(ember: &Ember) -> Self {
        Self {
            position: ember.position(),
            angle: ember.angle(),
            intensity: ember.intensity(),
            color: ember.color(),
            alive: ember.is_alive(),
            phase: ember.phase(),
        }
    }
}

/// Complete frame for a renderer or a JSON dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub timestep: u64,
    pub running: bool,
    pub percent_burned: f32,
    pub burned_cells: usize,
    pub wind: Wind,
    pub agents: Vec<AgentView>,
    pub embers: Vec<AgentView>,
    /// Empty until risk zones are computed
    pub risk_zones: Vec<GridPoint>,
}

/// Summary counters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnStats {
    pub timestep: u64,
    pub active_agents: usize,
    pub embers: usize,
    pub burned_cells: usize,
    pub percent_burned: f32,
}

impl fmt::Display for BurnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Burned area: {:.1} %", self.percent_burned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_label() {
        let stats = BurnStats {
            timestep: 12,
            active_agents: 4,
            embers: 9,
            burned_cells: 30,
            percent_burned: 12.345,
        };
        assert_eq!(stats.to_string(), "Burned area: 12.3 %");
    }

    #[test]
    fn agent_view_copies_state() {
        let agent = FireAgent::new(Vec2::new(2.0, 3.0), 45.0, 3);
        let view = AgentView::from(&agent);
        assert_eq!(view.phase, Phase::Active);
        assert_eq!(view.color, FlameColor { r: 252, g: 63, b: 0 });

        let ember_view = AgentView::from(&agent.to_ember());
        assert_eq!(ember_view.phase, Phase::Ember);
        assert_eq!(ember_view.position, view.position);
    }

    #[test]
    fn snapshot_serialises_to_json() {
        let snapshot = FrameSnapshot {
            timestep: 1,
            running: true,
            percent_burned: 0.5,
            burned_cells: 1,
            wind: Wind::new(3.0, 90.0),
            agents: vec![AgentView::from(&FireAgent::new(Vec2::new(1.0, 1.0), 0.0, 3))],
            embers: Vec::new(),
            risk_zones: vec![GridPoint::new(4, 5)],
        };
        let json = serde_json::to_value(&snapshot).expect("snapshot serialises");
        assert_eq!(json["agents"][0]["phase"], "Active");
        assert_eq!(json["risk_zones"][0]["x"], 4);
        assert_eq!(json["wind"]["direction"], 90.0);
    }
}
