//! Simulation configuration, loadable from TOML.
//!
//! ```toml
//! destination = { x = 790.0, y = 10.0 }
//!
//! [arena]
//! width = 800
//! height = 600
//! cell_size = 20
//!
//! [agent]
//! spawn = { x = 10.0, y = 10.0 }
//! speed = 2.0
//!
//! [[obstacles]]
//! x = 300.0
//! y = 200.0
//! speed = 1.5
//! direction = "left"
//! ```
use serde::Deserialize;
use std::path::Path;

use crate::arena::Arena;
use crate::error::Result;
use crate::geometry::{Rect, WorldPoint};
use crate::navigator::Agent;
use crate::obstacle::{Direction, Obstacle, ObstacleSet};

#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub arena: ArenaConfig,
    pub agent: AgentConfig,
    pub destination: WorldPoint,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
}

/// Arena size and grid resolution, in arena units.
#[derive(Clone, Debug, Deserialize)]
pub struct ArenaConfig {
    #[serde(default = "default_arena_width")]
    pub width: u32,
    #[serde(default = "default_arena_height")]
    pub height: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AgentConfig {
    pub spawn: WorldPoint,
    /// Distance travelled per tick (default: 2.0)
    #[serde(default = "default_agent_speed")]
    pub speed: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    /// Skip the search when connected components show the goal is unreachable (default: true)
    #[serde(default = "default_component_check")]
    pub component_check: bool,
}

/// One obstacle. Giving it a `speed` makes it oscillate horizontally.
#[derive(Clone, Debug, Deserialize)]
pub struct ObstacleConfig {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_obstacle_size")]
    pub width: f32,
    #[serde(default = "default_obstacle_size")]
    pub height: f32,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_arena_width() -> u32 {
    800
}
fn default_arena_height() -> u32 {
    600
}
fn default_cell_size() -> u32 {
    20
}
fn default_agent_speed() -> f32 {
    2.0
}
fn default_component_check() -> bool {
    true
}
fn default_obstacle_size() -> f32 {
    50.0
}
fn default_direction() -> Direction {
    Direction::Right
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: default_arena_width(),
            height: default_arena_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            component_check: default_component_check(),
        }
    }
}

impl ObstacleConfig {
    pub fn to_obstacle(&self) -> Obstacle {
        let rect = Rect::new(self.x, self.y, self.width, self.height);
        match self.speed {
            Some(speed) => Obstacle::moving(rect, speed, self.direction),
            None => Obstacle::fixed(rect),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<SimConfig> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SimConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn build_arena(&self) -> Result<Arena> {
        Arena::new(self.arena.width, self.arena.height, self.arena.cell_size)
    }

    pub fn build_obstacles(&self, arena: Arena) -> Result<ObstacleSet> {
        ObstacleSet::new(
            arena,
            self.obstacles.iter().map(ObstacleConfig::to_obstacle).collect(),
        )
    }

    pub fn build_agent(&self) -> Result<Agent> {
        Agent::new(self.agent.spawn, self.agent.speed)
    }

    /// Checks every value without starting a simulation.
    pub fn validate(&self) -> Result<()> {
        let arena = self.build_arena()?;
        self.build_obstacles(arena)?;
        self.build_agent()?;
        Ok(())
    }
}
