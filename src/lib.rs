//! # arena_pathfinding
//!
//! Grid-based re-planning for a single agent crossing a bounded 2-D arena filled with rectangular
//! obstacles, some of which slide back and forth horizontally. Each simulation tick the obstacles
//! move, an [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search over a 4-connected grid
//! overlay is run from the agent's current position against the obstacles' current positions, and
//! the agent steps towards the first waypoint of the fresh path at constant speed.
//!
//! The search uses the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as its
//! heuristic, which is consistent on a unit-cost 4-connected grid, so returned paths are shortest
//! in grid steps. Obstacle positions are treated as frozen for the duration of a search.
//! Optionally, [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of
//! the free cells are computed first to avoid flood-filling when no path exists.
pub mod arena;
pub mod astar;
pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod navigator;
pub mod obstacle;
pub mod planner;
pub mod simulation;

pub use arena::Arena;
pub use config::SimConfig;
pub use error::{Error, Result};
pub use geometry::{Rect, WorldPoint};
pub use navigator::Agent;
pub use obstacle::{CellCollider, Direction, Obstacle, ObstacleSet};
pub use planner::GridPlanner;
pub use simulation::Simulation;

/// A grid cell: `x` is the column, `y` the row.
pub type Cell = grid_util::point::Point;

/// Number of 4-connected unit steps between two cells when nothing is in the way.
pub fn manhattan_distance(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
