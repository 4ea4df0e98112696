use core::fmt;
use log::{debug, info, warn};

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::geometry::{Rect, WorldPoint};
use crate::navigator::Agent;
use crate::obstacle::ObstacleSet;
use crate::planner::{path_length, GridPlanner};
use crate::Cell;

/// Outcome of [Simulation::run].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub arrived: bool,
    /// Ticks on which the planner found no path and the agent held position.
    pub stalled_ticks: u64,
}

/// Drives one agent through an arena, one tick at a time: move the obstacles, re-plan from the
/// agent's current position, hand the new path to the agent and advance it.
#[derive(Clone, Debug)]
pub struct Simulation {
    arena: Arena,
    obstacles: ObstacleSet,
    planner: GridPlanner,
    agent: Agent,
    spawn: WorldPoint,
    destination: WorldPoint,
    tick: u64,
    stalled_ticks: u64,
}

impl Simulation {
    /// Fails if the destination has a non-finite coordinate. A finite destination outside the
    /// arena is accepted; the agent then never finds a path and holds position.
    pub fn new(
        obstacles: ObstacleSet,
        agent: Agent,
        destination: WorldPoint,
    ) -> Result<Simulation> {
        if !(destination.x.is_finite() && destination.y.is_finite()) {
            return Err(Error::NonFinite {
                name: "destination",
                x: destination.x,
                y: destination.y,
            });
        }
        let arena = *obstacles.arena();
        Ok(Simulation {
            arena,
            obstacles,
            planner: GridPlanner::new(arena),
            spawn: agent.position(),
            agent,
            destination,
            tick: 0,
            stalled_ticks: 0,
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<Simulation> {
        let arena = config.build_arena()?;
        let obstacles = config.build_obstacles(arena)?;
        let agent = config.build_agent()?;
        let mut simulation = Simulation::new(obstacles, agent, config.destination)?;
        simulation.planner.component_check = config.planner.component_check;
        info!(
            "Simulation on a {}x{} grid with {} obstacles ({} moving), from {} to {}",
            arena.grid_width(),
            arena.grid_height(),
            simulation.obstacles.len(),
            simulation.obstacles.iter().filter(|o| o.is_moving()).count(),
            simulation.spawn,
            simulation.destination
        );
        Ok(simulation)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }
    pub fn planner_mut(&mut self) -> &mut GridPlanner {
        &mut self.planner
    }
    pub fn agent(&self) -> &Agent {
        &self.agent
    }
    pub fn spawn(&self) -> WorldPoint {
        self.spawn
    }
    pub fn destination(&self) -> WorldPoint {
        self.destination
    }
    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }
    /// Current obstacle rectangles, for rendering.
    pub fn obstacle_rects(&self) -> Vec<Rect> {
        self.obstacles.rects().collect()
    }

    /// True once the agent is in the destination's cell.
    pub fn arrived(&self) -> bool {
        self.arena.to_cell(self.agent.position()) == self.arena.to_cell(self.destination)
    }

    /// One simulation step of length `delta` (1.0 is one tick). Non-positive or non-finite
    /// steps are ignored.
    pub fn tick(&mut self, delta: f32) {
        if !(delta.is_finite() && delta > 0.0) {
            warn!("Ignoring tick with step {}", delta);
            return;
        }
        self.obstacles.update(delta);
        let path = self
            .planner
            .search(self.agent.position(), self.destination, &self.obstacles);
        if path.is_empty() && !self.arrived() {
            self.stalled_ticks += 1;
            debug!("Tick {}: no path, holding at {}", self.tick, self.agent.position());
        }
        let planned = path
            .first()
            .map_or(0.0, |first| self.agent.position().distance(first))
            + path_length(&path);
        self.agent.set_path(path);
        self.agent.advance(delta);
        self.tick += 1;
        debug!(
            "Tick {}: agent at {}, heading {:.1} deg, {} waypoints left, planned {:.1} units",
            self.tick,
            self.agent.position(),
            self.agent.heading_degrees(),
            self.agent.path().len(),
            planned
        );
    }

    /// Ticks with unit step until the agent arrives or `max_ticks` ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> RunSummary {
        let start_tick = self.tick;
        let start_stalled = self.stalled_ticks;
        while !self.arrived() && self.tick - start_tick < max_ticks {
            self.tick(1.0);
        }
        let arrived = self.arrived();
        if arrived {
            info!("Arrived at {} after {} ticks", self.destination, self.tick);
        } else {
            info!("Gave up after {} ticks at {}", self.tick, self.agent.position());
        }
        RunSummary {
            ticks: self.tick - start_tick,
            arrived,
            stalled_ticks: self.stalled_ticks - start_stalled,
        }
    }
}

/// Renders the grid: `#` obstacle, `*` waypoint, `A` agent, `G` destination, `.` free.
impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let agent = self.arena.to_cell(self.agent.position());
        let goal = self.arena.to_cell(self.destination);
        let waypoints: Vec<_> = self
            .agent
            .path()
            .iter()
            .map(|p| self.arena.to_cell(*p))
            .collect();
        for y in 0..self.arena.grid_height() {
            let row: String = (0..self.arena.grid_width())
                .map(|x| {
                    let cell = Cell::new(x, y);
                    if cell == agent {
                        'A'
                    } else if cell == goal {
                        'G'
                    } else if self.obstacles.intersects(cell) {
                        '#'
                    } else if waypoints.contains(&cell) {
                        '*'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
