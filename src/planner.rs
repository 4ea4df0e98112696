use log::{info, warn};

use crate::arena::Arena;
use crate::astar::astar;
use crate::components::FreeComponents;
use crate::geometry::WorldPoint;
use crate::obstacle::CellCollider;
use crate::{manhattan_distance, Cell};

/// Plans shortest 4-connected grid paths between arbitrary arena points.
///
/// Every call to [search](Self::search) starts from scratch against whatever the obstacles look
/// like at that moment; nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct GridPlanner {
    arena: Arena,
    /// Checks that the goal lies in a component the start can enter before searching.
    pub component_check: bool,
}

impl GridPlanner {
    pub fn new(arena: Arena) -> GridPlanner {
        GridPlanner {
            arena,
            component_check: true,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Cells the search may step onto: inside the grid and not blocked.
    fn passable<C: CellCollider + ?Sized>(&self, cell: Cell, obstacles: &C) -> bool {
        self.arena.in_bounds(cell) && !obstacles.collides_with_cell(cell)
    }

    /// Free neighbours in the order of `Point::neumann_neighborhood_smallvec`, which settles ties
    /// between equally short paths.
    fn successors<C: CellCollider + ?Sized>(&self, cell: &Cell, obstacles: &C) -> Vec<(Cell, i32)> {
        cell.neumann_neighborhood_smallvec()
            .into_iter()
            .filter(|n| self.passable(*n, obstacles))
            .map(|n| (n, 1))
            .collect()
    }

    /// The cells of a shortest path from the cell of `start` to the cell of `goal`, both included,
    /// or [None] if the goal cannot be reached. The start cell is expanded even when it is blocked
    /// or outside the grid.
    pub fn search_cells<C: CellCollider + ?Sized>(
        &self,
        start: Cell,
        goal: Cell,
        obstacles: &C,
    ) -> Option<Vec<Cell>> {
        if self.component_check
            && start != goal
            && !FreeComponents::build(&self.arena, obstacles).reachable(start, goal)
        {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        let result = astar(
            &start,
            |cell| self.successors(cell, obstacles),
            |cell| manhattan_distance(*cell, goal),
            |cell| *cell == goal,
        );
        if result.is_none() && self.component_check {
            warn!(
                "Reachable goal {} could not be pathed to from {}, are the components correct?",
                goal, start
            );
        }
        result.map(|(cells, _cost)| cells)
    }

    /// Waypoints of a shortest path from `start` to `goal`: the centers of every cell after the
    /// start cell, ending with the center of the goal cell. Empty when start and goal share a cell
    /// or when no path exists, in which case the agent should hold position.
    pub fn search<C: CellCollider + ?Sized>(
        &self,
        start: WorldPoint,
        goal: WorldPoint,
        obstacles: &C,
    ) -> Vec<WorldPoint> {
        let start_cell = self.arena.to_cell(start);
        let goal_cell = self.arena.to_cell(goal);
        match self.search_cells(start_cell, goal_cell, obstacles) {
            Some(cells) => cells
                .into_iter()
                .skip(1)
                .map(|cell| self.arena.to_center(cell))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Euclidean length of a polyline through the waypoints.
pub fn path_length(path: &[WorldPoint]) -> f32 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
