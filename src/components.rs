//! Connected components of the free cells of one obstacle snapshot. Lets the planner answer "no
//! path" without flood-filling the whole grid from the start.
use grid_util::grid::{BoolGrid, ValueGrid};
use log::info;
use petgraph::unionfind::UnionFind;

use crate::arena::Arena;
use crate::obstacle::CellCollider;
use crate::Cell;

/// 4-connected components of the free cells of an arena, built from a single obstacle snapshot.
/// Must be rebuilt whenever the obstacles move.
pub struct FreeComponents {
    /// `true` marks a blocked cell.
    grid: BoolGrid,
    components: UnionFind<usize>,
}

impl FreeComponents {
    pub fn build<C: CellCollider + ?Sized>(arena: &Arena, obstacles: &C) -> FreeComponents {
        let (w, h) = (arena.grid_width(), arena.grid_height());
        let mut grid = BoolGrid::new(w as usize, h as usize, false);
        for y in 0..h {
            for x in 0..w {
                let cell = Cell::new(x, y);
                if obstacles.collides_with_cell(cell) {
                    grid.set_point(cell, true);
                }
            }
        }
        let mut components = UnionFind::new(arena.cell_count());
        for y in 0..h {
            for x in 0..w {
                let cell = Cell::new(x, y);
                if grid.get_point(cell) {
                    continue;
                }
                let ix = grid.get_ix_point(&cell);
                for n in [Cell::new(x + 1, y), Cell::new(x, y + 1)] {
                    if grid.point_in_bounds(n) && !grid.get_point(n) {
                        components.union(ix, grid.get_ix_point(&n));
                    }
                }
            }
        }
        FreeComponents { grid, components }
    }

    /// True if `cell` is inside the grid and not blocked.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.grid.point_in_bounds(cell) && !self.grid.get_point(cell)
    }

    /// Checks whether a 4-connected path of free cells can lead from `start` to `goal`. A start
    /// cell that is blocked or outside the grid is still left through its free neighbours, which is
    /// how the search treats it as well.
    pub fn reachable(&self, start: Cell, goal: Cell) -> bool {
        if start == goal {
            return true;
        }
        if !self.is_free(goal) {
            info!("Goal {} is blocked or outside the arena", goal);
            return false;
        }
        let goal_ix = self.grid.get_ix_point(&goal);
        let connected = |cell: Cell| {
            self.is_free(cell)
                && self
                    .components
                    .equiv(self.grid.get_ix_point(&cell), goal_ix)
        };
        if self.is_free(start) {
            connected(start)
        } else {
            start
                .neumann_neighborhood_smallvec()
                .into_iter()
                .any(connected)
        }
    }
}
