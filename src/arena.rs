use crate::error::{ensure_positive, Error, Result};
use crate::geometry::{Rect, WorldPoint};
use crate::Cell;

/// The bounded arena and its uniform grid overlay. The last row and column may be partial when the
/// arena size is not a multiple of the cell size; they are still indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arena {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Arena {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Arena> {
        ensure_positive("arena width", width as f64)?;
        ensure_positive("arena height", height as f64)?;
        ensure_positive("cell size", cell_size as f64)?;
        let columns = u64::from(width.div_ceil(cell_size));
        let rows = u64::from(height.div_ceil(cell_size));
        // Cells are addressed with i32 coordinates.
        if columns * rows > i32::MAX as u64 {
            return Err(Error::GridTooLarge { columns, rows });
        }
        Ok(Arena {
            width,
            height,
            cell_size,
        })
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
    /// Number of columns, `ceil(width / cell_size)`.
    pub fn grid_width(&self) -> i32 {
        self.width.div_ceil(self.cell_size) as i32
    }
    /// Number of rows, `ceil(height / cell_size)`.
    pub fn grid_height(&self) -> i32 {
        self.height.div_ceil(self.cell_size) as i32
    }
    pub fn cell_count(&self) -> usize {
        self.grid_width() as usize * self.grid_height() as usize
    }
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// The cell containing `point`. Points left of or above the origin map to negative indices,
    /// which [in_bounds](Self::in_bounds) rejects.
    pub fn to_cell(&self, point: WorldPoint) -> Cell {
        let s = self.cell_size as f32;
        Cell::new((point.x / s).floor() as i32, (point.y / s).floor() as i32)
    }

    /// The center of `cell` in arena coordinates. All waypoints are cell centers.
    pub fn to_center(&self, cell: Cell) -> WorldPoint {
        let s = self.cell_size as f32;
        WorldPoint::new(cell.x as f32 * s + s / 2.0, cell.y as f32 * s + s / 2.0)
    }

    /// The square covered by `cell`. Cells in the partial last row or column extend past the arena.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let s = self.cell_size as f32;
        Rect::new(cell.x as f32 * s, cell.y as f32 * s, s, s)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.grid_width() && cell.y < self.grid_height()
    }

}
