//! Rectangular obstacles, optionally sliding back and forth between the left and right arena
//! edges, and the collision query the planner depends on.
use log::debug;
use serde::Deserialize;

use crate::arena::Arena;
use crate::error::{ensure_positive, Error, Result};
use crate::geometry::Rect;
use crate::Cell;

/// The only thing the planner needs to know about obstacles: whether a grid cell is blocked.
/// Implement this for a spatial index or a rasterized map to swap out the linear scan of
/// [ObstacleSet].
pub trait CellCollider {
    fn collides_with_cell(&self, cell: Cell) -> bool;
}

/// Horizontal direction of travel of a moving obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub speed: f32,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub motion: Option<Motion>,
}

impl Obstacle {
    pub fn fixed(rect: Rect) -> Obstacle {
        Obstacle { rect, motion: None }
    }
    pub fn moving(rect: Rect, speed: f32, direction: Direction) -> Obstacle {
        Obstacle {
            rect,
            motion: Some(Motion { speed, direction }),
        }
    }
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Displaces the rectangle and reflects it off the left and right edges. The edge test happens
    /// after the displacement, so an obstacle touching an edge turns around on this same call and
    /// any overshoot is mirrored back inside.
    fn advance(&mut self, arena_width: f32, delta: f32) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        let limit = arena_width - self.rect.width;
        self.rect.x += motion.speed * motion.direction.sign() * delta;
        if self.rect.x >= limit {
            motion.direction = Direction::Left;
            self.rect.x = (2.0 * limit - self.rect.x).max(0.0);
        } else if self.rect.x <= 0.0 {
            motion.direction = Direction::Right;
            self.rect.x = (-self.rect.x).min(limit);
        }
    }
}

/// The obstacles of one arena. Only the simulation driver mutates it, through
/// [update](Self::update); the planner reads it through [CellCollider].
#[derive(Clone, Debug)]
pub struct ObstacleSet {
    arena: Arena,
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    /// Validates every obstacle against the arena. Obstacles must have a positive size and lie
    /// fully inside the arena; moving obstacles need a positive speed and room to move.
    pub fn new(arena: Arena, obstacles: Vec<Obstacle>) -> Result<ObstacleSet> {
        let bounds = arena.bounds();
        for (index, obstacle) in obstacles.iter().enumerate() {
            ensure_positive("obstacle width", obstacle.rect.width as f64)?;
            ensure_positive("obstacle height", obstacle.rect.height as f64)?;
            if !bounds.contains_rect(&obstacle.rect) {
                return Err(Error::ObstacleOutOfBounds { index });
            }
            if let Some(motion) = obstacle.motion {
                ensure_positive("obstacle speed", motion.speed as f64)?;
                if obstacle.rect.width >= bounds.width {
                    return Err(Error::ObstacleTooWide { index });
                }
            }
        }
        Ok(ObstacleSet { arena, obstacles })
    }

    pub fn empty(arena: Arena) -> ObstacleSet {
        ObstacleSet {
            arena,
            obstacles: Vec::new(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
    /// Current rectangles, in construction order.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(|o| o.rect)
    }

    /// Moves every moving obstacle by `speed * direction * delta`, each independently.
    pub fn update(&mut self, delta: f32) {
        let arena_width = self.arena.width() as f32;
        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            let before = obstacle.motion.map(|m| m.direction);
            obstacle.advance(arena_width, delta);
            let after = obstacle.motion.map(|m| m.direction);
            if before != after {
                debug!("Obstacle {} reflected at x = {}", index, obstacle.rect.x);
            }
        }
    }

    /// True if the square of `cell` overlaps any obstacle with non-zero area.
    pub fn intersects(&self, cell: Cell) -> bool {
        let cell_rect = self.arena.cell_rect(cell);
        self.obstacles.iter().any(|o| o.rect.overlaps(&cell_rect))
    }
}

impl CellCollider for ObstacleSet {
    fn collides_with_cell(&self, cell: Cell) -> bool {
        self.intersects(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(800, 600, 20).unwrap()
    }

    #[test]
    fn rejects_obstacles_outside_the_arena() {
        let err = ObstacleSet::new(
            arena(),
            vec![
                Obstacle::fixed(Rect::new(0.0, 0.0, 50.0, 50.0)),
                Obstacle::fixed(Rect::new(780.0, 0.0, 50.0, 50.0)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ObstacleOutOfBounds { index: 1 }));
    }

    #[test]
    fn rejects_degenerate_obstacles() {
        let zero = ObstacleSet::new(arena(), vec![Obstacle::fixed(Rect::new(0.0, 0.0, 0.0, 5.0))]);
        assert!(zero.is_err());
        let stalled = ObstacleSet::new(
            arena(),
            vec![Obstacle::moving(Rect::new(0.0, 0.0, 5.0, 5.0), 0.0, Direction::Left)],
        );
        assert!(stalled.is_err());
        let too_wide = ObstacleSet::new(
            arena(),
            vec![Obstacle::moving(Rect::new(0.0, 0.0, 800.0, 5.0), 1.0, Direction::Left)],
        )
        .unwrap_err();
        assert!(matches!(too_wide, Error::ObstacleTooWide { index: 0 }));
    }

    #[test]
    fn moving_obstacle_is_displaced() {
        let mut set = ObstacleSet::new(
            arena(),
            vec![Obstacle::moving(Rect::new(100.0, 0.0, 50.0, 50.0), 3.0, Direction::Right)],
        )
        .unwrap();
        set.update(2.0);
        assert_eq!(set.rects().next().unwrap().x, 106.0);
    }

    #[test]
    fn fixed_obstacles_never_move() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let mut set = ObstacleSet::new(arena(), vec![Obstacle::fixed(rect)]).unwrap();
        for _ in 0..100 {
            set.update(1.0);
        }
        assert_eq!(set.rects().next().unwrap(), rect);
    }

    #[test]
    fn flush_right_reflects_on_first_update() {
        let mut set = ObstacleSet::new(
            arena(),
            vec![Obstacle::moving(Rect::new(750.0, 0.0, 50.0, 50.0), 1.0, Direction::Right)],
        )
        .unwrap();
        set.update(1.0);
        let obstacle = set.iter().next().unwrap();
        assert_eq!(obstacle.motion.unwrap().direction, Direction::Left);
        assert!(obstacle.rect.x <= 750.0);
        assert!(obstacle.rect.right() <= 800.0);
    }

    #[test]
    fn overshoot_is_mirrored_back_inside() {
        let mut set = ObstacleSet::new(
            arena(),
            vec![
                Obstacle::moving(Rect::new(745.0, 0.0, 50.0, 50.0), 10.0, Direction::Right),
                Obstacle::moving(Rect::new(4.0, 100.0, 50.0, 50.0), 10.0, Direction::Left),
            ],
        )
        .unwrap();
        set.update(1.0);
        let obstacles: Vec<&Obstacle> = set.iter().collect();
        assert_eq!(obstacles[0].rect.x, 745.0);
        assert_eq!(obstacles[0].motion.unwrap().direction, Direction::Left);
        assert_eq!(obstacles[1].rect.x, 6.0);
        assert_eq!(obstacles[1].motion.unwrap().direction, Direction::Right);
    }

    #[test]
    fn oscillation_stays_inside_the_arena() {
        let mut set = ObstacleSet::new(
            arena(),
            vec![
                Obstacle::moving(Rect::new(10.0, 0.0, 120.0, 40.0), 7.5, Direction::Left),
                Obstacle::moving(Rect::new(400.0, 200.0, 50.0, 40.0), 333.0, Direction::Right),
            ],
        )
        .unwrap();
        for _ in 0..1000 {
            set.update(1.0);
            for rect in set.rects() {
                assert!(rect.x >= 0.0 && rect.right() <= 800.0, "{:?}", rect);
            }
        }
    }

    #[test]
    fn edge_touching_cell_is_free() {
        let set = ObstacleSet::new(
            arena(),
            vec![Obstacle::fixed(Rect::new(40.0, 40.0, 20.0, 20.0))],
        )
        .unwrap();
        assert!(set.collides_with_cell(Cell::new(2, 2)));
        assert!(!set.collides_with_cell(Cell::new(1, 2)));
        assert!(!set.collides_with_cell(Cell::new(3, 2)));
        assert!(!set.collides_with_cell(Cell::new(2, 3)));
    }

    #[test]
    fn partial_overlap_blocks_every_touched_cell() {
        let set = ObstacleSet::new(
            arena(),
            vec![Obstacle::fixed(Rect::new(15.0, 15.0, 10.0, 10.0))],
        )
        .unwrap();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(set.intersects(Cell::new(x, y)));
        }
        assert!(!set.intersects(Cell::new(2, 1)));
    }

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::Left.sign(), -1.0);
        assert_eq!(Direction::Right.sign(), 1.0);
    }
}
