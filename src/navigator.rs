use std::collections::VecDeque;

use crate::error::{ensure_positive, Result};
use crate::geometry::WorldPoint;

/// The moving agent: a point travelling at constant speed through a queue of waypoints.
#[derive(Clone, Debug)]
pub struct Agent {
    position: WorldPoint,
    heading: f32,
    speed: f32,
    path: VecDeque<WorldPoint>,
}

impl Agent {
    pub fn new(position: WorldPoint, speed: f32) -> Result<Agent> {
        ensure_positive("agent speed", speed as f64)?;
        Ok(Agent {
            position,
            heading: 0.0,
            speed,
            path: VecDeque::new(),
        })
    }

    pub fn position(&self) -> WorldPoint {
        self.position
    }
    /// Direction of the last step in radians, counter-clockwise from the positive x axis with the
    /// vertical axis pointing up.
    pub fn heading(&self) -> f32 {
        self.heading
    }
    pub fn heading_degrees(&self) -> f32 {
        self.heading.to_degrees()
    }
    pub fn speed(&self) -> f32 {
        self.speed
    }
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        ensure_positive("agent speed", speed as f64)?;
        self.speed = speed;
        Ok(())
    }

    /// Remaining waypoints, head first.
    pub fn path(&self) -> &VecDeque<WorldPoint> {
        &self.path
    }
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Replaces the waypoint queue. Progress along the previous path is discarded.
    pub fn set_path(&mut self, path: Vec<WorldPoint>) {
        self.path = path.into();
    }

    /// Moves `speed * delta` towards the head waypoint. If that would reach or pass the waypoint,
    /// the agent lands exactly on it and the waypoint is consumed instead. Does nothing without a
    /// path.
    pub fn advance(&mut self, delta: f32) {
        let Some(&target) = self.path.front() else {
            return;
        };
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let distance = dx.hypot(dy);
        let step = self.speed * delta;
        if distance > 0.0 {
            self.heading = (-dy).atan2(dx);
        }
        if distance <= step {
            self.position = target;
            self.path.pop_front();
        } else {
            self.position.x += dx / distance * step;
            self.position.y += dy / distance * step;
        }
    }
}
