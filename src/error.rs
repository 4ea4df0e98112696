//! Configuration errors. Failing to find a path is not one of them: the planner reports that as an
//! empty path.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite, got ({x}, {y})")]
    NonFinite { name: &'static str, x: f32, y: f32 },

    #[error("a {columns}x{rows} grid has more cells than can be addressed")]
    GridTooLarge { columns: u64, rows: u64 },

    #[error("obstacle {index} does not lie inside the arena")]
    ObstacleOutOfBounds { index: usize },

    #[error("moving obstacle {index} is wider than the arena")]
    ObstacleTooWide { index: usize },

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects values that are zero, negative or not finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositive { name, value })
    }
}
