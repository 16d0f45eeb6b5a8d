use serde::{Deserialize, Serialize};

use crate::block::Position;

pub const GRID_SIZE_DEFAULT: f64 = 6.0;
pub const GRID_SIZE_MAX: f64 = 512.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapOptions {
    pub enabled: bool,
    pub grid_size: f64,
}

impl SnapOptions {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            grid_size: GRID_SIZE_DEFAULT,
        }
    }

    pub fn apply(&self, position: Position) -> Position {
        if !self.enabled {
            return position;
        }
        snap_position(position, self.grid_size)
    }
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_size: GRID_SIZE_DEFAULT,
        }
    }
}

/// Rounds each axis to the nearest multiple of `grid_size`. Non-positive or
/// non-finite pitches pass the position through.
pub fn snap_position(position: Position, grid_size: f64) -> Position {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return position;
    }
    Position {
        x: snap_axis(position.x, grid_size),
        y: snap_axis(position.y, grid_size),
    }
}

fn snap_axis(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}
