//! Generation parameters and their up-front validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest run of wall cells removed when carving one entrance.
pub const MIN_CARVE_LENGTH: usize = 2;
/// Smallest room side that still encloses an interior.
pub const MIN_ROOM_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    /// Passage kept clear between the outer wall and the room grid, per side.
    pub min_border: usize,
    pub max_border: usize,
    pub min_spacing: usize,
    pub room_chance: f64,
    pub corridor_chance: f64,
    /// Open cells between a corridor's two walls.
    pub corridor_width: usize,
    pub max_carve_wait: usize,
    pub max_carve_length: usize,
    pub max_entrances: usize,
    pub min_pools: usize,
    pub max_pools: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 28,
            min_room_size: 6,
            max_room_size: 9,
            min_border: 4,
            max_border: 7,
            min_spacing: 2,
            room_chance: 0.75,
            corridor_chance: 0.5,
            corridor_width: 2,
            max_carve_wait: 6,
            max_carve_length: 4,
            max_entrances: 2,
            min_pools: 0,
            max_pools: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    #[error("{field} bounds are inverted: min {min} > max {max}")]
    InvertedBounds { field: &'static str, min: usize, max: usize },
    #[error("minimum room size {size} cannot enclose an interior")]
    RoomTooSmall { size: usize },
    #[error("room size {room} does not fit the {axis} span ({available} cells available)")]
    RoomTooLarge { axis: Axis, room: usize, available: usize },
    #[error("{field} must lie in [0, 1] (got {value})")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    #[error("carve length must allow at least 2 cells (max is {max})")]
    CarveLengthTooShort { max: usize },
    #[error("at least one entrance per loop is required")]
    NoEntrances,
    #[error("corridor width {width} does not fit rooms of size {min_room}")]
    CorridorTooWide { width: usize, min_room: usize },
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension { width: self.width, height: self.height });
        }
        check_bounds("room_size", self.min_room_size, self.max_room_size)?;
        check_bounds("border", self.min_border, self.max_border)?;
        check_bounds("pools", self.min_pools, self.max_pools)?;
        if self.min_room_size < MIN_ROOM_SIZE {
            return Err(ConfigError::RoomTooSmall { size: self.min_room_size });
        }
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let available = self.interior_span(axis, self.max_border).unwrap_or(0);
            let needed = self.min_room_size + 2 * self.min_spacing;
            if available < needed {
                return Err(ConfigError::RoomTooLarge {
                    axis,
                    room: self.min_room_size,
                    available: available.saturating_sub(2 * self.min_spacing),
                });
            }
        }
        check_probability("room_chance", self.room_chance)?;
        check_probability("corridor_chance", self.corridor_chance)?;
        if self.max_carve_length < MIN_CARVE_LENGTH {
            return Err(ConfigError::CarveLengthTooShort { max: self.max_carve_length });
        }
        if self.max_entrances == 0 {
            return Err(ConfigError::NoEntrances);
        }
        if self.corridor_width == 0 || self.corridor_width + 2 > self.min_room_size {
            return Err(ConfigError::CorridorTooWide {
                width: self.corridor_width,
                min_room: self.min_room_size,
            });
        }
        Ok(())
    }

    pub fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Cells left for rooms on one axis once the outer wall and both border margins are removed.
    pub fn interior_span(&self, axis: Axis, border: usize) -> Option<usize> {
        self.span(axis).checked_sub(2 + 2 * border)
    }
}

fn check_bounds(field: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedBounds { field, min, max });
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { field, value });
    }
    Ok(())
}
