//! Swap Input
//!
//! The core only accepts an already resolved `(cell, direction)` pair.
//! Turning pointer positions into cells and gestures into directions is
//! the presentation layer's job.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::core::point::GridPoint;

/// One of the four swipe directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0
    Up,
    /// Away from row 0
    Down,
    /// Toward column 0
    Left,
    /// Away from column 0
    Right,
}

impl Direction {
    /// All directions, in the order the web client lists them.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Unit offset for this direction.
    #[inline]
    pub fn delta(self) -> GridPoint {
        match self {
            Direction::Up => GridPoint::UP,
            Direction::Down => GridPoint::DOWN,
            Direction::Left => GridPoint::LEFT,
            Direction::Right => GridPoint::RIGHT,
        }
    }

    /// Direction for a unit offset, if it is one.
    pub fn from_delta(delta: GridPoint) -> Option<Self> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown direction name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// A swap that reached the resolver, as recorded in session history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Cell the gesture started on
    pub source: GridPoint,
    /// Swipe direction
    pub direction: Direction,
}

impl MoveRecord {
    /// Create a record.
    pub const fn new(source: GridPoint, direction: Direction) -> Self {
        Self { source, direction }
    }

    /// Cell swapped with the source.
    pub fn target(&self) -> GridPoint {
        self.source + self.direction.delta()
    }
}
