//! Grid Coordinates
//!
//! Integer 2D points used both as board cells and as swap offsets.
//! `x` is the column, `y` is the row, row 0 is the top of the board.

use std::fmt;
use std::ops::{Add, Sub};
use serde::{Serialize, Deserialize};

/// A board coordinate or a displacement between two coordinates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// Column (or horizontal offset)
    pub x: i32,
    /// Row (or vertical offset), growing downward
    pub y: i32,
}

impl GridPoint {
    /// Origin / zero offset
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// One row up
    pub const UP: Self = Self { x: 0, y: -1 };

    /// One row down
    pub const DOWN: Self = Self { x: 0, y: 1 };

    /// One column left
    pub const LEFT: Self = Self { x: -1, y: 0 };

    /// One column right
    pub const RIGHT: Self = Self { x: 1, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by another point.
    #[inline]
    pub fn offset(self, delta: Self) -> Self {
        Self {
            x: self.x.wrapping_add(delta.x),
            y: self.y.wrapping_add(delta.y),
        }
    }

    /// Manhattan length of this point taken as an offset.
    #[inline]
    pub fn manhattan_len(self) -> u32 {
        self.x.unsigned_abs() + self.y.unsigned_abs()
    }

    /// True if this offset moves exactly one step along one axis.
    #[inline]
    pub fn is_unit_step(self) -> bool {
        self.manhattan_len() == 1
    }

    /// True if this cell lies in a `size` x `size` board.
    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < size && (self.y as usize) < size
    }
}

impl Add for GridPoint {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.offset(rhs)
    }
}

impl Sub for GridPoint {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(rhs.x),
            y: self.y.wrapping_sub(rhs.y),
        }
    }
}

impl fmt::Debug for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
