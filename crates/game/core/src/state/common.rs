use std::fmt;

/// Discrete grid position expressed in tile coordinates.
///
/// Unbounded: walls adjoining a room commonly sit at negative coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Paint-order key: cells with a smaller `x + y` are drawn first.
    #[inline]
    pub const fn depth_key(self) -> i64 {
        self.x as i64 + self.y as i64
    }

    /// Squared Euclidean distance. Widened to `u128` so any two cells fit.
    #[inline]
    pub const fn distance_squared(self, other: Position) -> u128 {
        let dx = self.x.abs_diff(other.x) as u128;
        let dy = self.y.abs_diff(other.y) as u128;
        dx * dx + dy * dy
    }

    /// Returns the position shifted by `(dx, dy)`, or `None` when it leaves the `i32` plane.
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Position> {
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
