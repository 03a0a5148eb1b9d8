use serde::{Deserialize, Serialize};

/// One grid coordinate. Rows grow downward, so "up" is `row - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.offset();
        Self { column: self.column + dc, row: self.row + dr }
    }

    pub fn offset(self, dc: i32, dr: i32) -> Self {
        Self { column: self.column + dc, row: self.row + dr }
    }

    pub fn chebyshev(self, other: Cell) -> u32 {
        self.column.abs_diff(other.column).max(self.row.abs_diff(other.row))
    }

    pub fn euclidean(self, other: Cell) -> f64 {
        let dc = f64::from(self.column - other.column);
        let dr = f64::from(self.row - other.row);
        dc.hypot(dr)
    }
}

/// The four grid-adjacent directions in wall-walk preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const PREFERENCE: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}
