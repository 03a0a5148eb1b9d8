//! Small hand-built grids for the stepper test suites.

use std::collections::BTreeSet;

use crate::types::Cell;

use super::GridQuery;

pub(super) struct TestGrid {
    pub(super) width: i32,
    pub(super) height: i32,
    pub(super) obstacles: BTreeSet<Cell>,
    pub(super) actors: BTreeSet<Cell>,
}

impl TestGrid {
    pub(super) fn open(width: i32, height: i32) -> Self {
        Self { width, height, obstacles: BTreeSet::new(), actors: BTreeSet::new() }
    }

    pub(super) fn with_obstacles(mut self, cells: &[(i32, i32)]) -> Self {
        self.obstacles.extend(cells.iter().map(|&(column, row)| Cell::new(column, row)));
        self
    }

    pub(super) fn with_actors(mut self, cells: &[(i32, i32)]) -> Self {
        self.actors.extend(cells.iter().map(|&(column, row)| Cell::new(column, row)));
        self
    }
}

impl GridQuery for TestGrid {
    fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.column) && (0..self.height).contains(&cell.row)
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.obstacles.contains(&cell)
    }

    fn is_occupied_by_actor(&self, cell: Cell) -> bool {
        self.actors.contains(&cell)
    }
}
