use crate::mapgen::FloorPlan;
use crate::types::Cell;

/// Read-only view of the world consulted by the path steppers.
///
/// Implementors must answer `is_obstacle` for every cell, including out-of-bounds ones, and
/// static terrain always wins over actor occupancy.
pub trait GridQuery {
    fn in_bounds(&self, cell: Cell) -> bool;
    fn is_obstacle(&self, cell: Cell) -> bool;
    fn is_occupied_by_actor(&self, cell: Cell) -> bool;

    fn is_open(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_obstacle(cell)
    }
}

impl GridQuery for FloorPlan {
    fn in_bounds(&self, cell: Cell) -> bool {
        FloorPlan::in_bounds(self, cell)
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        !FloorPlan::in_bounds(self, cell) || self.is_wall(cell) || self.is_water(cell)
    }

    fn is_occupied_by_actor(&self, _cell: Cell) -> bool {
        false
    }
}
