//! Per-actor navigation: one capability, two interchangeable strategies.

mod astar;
mod chunked;
mod grid;
#[cfg(test)]
mod test_support;

use serde::{Deserialize, Serialize};

use crate::types::Cell;

pub use astar::AStarStepper;
pub use chunked::ChunkedStepper;
pub use grid::GridQuery;

/// Emits one grid step per call towards the current target.
///
/// `next_cell` returns the position the stepper now considers itself at: the current cell when
/// it is already at the target or the step was refused, otherwise the new cell. It never mutates
/// the grid. A caller that refuses to commit the move must hand the real cell back through
/// [`PathStepper::relocate`].
pub trait PathStepper {
    fn set_target(&mut self, target: Cell);
    fn next_cell<G: GridQuery + ?Sized>(&mut self, grid: &G) -> Cell;
    fn position(&self) -> Cell;
    fn target(&self) -> Cell;
    fn relocate(&mut self, cell: Cell);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Direct,
    AStar,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigator {
    Direct(ChunkedStepper),
    AStar(AStarStepper),
}

impl Navigator {
    pub fn new(strategy: Strategy, start: Cell) -> Self {
        match strategy {
            Strategy::Direct => Self::Direct(ChunkedStepper::new(start)),
            Strategy::AStar => Self::AStar(AStarStepper::new(start)),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Direct(_) => Strategy::Direct,
            Self::AStar(_) => Strategy::AStar,
        }
    }
}

impl PathStepper for Navigator {
    fn set_target(&mut self, target: Cell) {
        match self {
            Self::Direct(stepper) => stepper.set_target(target),
            Self::AStar(stepper) => stepper.set_target(target),
        }
    }

    fn next_cell<G: GridQuery + ?Sized>(&mut self, grid: &G) -> Cell {
        match self {
            Self::Direct(stepper) => stepper.next_cell(grid),
            Self::AStar(stepper) => stepper.next_cell(grid),
        }
    }

    fn position(&self) -> Cell {
        match self {
            Self::Direct(stepper) => stepper.position(),
            Self::AStar(stepper) => stepper.position(),
        }
    }

    fn target(&self) -> Cell {
        match self {
            Self::Direct(stepper) => stepper.target(),
            Self::AStar(stepper) => stepper.target(),
        }
    }

    fn relocate(&mut self, cell: Cell) {
        match self {
            Self::Direct(stepper) => stepper.relocate(cell),
            Self::AStar(stepper) => stepper.relocate(cell),
        }
    }
}
