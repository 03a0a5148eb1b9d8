//! Straight-line stepper that approximates the line to its target as a staircase.
//!
//! The dominant axis is split into `minor + 1` chunks whose lengths differ by at most one. Inside
//! a chunk the stepper moves along the dominant axis; at each chunk boundary it takes one
//! diagonal elbow step. It never searches, it only aims.

use tracing::trace;

use crate::mapgen::spacing::split_evenly;
use crate::types::Cell;

use super::{GridQuery, PathStepper};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ChunkPlan {
    horizontal_dominant: bool,
    chunks: Vec<usize>,
    chunk_index: usize,
    /// 1-based position inside the current chunk.
    index_in_chunk: usize,
}

impl ChunkPlan {
    fn between(from: Cell, to: Cell) -> Self {
        let dx = from.column.abs_diff(to.column) as usize;
        let dy = from.row.abs_diff(to.row) as usize;
        let horizontal_dominant = dx >= dy;
        let (dominant, minor) = if horizontal_dominant { (dx, dy) } else { (dy, dx) };
        Self {
            horizontal_dominant,
            chunks: split_evenly(dominant + 1, minor + 1),
            chunk_index: 0,
            index_in_chunk: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkedStepper {
    current: Cell,
    target: Cell,
    plan: ChunkPlan,
    /// Cell and counters from before the last proposed step, restored if the caller refuses it.
    undo: Option<(Cell, usize, usize)>,
}

impl ChunkedStepper {
    pub fn new(start: Cell) -> Self {
        Self {
            current: start,
            target: start,
            plan: ChunkPlan::between(start, start),
            undo: None,
        }
    }

    pub fn chunk_lengths(&self) -> &[usize] {
        &self.plan.chunks
    }

    /// The next cell under the current plan and whether it ends the current chunk.
    fn candidate(&self) -> (Cell, bool) {
        let dc = (self.target.column - self.current.column).signum();
        let dr = (self.target.row - self.current.row).signum();
        let chunk_length = self.plan.chunks.get(self.plan.chunk_index).copied().unwrap_or(0);

        if self.plan.index_in_chunk < chunk_length {
            let along = if self.plan.horizontal_dominant { (dc, 0) } else { (0, dr) };
            (self.current.offset(along.0, along.1), false)
        } else {
            (self.current.offset(dc, dr), true)
        }
    }
}

impl PathStepper for ChunkedStepper {
    fn set_target(&mut self, target: Cell) {
        self.target = target;
        self.plan = ChunkPlan::between(self.current, target);
        self.undo = None;
    }

    fn next_cell<G: GridQuery + ?Sized>(&mut self, grid: &G) -> Cell {
        self.undo = None;
        if self.current == self.target {
            return self.current;
        }

        let (candidate, crosses_chunk) = self.candidate();
        if !grid.in_bounds(candidate) || grid.is_obstacle(candidate) {
            trace!(
                column = candidate.column,
                row = candidate.row,
                "direct step blocked, holding position"
            );
            return self.current;
        }

        self.undo = Some((self.current, self.plan.chunk_index, self.plan.index_in_chunk));
        if crosses_chunk {
            self.plan.chunk_index += 1;
            self.plan.index_in_chunk = 1;
        } else {
            self.plan.index_in_chunk += 1;
        }
        self.current = candidate;
        self.current
    }

    fn position(&self) -> Cell {
        self.current
    }

    fn target(&self) -> Cell {
        self.target
    }

    /// Moving back to the cell the last step left rewinds that step, so the same candidate is
    /// proposed again. Any other cell gets a fresh plan.
    fn relocate(&mut self, cell: Cell) {
        match self.undo.take() {
            Some((before, chunk_index, index_in_chunk)) if before == cell => {
                self.plan.chunk_index = chunk_index;
                self.plan.index_in_chunk = index_in_chunk;
            }
            _ => self.plan = ChunkPlan::between(cell, self.target),
        }
        self.current = cell;
    }
}
