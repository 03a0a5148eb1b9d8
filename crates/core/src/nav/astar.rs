//! Shortest-path stepper: a fresh 8-directional A* search on every call, returning only the
//! first step. Unit step cost, Euclidean heuristic.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::types::Cell;

use super::{GridQuery, PathStepper};

/// Open-set entry ordered by lowest F, then lowest H, then earliest insertion.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    h: f64,
    order: u64,
    cell: Cell,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    g: u32,
    h: f64,
    parent: Option<Cell>,
    order: u64,
}

impl SearchNode {
    fn entry(&self, cell: Cell) -> OpenEntry {
        OpenEntry { f: f64::from(self.g) + self.h, h: self.h, order: self.order, cell }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AStarStepper {
    current: Cell,
    target: Cell,
}

impl AStarStepper {
    pub fn new(start: Cell) -> Self {
        Self { current: start, target: start }
    }

    /// First cell of a shortest path from `start` to `target`, if one exists.
    pub fn first_step<G: GridQuery + ?Sized>(grid: &G, start: Cell, target: Cell) -> Option<Cell> {
        if start == target {
            return Some(start);
        }

        let mut nodes = BTreeMap::new();
        let mut open = BTreeSet::new();
        let mut closed = BTreeSet::new();
        let mut next_order = 0_u64;

        let root = SearchNode { g: 0, h: start.euclidean(target), parent: None, order: next_order };
        next_order += 1;
        open.insert(root.entry(start));
        nodes.insert(start, root);

        while let Some(best) = open.pop_first() {
            let cell = best.cell;
            if cell == target {
                return first_step_towards(&nodes, start, target);
            }
            closed.insert(cell);
            let Some(g) = nodes.get(&cell).map(|node| node.g) else { continue };

            for dc in -1..=1 {
                for dr in -1..=1 {
                    if dc == 0 && dr == 0 {
                        continue;
                    }
                    let neighbour = cell.offset(dc, dr);
                    if !grid.in_bounds(neighbour)
                        || closed.contains(&neighbour)
                        || grid.is_obstacle(neighbour)
                    {
                        continue;
                    }
                    // Only the cells adjacent to the start are known to be occupied next turn.
                    if cell == start && grid.is_occupied_by_actor(neighbour) {
                        continue;
                    }

                    let tentative = g + 1;
                    match nodes.get_mut(&neighbour) {
                        Some(node) => {
                            if tentative < node.g {
                                open.remove(&node.entry(neighbour));
                                node.g = tentative;
                                node.parent = Some(cell);
                                open.insert(node.entry(neighbour));
                            }
                        }
                        None => {
                            let node = SearchNode {
                                g: tentative,
                                h: neighbour.euclidean(target),
                                parent: Some(cell),
                                order: next_order,
                            };
                            next_order += 1;
                            open.insert(node.entry(neighbour));
                            nodes.insert(neighbour, node);
                        }
                    }
                }
            }
        }
        None
    }
}

fn first_step_towards(
    nodes: &BTreeMap<Cell, SearchNode>,
    start: Cell,
    target: Cell,
) -> Option<Cell> {
    let mut cell = target;
    loop {
        let parent = nodes.get(&cell)?.parent?;
        if parent == start {
            return Some(cell);
        }
        cell = parent;
    }
}

impl PathStepper for AStarStepper {
    fn set_target(&mut self, target: Cell) {
        self.target = target;
    }

    fn next_cell<G: GridQuery + ?Sized>(&mut self, grid: &G) -> Cell {
        if self.current == self.target {
            return self.current;
        }
        match Self::first_step(grid, self.current, self.target) {
            Some(step) => self.current = step,
            None => trace!(
                column = self.target.column,
                row = self.target.row,
                "no path to target, holding position"
            ),
        }
        self.current
    }

    fn position(&self) -> Cell {
        self.current
    }

    fn target(&self) -> Cell {
        self.target
    }

    fn relocate(&mut self, cell: Cell) {
        self.current = cell;
    }
}
