//! Wall-graph walk that finds closed wall loops and carves entrances through them.
//!
//! Wall cells become nodes linked to their up/right/down/left wall neighbours. A depth-first
//! walk starts from the bottom-left-most unvisited node and prefers up, right, down, then left,
//! never stepping straight back to the node it just left. Reaching an already-visited node
//! closes a loop; the walk then carries on along the loop, waits a random number of steps and
//! removes a random run of nodes, once per entrance. The whole pass runs twice so loops that
//! survive the first carving get a second chance.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use rand_chacha::rand_core::Rng;
use tracing::debug;

use crate::types::{Cell, Direction};

use super::config::{GenerationConfig, MIN_CARVE_LENGTH};
use super::dice::random_between;
use super::model::WallSet;

const PASSES: usize = 2;

#[derive(Clone, Debug)]
struct WallNode {
    cell: Cell,
    links: [Option<usize>; 4],
    visited: bool,
    removed: bool,
}

struct WallGraph {
    nodes: Vec<WallNode>,
}

impl WallGraph {
    fn build(walls: &WallSet) -> Self {
        let index: BTreeMap<Cell, usize> =
            walls.iter().enumerate().map(|(position, &cell)| (cell, position)).collect();
        let nodes = walls
            .iter()
            .map(|&cell| WallNode {
                cell,
                links: Direction::PREFERENCE
                    .map(|direction| index.get(&cell.step(direction)).copied()),
                visited: false,
                removed: false,
            })
            .collect();
        Self { nodes }
    }

    /// Lowest column first, then the highest row.
    fn next_start(&self) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.visited && !node.removed)
            .min_by_key(|(_, node)| (node.cell.column, Reverse(node.cell.row)))
            .map(|(position, _)| position)
    }

    fn next_along(&self, node: usize, previous: Option<usize>) -> Option<usize> {
        self.nodes[node].links.iter().flatten().copied().find(|&next| Some(next) != previous)
    }

    fn linked(&self, from: usize, to: usize) -> bool {
        self.nodes[from].links.contains(&Some(to))
    }

    fn remove(&mut self, node: usize) {
        for direction in Direction::PREFERENCE {
            if let Some(other) = self.nodes[node].links[direction.index()] {
                self.nodes[other].links[direction.opposite().index()] = None;
            }
        }
        let removed = &mut self.nodes[node];
        removed.links = [None; 4];
        removed.removed = true;
    }

    fn reset_visits(&mut self) {
        for node in &mut self.nodes {
            node.visited = false;
        }
    }

    fn survivors(&self) -> WallSet {
        self.nodes.iter().filter(|node| !node.removed).map(|node| node.cell).collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub loops_opened: usize,
    pub cells_removed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallGraphCleaner {
    max_carve_wait: usize,
    max_carve_length: usize,
    max_entrances: usize,
}

impl WallGraphCleaner {
    pub fn new(max_carve_wait: usize, max_carve_length: usize, max_entrances: usize) -> Self {
        Self {
            max_carve_wait,
            max_carve_length: max_carve_length.max(MIN_CARVE_LENGTH),
            max_entrances: max_entrances.max(1),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.max_carve_wait, config.max_carve_length, config.max_entrances)
    }

    pub fn clean<R: Rng + ?Sized>(&self, walls: &WallSet, rng: &mut R) -> WallSet {
        self.clean_with_stats(walls, rng).0
    }

    pub fn clean_with_stats<R: Rng + ?Sized>(
        &self,
        walls: &WallSet,
        rng: &mut R,
    ) -> (WallSet, CleanStats) {
        let mut graph = WallGraph::build(walls);
        let mut stats = CleanStats::default();

        for _ in 0..PASSES {
            graph.reset_visits();
            while let Some(start) = graph.next_start() {
                self.walk(&mut graph, start, rng, &mut stats);
            }
        }

        let survivors = graph.survivors();
        debug!(
            loops_opened = stats.loops_opened,
            cells_removed = stats.cells_removed,
            remaining = survivors.len(),
            "cleaned wall graph"
        );
        (survivors, stats)
    }

    fn walk<R: Rng + ?Sized>(
        &self,
        graph: &mut WallGraph,
        start: usize,
        rng: &mut R,
        stats: &mut CleanStats,
    ) {
        let mut stack: Vec<(usize, Option<usize>)> = vec![(start, None)];
        let mut loop_edges = BTreeSet::new();

        while let Some((node, previous)) = stack.pop() {
            if graph.nodes[node].removed {
                continue;
            }

            if graph.nodes[node].visited {
                // A carved neighbour drops its link, which makes this entry a dead end.
                let Some(previous) = previous else { continue };
                if graph.nodes[previous].removed || !graph.linked(previous, node) {
                    continue;
                }
                if loop_edges.insert((previous.min(node), previous.max(node))) {
                    self.carve_loop(graph, node, previous, rng, stats);
                }
                continue;
            }

            graph.nodes[node].visited = true;
            for direction in Direction::PREFERENCE.iter().rev() {
                if let Some(next) = graph.nodes[node].links[direction.index()]
                    && Some(next) != previous
                {
                    stack.push((next, Some(node)));
                }
            }
        }
    }

    fn carve_loop<R: Rng + ?Sized>(
        &self,
        graph: &mut WallGraph,
        closing: usize,
        previous: usize,
        rng: &mut R,
        stats: &mut CleanStats,
    ) {
        let entrances = random_between(rng, 1, self.max_entrances);
        debug!(
            column = graph.nodes[closing].cell.column,
            row = graph.nodes[closing].cell.row,
            entrances,
            "closed wall loop"
        );
        stats.loops_opened += 1;

        let mut cursor = Some((closing, previous));
        for _ in 0..entrances {
            let wait = random_between(rng, 0, self.max_carve_wait);
            let run = random_between(rng, MIN_CARVE_LENGTH, self.max_carve_length);

            for _ in 0..wait {
                cursor = cursor.and_then(|(current, previous)| {
                    graph.next_along(current, Some(previous)).map(|next| (next, current))
                });
            }
            for _ in 0..run {
                let Some((current, previous)) = cursor else { break };
                let next = graph.next_along(current, Some(previous));
                graph.remove(current);
                stats.cells_removed += 1;
                cursor = next.map(|next| (next, current));
            }
        }
    }
}
