//! Room grid placement and corridor stubs for the base wall topology.

use rand_chacha::rand_core::Rng;
use tracing::debug;

use crate::types::Cell;

use super::config::{Axis, GenerationConfig};
use super::dice::{random_between, roll_chance};
use super::model::WallSet;
use super::spacing::allocate_gaps;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) left: usize,
    pub(super) top: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    pub(super) fn right(self) -> usize {
        self.left + self.width - 1
    }

    pub(super) fn bottom(self) -> usize {
        self.top + self.height - 1
    }

    pub(super) fn perimeter(self) -> impl Iterator<Item = Cell> {
        (self.top..=self.bottom()).flat_map(move |row| {
            (self.left..=self.right())
                .filter(move |&column| {
                    row == self.top
                        || row == self.bottom()
                        || column == self.left
                        || column == self.right()
                })
                .map(move |column| cell_at(column, row))
        })
    }
}

/// Room slots along one axis: every room on the axis shares one size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct AxisPlan {
    pub(super) border: usize,
    pub(super) size: usize,
    pub(super) origins: Vec<usize>,
}

impl AxisPlan {
    fn count(&self) -> usize {
        self.origins.len()
    }
}

pub struct RoomPartitionGenerator<'a> {
    config: &'a GenerationConfig,
}

impl<'a> RoomPartitionGenerator<'a> {
    /// Expects a config that already passed [`GenerationConfig::validate`].
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    /// Rooms, corridor stubs and the outer border wall.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> WallSet {
        let mut walls = self.generate_interior(rng);
        add_border(&mut walls, self.config.width, self.config.height);
        walls
    }

    /// Rooms and corridor stubs only; the outer border is left open.
    pub fn generate_interior<R: Rng + ?Sized>(&self, rng: &mut R) -> WallSet {
        let columns = self.plan_axis(rng, Axis::Horizontal);
        let rows = self.plan_axis(rng, Axis::Vertical);
        debug!(
            columns = columns.count(),
            rows = rows.count(),
            room_width = columns.size,
            room_height = rows.size,
            "partitioned room grid"
        );

        let mut walls = WallSet::new();
        let mut rooms_drawn = 0_usize;
        for (column_slot, &left) in columns.origins.iter().enumerate() {
            for (row_slot, &top) in rows.origins.iter().enumerate() {
                let room = RoomRect { left, top, width: columns.size, height: rows.size };

                if roll_chance(rng, self.config.room_chance) {
                    walls.extend(room.perimeter());
                    rooms_drawn += 1;
                }

                if let Some(&next_left) = columns.origins.get(column_slot + 1)
                    && roll_chance(rng, self.config.corridor_chance)
                {
                    walls.extend(horizontal_corridor(room, next_left, self.config.corridor_width));
                }

                if let Some(&next_top) = rows.origins.get(row_slot + 1)
                    && roll_chance(rng, self.config.corridor_chance)
                {
                    walls.extend(vertical_corridor(room, next_top, self.config.corridor_width));
                }
            }
        }
        debug!(rooms_drawn, wall_cells = walls.len(), "drew rooms and corridors");
        walls
    }

    pub(super) fn plan_axis<R: Rng + ?Sized>(&self, rng: &mut R, axis: Axis) -> AxisPlan {
        let config = self.config;
        let spacing = config.min_spacing;
        let border = random_between(rng, config.min_border, config.max_border);
        let inner = config.interior_span(axis, border).unwrap_or(0);

        let mut size = random_between(rng, config.min_room_size, config.max_room_size);
        let max_count = inner.saturating_sub(spacing) / (size + spacing);
        let count = random_between(rng, 1, max_count.max(1));
        if count == 1 {
            size = inner.saturating_sub(2 * spacing);
        }

        let gaps = allocate_gaps(inner, count, size).unwrap_or_default();
        let mut origins = Vec::with_capacity(count);
        let mut cursor = 1 + border;
        for gap in gaps.iter().take(count) {
            cursor += gap;
            origins.push(cursor);
            cursor += size;
        }

        AxisPlan { border, size, origins }
    }
}

/// Two wall lines spanning the gap between a room's right wall and its neighbour's left wall.
fn horizontal_corridor(room: RoomRect, next_left: usize, corridor_width: usize) -> Vec<Cell> {
    let first_open_row = room.top + (room.height - corridor_width) / 2;
    let wall_rows = [first_open_row - 1, first_open_row + corridor_width];
    let mut cells = Vec::new();
    for row in wall_rows {
        for column in (room.right() + 1)..next_left {
            cells.push(cell_at(column, row));
        }
    }
    cells
}

/// Two wall lines spanning the gap between a room's bottom wall and the top wall below it.
fn vertical_corridor(room: RoomRect, next_top: usize, corridor_width: usize) -> Vec<Cell> {
    let first_open_column = room.left + (room.width - corridor_width) / 2;
    let wall_columns = [first_open_column - 1, first_open_column + corridor_width];
    let mut cells = Vec::new();
    for column in wall_columns {
        for row in (room.bottom() + 1)..next_top {
            cells.push(cell_at(column, row));
        }
    }
    cells
}

pub fn add_border(walls: &mut WallSet, width: usize, height: usize) {
    if width == 0 || height == 0 {
        return;
    }
    for column in 0..width {
        walls.insert(cell_at(column, 0));
        walls.insert(cell_at(column, height - 1));
    }
    for row in 0..height {
        walls.insert(cell_at(0, row));
        walls.insert(cell_at(width - 1, row));
    }
}

fn cell_at(column: usize, row: usize) -> Cell {
    Cell::new(column as i32, row as i32)
}
