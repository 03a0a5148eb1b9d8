//! Plain-text views of a floor plan.

use std::collections::BTreeMap;

use delve_core::{Cell, FloorPlan};
use serde::Serialize;

pub const WALL: char = '#';
pub const WATER: char = '~';
pub const FLOOR: char = '.';

/// One line per row. `glyphs` are drawn over the terrain; later entries win.
pub fn render_ascii(plan: &FloorPlan, glyphs: &[(Cell, char)]) -> String {
    let overlay: BTreeMap<Cell, char> = glyphs.iter().copied().collect();
    let mut out = String::with_capacity((plan.width + 1) * plan.height);
    for row in 0..plan.height as i32 {
        for column in 0..plan.width as i32 {
            let cell = Cell::new(column, row);
            let glyph = overlay.get(&cell).copied().unwrap_or_else(|| terrain_glyph(plan, cell));
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn terrain_glyph(plan: &FloorPlan, cell: Cell) -> char {
    if plan.is_wall(cell) {
        WALL
    } else if plan.is_water(cell) {
        WATER
    } else {
        FLOOR
    }
}

#[derive(Serialize)]
struct LayoutDocument<'a> {
    seed: u64,
    fingerprint: String,
    #[serde(flatten)]
    plan: &'a FloorPlan,
}

/// Pretty JSON of the plan, tagged with its seed and hex fingerprint.
pub fn render_json(plan: &FloorPlan, seed: u64) -> serde_json::Result<String> {
    let fingerprint = format!("{:016x}", plan.fingerprint());
    let document = LayoutDocument { seed, fingerprint, plan };
    serde_json::to_string_pretty(&document)
}
