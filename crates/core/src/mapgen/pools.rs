//! Water pools stamped over the cleaned floor.

use std::collections::BTreeSet;

use rand_chacha::rand_core::Rng;
use tracing::debug;

use crate::types::Cell;

use super::config::GenerationConfig;
use super::dice::random_between;
use super::model::WallSet;

const BLOCK_WIDTH: i32 = 3;
const BLOCK_HEIGHT: i32 = 3;
const MAX_WIDTH_IN_BLOCKS: usize = 6;
const MAX_HEIGHT_IN_BLOCKS: usize = 4;

pub struct PoolGenerator {
    width: usize,
    height: usize,
    min_pools: usize,
    max_pools: usize,
}

impl PoolGenerator {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            min_pools: config.min_pools,
            max_pools: config.max_pools,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, walls: &WallSet, rng: &mut R) -> BTreeSet<Cell> {
        let mut water = BTreeSet::new();
        if self.width == 0 || self.height == 0 {
            return water;
        }

        let pools = random_between(rng, self.min_pools, self.max_pools);
        for _ in 0..pools {
            let before = water.len();
            self.stamp_pool(walls, rng, &mut water);
            debug!(cells = water.len() - before, "stamped pool");
        }
        water
    }

    /// Columns of 3x3 blocks, each column centred vertically on the anchor row.
    fn stamp_pool<R: Rng + ?Sized>(
        &self,
        walls: &WallSet,
        rng: &mut R,
        water: &mut BTreeSet<Cell>,
    ) {
        let anchor_column = random_between(rng, 0, self.width - 1) as i32;
        let anchor_row = random_between(rng, 0, self.height - 1) as i32;
        let width_in_blocks = random_between(rng, 1, MAX_WIDTH_IN_BLOCKS) as i32;

        for block_column in 0..width_in_blocks {
            let height_in_blocks = random_between(rng, 1, MAX_HEIGHT_IN_BLOCKS) as i32;
            let top = anchor_row - height_in_blocks * BLOCK_HEIGHT / 2 + 1;
            let left = anchor_column + block_column * BLOCK_WIDTH;
            for column in left..left + BLOCK_WIDTH {
                for row in top..top + height_in_blocks * BLOCK_HEIGHT {
                    let cell = Cell::new(column, row);
                    if self.is_interior(cell) && !walls.contains(cell) {
                        water.insert(cell);
                    }
                }
            }
        }
    }

    fn is_interior(&self, cell: Cell) -> bool {
        cell.column >= 1
            && cell.row >= 1
            && (cell.column as usize) + 1 < self.width
            && (cell.row as usize) + 1 < self.height
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn generator(min_pools: usize, max_pools: usize) -> PoolGenerator {
        PoolGenerator::from_config(&GenerationConfig {
            min_pools,
            max_pools,
            ..GenerationConfig::default()
        })
    }

    #[test]
    fn zero_pools_leave_no_water() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(generator(0, 0).generate(&WallSet::new(), &mut rng).is_empty());
    }

    #[test]
    fn water_never_covers_walls_or_the_outer_ring() {
        let walls: WallSet = (0..50).map(|column| Cell::new(column, 10)).collect();
        let pools = generator(3, 3);
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let water = pools.generate(&walls, &mut rng);
            for cell in &water {
                assert!(!walls.contains(*cell));
                assert!(pools.is_interior(*cell), "{cell:?} is on the outer ring");
            }
        }
    }

    #[test]
    fn one_pool_stays_within_the_block_limits() {
        let pools = generator(1, 1);
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let water = pools.generate(&WallSet::new(), &mut rng);
            let columns: BTreeSet<i32> = water.iter().map(|cell| cell.column).collect();
            let rows: BTreeSet<i32> = water.iter().map(|cell| cell.row).collect();
            assert!(columns.len() <= MAX_WIDTH_IN_BLOCKS * BLOCK_WIDTH as usize);
            assert!(rows.len() <= MAX_HEIGHT_IN_BLOCKS * BLOCK_HEIGHT as usize);
        }
    }

    #[test]
    fn same_seed_stamps_the_same_pools() {
        let pools = generator(1, 2);
        let left = pools.generate(&WallSet::new(), &mut ChaCha8Rng::seed_from_u64(4));
        let right = pools.generate(&WallSet::new(), &mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(left, right);
    }
}
