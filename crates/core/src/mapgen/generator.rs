//! Generation pipeline: partition into rooms, open closed wall loops, seal the border, add water.

use rand_chacha::rand_core::Rng;
use tracing::info;

use super::cleaner::WallGraphCleaner;
use super::config::{ConfigError, GenerationConfig};
use super::model::FloorPlan;
use super::partition::{RoomPartitionGenerator, add_border};
use super::pools::PoolGenerator;

pub struct MapGenerator {
    config: GenerationConfig,
}

impl MapGenerator {
    /// Rejects configs that could not produce a floor before any randomness is drawn.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> FloorPlan {
        let config = &self.config;

        let raw = RoomPartitionGenerator::new(config).generate_interior(rng);
        let raw_cells = raw.len();
        let (mut walls, stats) = WallGraphCleaner::from_config(config).clean_with_stats(&raw, rng);
        // The outer ring never takes part in cleaning, so it stays intact.
        add_border(&mut walls, config.width, config.height);
        let water = PoolGenerator::from_config(config).generate(&walls, rng);

        let plan = FloorPlan { width: config.width, height: config.height, walls, water };
        info!(
            width = plan.width,
            height = plan.height,
            raw_cells,
            loops_opened = stats.loops_opened,
            cells_removed = stats.cells_removed,
            walls = plan.walls.len(),
            water = plan.water.len(),
            fingerprint = plan.fingerprint(),
            "generated floor"
        );
        plan
    }
}
