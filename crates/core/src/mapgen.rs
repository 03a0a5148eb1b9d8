//! Procedural floor generation split into coherent submodules.

pub mod cleaner;
pub mod config;
pub mod dice;
pub mod model;
pub mod partition;
pub mod pools;
pub mod spacing;

mod generator;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub use cleaner::{CleanStats, WallGraphCleaner};
pub use config::{Axis, ConfigError, GenerationConfig};
pub use generator::MapGenerator;
pub use model::{FloorPlan, WallSet};
pub use partition::RoomPartitionGenerator;
pub use pools::PoolGenerator;

pub fn generate<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<FloorPlan, ConfigError> {
    Ok(MapGenerator::new(config.clone())?.generate(rng))
}

/// Same seed and config always give the same floor.
pub fn generate_seeded(config: &GenerationConfig, seed: u64) -> Result<FloorPlan, ConfigError> {
    generate(config, &mut ChaCha8Rng::seed_from_u64(seed))
}
