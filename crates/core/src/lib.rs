pub mod mapgen;
pub mod nav;
pub mod types;
pub mod world;

pub use mapgen::{ConfigError, FloorPlan, GenerationConfig, WallSet, generate, generate_seeded};
pub use nav::{AStarStepper, ChunkedStepper, GridQuery, Navigator, PathStepper, Strategy};
pub use types::*;
pub use world::{Actor, ActorId, ActorMove, Goal, TickReport, World, WorldError};
