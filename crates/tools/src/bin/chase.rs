use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use delve_core::{ActorId, Cell, Goal, GridQuery, Strategy, World, generate_seeded};
use delve_tools::config_file::resolve_generation_config;
use delve_tools::init_tracing;
use delve_tools::render::render_ascii;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about = "Soak test: hunters chase a runner", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    #[arg(long, default_value_t = 4)]
    hunters: usize,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the final board
    #[arg(long)]
    show: bool,
}

fn choose(rng: &mut ChaCha8Rng, cells: &[Cell]) -> Cell {
    let p = rng.next_u64() as usize % cells.len();
    cells[p]
}

fn spawn_somewhere(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    open: &[Cell],
    speed: u32,
    strategy: Strategy,
) -> Result<ActorId> {
    for _ in 0..open.len() {
        match world.spawn(choose(rng, open), speed, strategy) {
            Ok(id) => return Ok(id),
            Err(error) => debug!(%error, "spawn attempt failed, retrying"),
        }
    }
    bail!("No free cell left to spawn a {strategy:?} actor")
}

fn check_invariants(world: &World) -> Result<()> {
    let mut taken = BTreeSet::new();
    for (id, actor) in world.actors() {
        ensure!(!world.is_obstacle(actor.pos), "Invariant failed: actor inside terrain");
        ensure!(taken.insert(actor.pos), "Invariant failed: two actors share {:?}", actor.pos);
        ensure!(world.actor_at(actor.pos) == Some(id), "Invariant failed: stale occupancy");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = resolve_generation_config(args.config.as_deref())?;
    let plan = generate_seeded(&config, args.seed)
        .with_context(|| format!("Generation failed for seed {}", args.seed))?;
    let open: Vec<Cell> = plan.open_cells().collect();
    ensure!(!open.is_empty(), "Generated floor has no open cells");

    println!("Starting chase on seed {} for {} ticks...", args.seed, args.ticks);
    let mut world = World::new(plan);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let runner = spawn_somewhere(&mut world, &mut rng, &open, 1, Strategy::AStar)?;
    let mut hunters = Vec::with_capacity(args.hunters);
    for index in 0..args.hunters {
        let strategy = if index % 2 == 0 { Strategy::AStar } else { Strategy::Direct };
        let speed = 1 + (index as u32 % 2);
        let hunter = spawn_somewhere(&mut world, &mut rng, &open, speed, strategy)?;
        world.follow(hunter, runner)?;
        hunters.push(hunter);
    }

    let (mut moves, mut refused, mut arrivals, mut cornered) = (0, 0, 0, 0);
    for _ in 0..args.ticks {
        let runner_idle = world.actor(runner).is_some_and(|actor| actor.goal == Goal::Idle);
        if runner_idle {
            info!(tick = world.ticks(), "runner picked a new destination");
            world.set_destination(runner, choose(&mut rng, &open))?;
        }

        let report = world.tick();
        ensure!(
            report.moves.iter().all(|step| step.from.chebyshev(step.to) == 1),
            "Invariant failed: actor moved more than one cell at tick {}",
            report.tick
        );
        check_invariants(&world).with_context(|| format!("At tick {}", report.tick))?;

        moves += report.moves.len();
        refused += report.refused;
        let Some(runner_pos) = world.actor(runner).map(|actor| actor.pos) else { break };
        if world.actor(runner).is_some_and(|actor| actor.goal == Goal::Idle) && !runner_idle {
            arrivals += 1;
        }
        let adjacent = hunters
            .iter()
            .filter_map(|&id| world.actor(id))
            .filter(|hunter| hunter.pos.chebyshev(runner_pos) <= 1)
            .count();
        if adjacent > 0 {
            cornered += 1;
        }
    }

    if args.show {
        let mut glyphs: Vec<(Cell, char)> = Vec::new();
        for (id, actor) in world.actors() {
            let glyph = match actor.strategy() {
                _ if id == runner => '@',
                Strategy::AStar => 'a',
                Strategy::Direct => 'd',
            };
            glyphs.push((actor.pos, glyph));
        }
        print!("{}", render_ascii(world.plan(), &glyphs));
    }

    println!("Chase complete.");
    println!("Ticks: {}", world.ticks());
    println!("Moves: {moves}  Refused: {refused}");
    println!("Runner arrivals: {arrivals}  Ticks with a hunter adjacent: {cornered}");
    println!("Floor fingerprint: {:016x}", world.plan().fingerprint());
    Ok(())
}
