use std::collections::{BTreeMap, BTreeSet, VecDeque};

use delve_core::{
    ActorId, Cell, FloorPlan, GenerationConfig, GridQuery, Strategy, World, generate_seeded,
};

/// Cells an 8-directional walker can reach from `start`.
fn reachable(plan: &FloorPlan, start: Cell) -> BTreeSet<Cell> {
    let mut seen = BTreeSet::from([start]);
    let mut frontier = VecDeque::from([start]);
    while let Some(cell) = frontier.pop_front() {
        for dc in -1..=1 {
            for dr in -1..=1 {
                let next = cell.offset(dc, dr);
                if plan.is_open(next) && seen.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
    }
    seen
}

fn assert_world_consistent(world: &World) {
    let mut seen = BTreeMap::new();
    for (id, actor) in world.actors() {
        assert!(!world.is_obstacle(actor.pos), "actor stands on terrain at {:?}", actor.pos);
        assert_eq!(world.actor_at(actor.pos), Some(id));
        if let Some(other) = seen.insert(actor.pos, id) {
            panic!("{other:?} and {id:?} share {:?}", actor.pos);
        }
    }
}

#[test]
fn generated_floors_keep_a_sealed_border_and_dry_walls() {
    let config = GenerationConfig { min_pools: 1, max_pools: 2, ..GenerationConfig::default() };
    for seed in 0..24 {
        let plan = generate_seeded(&config, seed).expect("valid config");
        let (width, height) = (plan.width as i32, plan.height as i32);
        for column in 0..width {
            assert!(plan.is_wall(Cell::new(column, 0)));
            assert!(plan.is_wall(Cell::new(column, height - 1)));
        }
        for row in 0..height {
            assert!(plan.is_wall(Cell::new(0, row)));
            assert!(plan.is_wall(Cell::new(width - 1, row)));
        }
        assert!(plan.water.iter().all(|&cell| !plan.is_wall(cell)));
        assert!(plan.open_cells().count() > (plan.width * plan.height) / 3);
    }
}

#[test]
fn astar_trips_on_generated_floors_mostly_arrive() {
    let config = GenerationConfig::default();
    let mut trips = 0;
    let mut arrived = 0;

    for seed in 0..12 {
        let plan = generate_seeded(&config, seed).expect("valid config");
        let start = plan.open_cells().next().expect("floor has open cells");
        let destination =
            reachable(&plan, start).into_iter().max().expect("start reaches itself");
        let budget = plan.open_cells().count();

        let mut world = World::new(plan);
        let id = world.spawn(start, 1, Strategy::AStar).expect("open cell");
        world.set_destination(id, destination).expect("known actor");
        for _ in 0..budget {
            let report = world.tick();
            assert!(report.moves.iter().all(|step| step.from.chebyshev(step.to) == 1));
            assert_world_consistent(&world);
        }

        trips += 1;
        if world.actor(id).map(|actor| actor.pos) == Some(destination) {
            arrived += 1;
        }
    }
    assert!(arrived * 4 >= trips * 3, "only {arrived} of {trips} trips arrived");
}

#[test]
fn crowded_chase_never_overlaps_actors_or_enters_terrain() {
    let config = GenerationConfig { min_pools: 1, max_pools: 1, ..GenerationConfig::default() };
    for seed in 0..6 {
        let plan = generate_seeded(&config, seed).expect("valid config");
        let open: Vec<Cell> = plan.open_cells().collect();
        let mut world = World::new(plan);

        let runner = world.spawn(open[open.len() / 2], 1, Strategy::AStar).expect("open cell");
        let mut hunters: Vec<ActorId> = Vec::new();
        for (index, &cell) in open.iter().step_by(open.len() / 6).take(6).enumerate() {
            let strategy = if index % 2 == 0 { Strategy::Direct } else { Strategy::AStar };
            if let Ok(id) = world.spawn(cell, 1 + (index as u32 % 3), strategy) {
                world.follow(id, runner).expect("known actors");
                hunters.push(id);
            }
        }
        assert!(!hunters.is_empty());

        for tick in 0..150 {
            if tick % 25 == 0 {
                let destination = open[(tick * 37 + seed as usize * 11) % open.len()];
                world.set_destination(runner, destination).expect("known actor");
            }
            world.tick();
            assert_world_consistent(&world);
        }
    }
}
