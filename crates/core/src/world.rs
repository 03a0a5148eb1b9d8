//! The world collaborator behind [`GridQuery`]: a generated floor plan, the actors on it and the
//! occupancy map the scheduler maintains between their moves.

use std::collections::BTreeMap;

use slotmap::{SlotMap, new_key_type};
use thiserror::Error;
use tracing::{debug, trace};

use crate::mapgen::FloorPlan;
use crate::nav::{GridQuery, Navigator, PathStepper, Strategy};
use crate::types::Cell;

new_key_type! {
    pub struct ActorId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Goal {
    Idle,
    Cell(Cell),
    /// Re-aims at the other actor's cell every time this actor acts.
    Follow(ActorId),
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub pos: Cell,
    /// Acts on ticks divisible by this value.
    pub speed: u32,
    pub goal: Goal,
    navigator: Navigator,
}

impl Actor {
    pub fn strategy(&self) -> Strategy {
        self.navigator.strategy()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("cell ({column}, {row}) is outside the floor")]
    OutOfBounds { column: i32, row: i32 },
    #[error("cell ({column}, {row}) is blocked by terrain")]
    Obstacle { column: i32, row: i32 },
    #[error("cell ({column}, {row}) is already occupied")]
    Occupied { column: i32, row: i32 },
    #[error("actor speed must be at least 1")]
    ZeroSpeed,
    #[error("no such actor")]
    UnknownActor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorMove {
    pub actor: ActorId,
    pub from: Cell,
    pub to: Cell,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub moves: Vec<ActorMove>,
    /// Steps the stepper proposed but the occupancy map refused.
    pub refused: usize,
    /// Actors that acted this tick but stayed put.
    pub holding: usize,
}

/// Occupancy as seen by one acting actor.
struct GridView<'a> {
    plan: &'a FloorPlan,
    occupancy: &'a BTreeMap<Cell, ActorId>,
    acting: ActorId,
}

impl GridQuery for GridView<'_> {
    fn in_bounds(&self, cell: Cell) -> bool {
        self.plan.in_bounds(cell)
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        GridQuery::is_obstacle(self.plan, cell)
    }

    fn is_occupied_by_actor(&self, cell: Cell) -> bool {
        self.occupancy.get(&cell).is_some_and(|&occupant| occupant != self.acting)
    }
}

pub struct World {
    plan: FloorPlan,
    actors: SlotMap<ActorId, Actor>,
    occupancy: BTreeMap<Cell, ActorId>,
    tick: u64,
}

impl World {
    pub fn new(plan: FloorPlan) -> Self {
        Self { plan, actors: SlotMap::with_key(), occupancy: BTreeMap::new(), tick: 0 }
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Number of ticks already run.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn spawn(
        &mut self,
        pos: Cell,
        speed: u32,
        strategy: Strategy,
    ) -> Result<ActorId, WorldError> {
        let Cell { column, row } = pos;
        if speed == 0 {
            return Err(WorldError::ZeroSpeed);
        }
        if !self.plan.in_bounds(pos) {
            return Err(WorldError::OutOfBounds { column, row });
        }
        if GridQuery::is_obstacle(&self.plan, pos) {
            return Err(WorldError::Obstacle { column, row });
        }
        if self.occupancy.contains_key(&pos) {
            return Err(WorldError::Occupied { column, row });
        }

        let navigator = Navigator::new(strategy, pos);
        let id = self.actors.insert(Actor { pos, speed, goal: Goal::Idle, navigator });
        self.occupancy.insert(pos, id);
        debug!(column, row, speed, ?strategy, "spawned actor");
        Ok(id)
    }

    pub fn despawn(&mut self, id: ActorId) -> Result<Actor, WorldError> {
        let actor = self.actors.remove(id).ok_or(WorldError::UnknownActor)?;
        self.occupancy.remove(&actor.pos);
        Ok(actor)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter()
    }

    pub fn actor_at(&self, cell: Cell) -> Option<ActorId> {
        self.occupancy.get(&cell).copied()
    }

    pub fn set_destination(&mut self, id: ActorId, cell: Cell) -> Result<(), WorldError> {
        let actor = self.actors.get_mut(id).ok_or(WorldError::UnknownActor)?;
        actor.goal = Goal::Cell(cell);
        actor.navigator.set_target(cell);
        Ok(())
    }

    pub fn follow(&mut self, id: ActorId, leader: ActorId) -> Result<(), WorldError> {
        if !self.actors.contains_key(leader) {
            return Err(WorldError::UnknownActor);
        }
        let actor = self.actors.get_mut(id).ok_or(WorldError::UnknownActor)?;
        actor.goal = Goal::Follow(leader);
        Ok(())
    }

    pub fn stop(&mut self, id: ActorId) -> Result<(), WorldError> {
        let actor = self.actors.get_mut(id).ok_or(WorldError::UnknownActor)?;
        actor.goal = Goal::Idle;
        Ok(())
    }

    /// Lets every actor due this tick take one step, committing each move before the next actor
    /// acts.
    pub fn tick(&mut self) -> TickReport {
        let now = self.tick;
        self.tick += 1;
        let mut report = TickReport { tick: now, ..TickReport::default() };

        let order: Vec<ActorId> = self.actors.keys().collect();
        for id in order {
            let Some(target) = self.due_target(id, now) else { continue };
            let Self { plan, actors, occupancy, .. } = self;
            let Some(actor) = actors.get_mut(id) else { continue };

            if actor.navigator.target() != target {
                actor.navigator.set_target(target);
            }
            let from = actor.pos;
            let view = GridView { plan, occupancy, acting: id };
            let to = actor.navigator.next_cell(&view);

            if to == from {
                report.holding += 1;
            } else if plan.is_open(to) && !occupancy.contains_key(&to) && from.chebyshev(to) == 1 {
                occupancy.remove(&from);
                occupancy.insert(to, id);
                actor.pos = to;
                report.moves.push(ActorMove { actor: id, from, to });
            } else {
                trace!(column = to.column, row = to.row, "move refused, cell taken");
                actor.navigator.relocate(from);
                report.refused += 1;
            }

            if actor.goal == Goal::Cell(actor.pos) {
                actor.goal = Goal::Idle;
                debug!(column = actor.pos.column, row = actor.pos.row, "actor arrived");
            }
        }
        report
    }

    /// Where `id` is heading if it acts on `now`. Followers already next to their leader hold.
    fn due_target(&mut self, id: ActorId, now: u64) -> Option<Cell> {
        let (speed, goal, here) =
            self.actors.get(id).map(|actor| (actor.speed, actor.goal, actor.pos))?;
        if now % u64::from(speed) != 0 {
            return None;
        }
        match goal {
            Goal::Idle => None,
            Goal::Cell(cell) => Some(cell),
            Goal::Follow(leader) => match self.actors.get(leader).map(|leader| leader.pos) {
                Some(there) if there.chebyshev(here) <= 1 => None,
                Some(there) => Some(there),
                None => {
                    if let Some(actor) = self.actors.get_mut(id) {
                        actor.goal = Goal::Idle;
                    }
                    None
                }
            },
        }
    }
}

impl GridQuery for World {
    fn in_bounds(&self, cell: Cell) -> bool {
        self.plan.in_bounds(cell)
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        GridQuery::is_obstacle(&self.plan, cell)
    }

    fn is_occupied_by_actor(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::mapgen::WallSet;
    use crate::mapgen::partition::add_border;

    fn open_room(width: usize, height: usize) -> World {
        let mut walls = WallSet::new();
        add_border(&mut walls, width, height);
        World::new(FloorPlan { width, height, walls, water: BTreeSet::new() })
    }

    fn run(world: &mut World, ticks: usize) {
        for _ in 0..ticks {
            world.tick();
        }
    }

    fn pos(world: &World, id: ActorId) -> Cell {
        world.actor(id).map(|actor| actor.pos).expect("actor exists")
    }

    #[test]
    fn spawning_rejects_walls_outside_cells_and_occupied_cells() {
        let mut world = open_room(8, 6);
        assert_eq!(
            world.spawn(Cell::new(0, 2), 1, Strategy::Direct),
            Err(WorldError::Obstacle { column: 0, row: 2 })
        );
        assert_eq!(
            world.spawn(Cell::new(9, 2), 1, Strategy::Direct),
            Err(WorldError::OutOfBounds { column: 9, row: 2 })
        );
        assert_eq!(world.spawn(Cell::new(2, 2), 0, Strategy::Direct), Err(WorldError::ZeroSpeed));

        let id = world.spawn(Cell::new(2, 2), 1, Strategy::AStar).expect("open cell");
        assert_eq!(world.actor_at(Cell::new(2, 2)), Some(id));
        assert_eq!(
            world.spawn(Cell::new(2, 2), 1, Strategy::Direct),
            Err(WorldError::Occupied { column: 2, row: 2 })
        );
    }

    #[test]
    fn water_is_an_obstacle_for_spawning() {
        let mut world = open_room(8, 6);
        world.plan.water.insert(Cell::new(3, 3));
        assert!(world.is_obstacle(Cell::new(3, 3)));
        assert!(matches!(
            world.spawn(Cell::new(3, 3), 1, Strategy::Direct),
            Err(WorldError::Obstacle { .. })
        ));
    }

    #[test]
    fn actor_walks_to_its_destination_and_goes_idle() {
        let mut world = open_room(12, 8);
        for strategy in [Strategy::Direct, Strategy::AStar] {
            let id = world.spawn(Cell::new(1, 1), 1, strategy).expect("open cell");
            world.set_destination(id, Cell::new(9, 5)).expect("known actor");
            run(&mut world, 12);
            let actor = world.actor(id).expect("actor exists");
            assert_eq!(actor.pos, Cell::new(9, 5), "{strategy:?}");
            assert_eq!(actor.goal, Goal::Idle);
            world.despawn(id).expect("known actor");
        }
    }

    #[test]
    fn slow_actors_act_only_on_their_ticks() {
        let mut world = open_room(12, 5);
        let id = world.spawn(Cell::new(1, 2), 2, Strategy::Direct).expect("open cell");
        world.set_destination(id, Cell::new(8, 2)).expect("known actor");
        run(&mut world, 4);
        assert_eq!(pos(&world, id), Cell::new(3, 2));
        assert_eq!(world.ticks(), 4);
    }

    #[test]
    fn occupied_cell_refuses_the_move_and_keeps_actors_apart() {
        let mut world = open_room(10, 3);
        let walker = world.spawn(Cell::new(1, 1), 1, Strategy::Direct).expect("open cell");
        let blocker = world.spawn(Cell::new(4, 1), 1, Strategy::Direct).expect("open cell");
        world.set_destination(walker, Cell::new(8, 1)).expect("known actor");

        let mut refused = 0;
        for _ in 0..6 {
            refused += world.tick().refused;
        }
        assert!(refused > 0);
        assert_eq!(pos(&world, walker), Cell::new(3, 1));
        assert_eq!(pos(&world, blocker), Cell::new(4, 1));

        world.despawn(blocker).expect("known actor");
        run(&mut world, 6);
        assert_eq!(pos(&world, walker), Cell::new(8, 1));
    }

    #[test]
    fn refused_direct_step_is_retried_on_the_same_staircase() {
        let mut world = open_room(12, 5);
        let walker = world.spawn(Cell::new(1, 1), 1, Strategy::Direct).expect("open cell");
        let blocker = world.spawn(Cell::new(3, 1), 1, Strategy::Direct).expect("open cell");
        world.set_destination(walker, Cell::new(7, 2)).expect("known actor");

        assert_eq!(world.tick().moves.len(), 1);
        assert_eq!(world.tick().refused, 1);
        assert_eq!(pos(&world, walker), Cell::new(2, 1));

        world.despawn(blocker).expect("known actor");
        let mut steps = Vec::new();
        for _ in 0..8 {
            steps.extend(world.tick().moves.into_iter().map(|step| step.to));
        }
        let expected = [(3, 1), (4, 2), (5, 2), (6, 2), (7, 2)]
            .map(|(column, row)| Cell::new(column, row));
        assert_eq!(steps, expected);
    }

    #[test]
    fn follower_closes_in_and_then_holds_beside_its_leader() {
        let mut world = open_room(14, 10);
        let leader = world.spawn(Cell::new(10, 6), 1, Strategy::Direct).expect("open cell");
        let hunter = world.spawn(Cell::new(1, 1), 1, Strategy::AStar).expect("open cell");
        world.follow(hunter, leader).expect("known actors");

        run(&mut world, 20);
        let settled = pos(&world, hunter);
        assert_eq!(settled.chebyshev(pos(&world, leader)), 1);

        let report = world.tick();
        assert!(report.moves.is_empty());
        assert_eq!(pos(&world, hunter), settled);
    }

    #[test]
    fn follower_of_a_despawned_leader_goes_idle() {
        let mut world = open_room(10, 10);
        let leader = world.spawn(Cell::new(8, 8), 1, Strategy::Direct).expect("open cell");
        let hunter = world.spawn(Cell::new(1, 1), 1, Strategy::Direct).expect("open cell");
        world.follow(hunter, leader).expect("known actors");
        world.despawn(leader).expect("known actor");
        world.tick();
        assert_eq!(world.actor(hunter).map(|actor| actor.goal), Some(Goal::Idle));
        assert_eq!(world.follow(hunter, leader), Err(WorldError::UnknownActor));
        assert_eq!(world.set_destination(leader, Cell::new(2, 2)), Err(WorldError::UnknownActor));
    }
}
