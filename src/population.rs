// --- File: population.rs ---
use crate::config::{CapPolicy, SimulationConfig};
use crate::creature::{BehaviorState, Creature, CreatureId};
use crate::error::{SimError, SimResult};
use crate::genetics::Diet;
use crate::snapshot::{CreatureInstance, CreatureSnapshot};
use glam::Vec2;
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

pub type SimRng = StdRng;

/// What happened during one `Population::tick`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: usize,
    pub spawned: usize,
    pub removed: usize,
    // Spawns dropped by `CapPolicy::RejectNew`.
    pub rejected: usize,
    // Members pushed out by `CapPolicy::EvictOldest`.
    pub evicted: usize,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DietCounts {
    pub herbivore: usize,
    pub carnivorous: usize,
    pub sun: usize,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BehaviorCounts {
    pub idle: usize,
    pub walking: usize,
    pub eating: usize,
    pub sleeping: usize,
    pub dying: usize,
}

enum Admission {
    Added { evicted: usize },
    Rejected,
}

/// Ordered owner of every live creature.
pub struct Population {
    creatures: Vec<Creature>,
    ids: HashSet<CreatureId>,
    rng: SimRng,
    config: SimulationConfig,
    tick_count: u64,
    // Reused between ticks
    spawn_buffer: Vec<Vec2>,
}

impl Population {
    /// An empty population drawing randomness from `rng`.
    pub fn new(config: SimulationConfig, rng: SimRng) -> SimResult<Self> {
        config.validate()?;
        let capacity = config
            .population
            .initial_count
            .max(256)
            .min(config.population.max_creatures);
        Ok(Self {
            creatures: Vec::with_capacity(capacity),
            ids: HashSet::with_capacity(capacity),
            rng,
            config,
            tick_count: 0,
            spawn_buffer: Vec::new(),
        })
    }

    pub fn from_entropy(config: SimulationConfig) -> SimResult<Self> {
        Self::new(config, SimRng::from_entropy())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    // --- Seeding ---

    /// Adds `count` creatures at their size-derived default positions.
    /// Returns how many were admitted under the cap.
    pub fn seed(&mut self, count: usize) -> SimResult<usize> {
        let mut added = 0;
        for _ in 0..count {
            let creature = Creature::seed(&self.config.creature, &mut self.rng)?;
            if let Admission::Added { .. } = self.admit_fresh(creature) {
                added += 1;
            }
        }
        debug!("Seeded {} of {} creatures", added, count);
        Ok(added)
    }

    /// Adds one creature at each of `positions`.
    pub fn seed_at(&mut self, positions: &[Vec2]) -> SimResult<usize> {
        let mut added = 0;
        for &position in positions {
            let creature = Creature::spawn(&self.config.creature, position, &mut self.rng)?;
            if let Admission::Added { .. } = self.admit_fresh(creature) {
                added += 1;
            }
        }
        debug!("Seeded {} of {} creatures at explicit positions", added, positions.len());
        Ok(added)
    }

    /// Host-triggered extra creature at `position`.
    pub fn spawn_at(&mut self, position: Vec2) -> SimResult<CreatureId> {
        let creature = Creature::spawn(&self.config.creature, position, &mut self.rng)?;
        let id = creature.id().clone();
        self.append(creature)?;
        Ok(id)
    }

    /// Clears the population and seeds the configured initial count.
    pub fn restart(&mut self) -> SimResult<usize> {
        self.creatures.clear();
        self.ids.clear();
        self.spawn_buffer.clear();
        self.tick_count = 0;
        self.seed(self.config.population.initial_count)
    }

    // --- Membership ---

    /// Appends `creature` at the end of the population.
    pub fn append(&mut self, creature: Creature) -> SimResult<()> {
        if creature.is_expired() {
            return Err(SimError::InvariantViolation(
                "cannot append a creature that already expired",
            ));
        }
        if self.ids.contains(creature.id()) {
            return Err(SimError::DuplicateCreature(creature.id().clone()));
        }
        match self.admit(creature) {
            Admission::Added { .. } => Ok(()),
            Admission::Rejected => Err(SimError::PopulationFull {
                capacity: self.config.population.max_creatures,
            }),
        }
    }

    // Like `append`, but a full population is not an error and id collisions
    // between freshly drawn tokens are resolved by redrawing.
    fn admit_fresh(&mut self, mut creature: Creature) -> Admission {
        while self.ids.contains(creature.id()) {
            creature.regenerate_id(&mut self.rng);
        }
        self.admit(creature)
    }

    fn admit(&mut self, creature: Creature) -> Admission {
        let capacity = self.config.population.max_creatures;
        let mut evicted = 0;
        if self.creatures.len() >= capacity {
            match self.config.population.cap_policy {
                CapPolicy::RejectNew => return Admission::Rejected,
                CapPolicy::EvictOldest => {
                    let excess = self.creatures.len() + 1 - capacity;
                    for old in self.creatures.drain(..excess) {
                        trace!("Evicted creature {}", old.id());
                        self.ids.remove(old.id());
                    }
                    evicted = excess;
                }
            }
        }
        self.ids.insert(creature.id().clone());
        self.creatures.push(creature);
        Admission::Added { evicted }
    }

    // --- Host control ---
    // Members are only reachable by id so the id index cannot drift.

    /// Forces the member `id` into `next`; see `Creature::set_behavior`.
    pub fn set_behavior(&mut self, id: &CreatureId, next: BehaviorState) -> SimResult<()> {
        self.member_mut(id)?.set_behavior(next)
    }

    /// Overrides the next roaming turn of the member `id`.
    pub fn steer(&mut self, id: &CreatureId, degrees: f32) -> SimResult<()> {
        self.member_mut(id)?.steer(degrees);
        Ok(())
    }

    fn member_mut(&mut self, id: &CreatureId) -> SimResult<&mut Creature> {
        self.creatures
            .iter_mut()
            .find(|creature| creature.id() == id)
            .ok_or_else(|| SimError::UnknownCreature(id.clone()))
    }

    // --- Simulation step ---

    /// Advances every member once. Children spawned during the tick join
    /// after the traversal; expired members are removed before returning.
    pub fn tick(&mut self) -> SimResult<TickReport> {
        // Nothing is mutated unless every member can be advanced.
        if self.creatures.iter().any(Creature::is_expired) {
            return Err(SimError::InvariantViolation(
                "population holds a creature that already expired",
            ));
        }

        let mut report = TickReport::default();
        self.spawn_buffer.clear();

        // --- Traversal: collect requests ---
        for creature in self.creatures.iter_mut() {
            let outcome = creature.advance(&mut self.rng)?;
            report.advanced += 1;
            if let Some(position) = outcome.spawn_at {
                self.spawn_buffer.push(position);
            }
        }

        // --- Apply Removals ---
        let before = self.creatures.len();
        let ids = &mut self.ids;
        self.creatures.retain(|creature| {
            if creature.is_expired() {
                trace!("Creature {} died at age {}", creature.id(), creature.age());
                ids.remove(creature.id());
                false
            } else {
                true
            }
        });
        report.removed = before - self.creatures.len();

        // --- Apply Spawns ---
        let mut spawns = std::mem::take(&mut self.spawn_buffer);
        for position in spawns.drain(..) {
            let child = Creature::spawn(&self.config.creature, position, &mut self.rng)?;
            match self.admit_fresh(child) {
                Admission::Added { evicted } => {
                    trace!("Creature born at {:?}", position);
                    report.spawned += 1;
                    report.evicted += evicted;
                }
                Admission::Rejected => report.rejected += 1,
            }
        }
        self.spawn_buffer = spawns;

        if report.rejected > 0 {
            warn!(
                "Population cap of {} reached, dropped {} spawns",
                self.config.population.max_creatures, report.rejected
            );
        }
        if report.evicted > 0 {
            debug!("Evicted {} oldest creatures to stay under the cap", report.evicted);
        }

        self.tick_count += 1;
        Ok(report)
    }

    // --- Queries ---

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Creature> {
        self.creatures.iter()
    }

    pub fn get(&self, id: &CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|creature| creature.id() == id)
    }

    pub fn contains(&self, id: &CreatureId) -> bool {
        self.ids.contains(id)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = CreatureSnapshot> + '_ {
        self.creatures.iter().map(Creature::snapshot)
    }

    /// Instance records for a renderer; `frame_count` gives the length of the
    /// animation table for each behavior.
    pub fn instances<F>(&self, frame_count: F) -> Vec<CreatureInstance>
    where
        F: Fn(BehaviorState) -> usize,
    {
        self.creatures
            .iter()
            .map(|creature| {
                let frame = creature.animation_frame(frame_count(creature.behavior()));
                CreatureInstance::new(&creature.snapshot(), frame)
            })
            .collect()
    }

    pub fn diet_counts(&self) -> DietCounts {
        let mut counts = DietCounts::default();
        for creature in &self.creatures {
            match creature.diet() {
                Diet::Herbivore => counts.herbivore += 1,
                Diet::Carnivorous => counts.carnivorous += 1,
                Diet::Sun => counts.sun += 1,
            }
        }
        counts
    }

    pub fn behavior_counts(&self) -> BehaviorCounts {
        let mut counts = BehaviorCounts::default();
        for creature in &self.creatures {
            match creature.behavior() {
                BehaviorState::Idle => counts.idle += 1,
                BehaviorState::Walking => counts.walking += 1,
                BehaviorState::Eating => counts.eating += 1,
                BehaviorState::Sleeping => counts.sleeping += 1,
                BehaviorState::Dying => counts.dying += 1,
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Creature;
    type IntoIter = std::slice::Iter<'a, Creature>;

    fn into_iter(self) -> Self::IntoIter {
        self.creatures.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::Genetics;

    fn population(max_creatures: usize, cap_policy: CapPolicy) -> Population {
        let config = SimulationConfig::new().with_max_creatures(max_creatures, cap_policy);
        Population::new(config, SimRng::seed_from_u64(42)).unwrap()
    }

    fn creature(pop: &mut Population, spawn_interval: u32, max_lifespan: u32) -> Creature {
        let genetics = Genetics::new(spawn_interval, max_lifespan, 1.0, 2.0, 0.5).unwrap();
        Creature::new(genetics, Diet::Herbivore, Vec2::ZERO, pop.rng_mut())
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut pop = population(10, CapPolicy::RejectNew);
        let first = creature(&mut pop, 50, 500);
        let second = creature(&mut pop, 50, 500);
        let ids = [first.id().clone(), second.id().clone()];
        pop.append(first).unwrap();
        pop.append(second).unwrap();
        let order: Vec<_> = pop.iter().map(|c| c.id().clone()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let mut pop = population(10, CapPolicy::RejectNew);
        let original = creature(&mut pop, 50, 500);
        let copy = original.clone();
        pop.append(original).unwrap();
        assert!(matches!(pop.append(copy), Err(SimError::DuplicateCreature(_))));
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn reject_new_policy_refuses_appends_at_capacity() {
        let mut pop = population(2, CapPolicy::RejectNew);
        assert_eq!(pop.seed(5).unwrap(), 2);
        let extra = creature(&mut pop, 50, 500);
        assert_eq!(
            pop.append(extra),
            Err(SimError::PopulationFull { capacity: 2 })
        );
    }

    #[test]
    fn evict_oldest_policy_makes_room() {
        let mut pop = population(2, CapPolicy::EvictOldest);
        let a = creature(&mut pop, 50, 500);
        let b = creature(&mut pop, 50, 500);
        let c = creature(&mut pop, 50, 500);
        let (a_id, b_id, c_id) = (a.id().clone(), b.id().clone(), c.id().clone());
        pop.append(a).unwrap();
        pop.append(b).unwrap();
        pop.append(c).unwrap();
        assert_eq!(pop.len(), 2);
        assert!(!pop.contains(&a_id));
        assert!(pop.contains(&b_id) && pop.contains(&c_id));
    }

    #[test]
    fn spawns_beyond_cap_are_rejected_and_reported() {
        let mut pop = population(1, CapPolicy::RejectNew);
        let parent = creature(&mut pop, 1, 500);
        pop.append(parent).unwrap();
        let report = pop.tick().unwrap();
        assert_eq!(report.spawned, 0);
        assert_eq!(report.rejected, 1);
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn spawns_beyond_cap_evict_the_parent_under_evict_oldest() {
        let mut pop = population(1, CapPolicy::EvictOldest);
        let parent = creature(&mut pop, 1, 500);
        let parent_id = parent.id().clone();
        pop.append(parent).unwrap();
        let report = pop.tick().unwrap();
        assert_eq!(report.spawned, 1);
        assert_eq!(report.evicted, 1);
        assert_eq!(pop.len(), 1);
        assert!(!pop.contains(&parent_id));
        assert_eq!(pop.iter().next().unwrap().age(), 0);
    }

    #[test]
    fn tick_refuses_expired_members_without_mutating() {
        let mut pop = population(10, CapPolicy::RejectNew);
        let healthy = creature(&mut pop, 50, 500);
        let healthy_id = healthy.id().clone();
        pop.append(healthy).unwrap();

        let mut doomed = creature(&mut pop, 50, 0).with_death_grace(1).unwrap();
        assert!(doomed.advance(pop.rng_mut()).unwrap().expired);
        assert!(pop.append(doomed).is_err());

        // Only reachable from inside the module.
        let mut doomed = creature(&mut pop, 50, 0).with_death_grace(1).unwrap();
        pop.append(doomed.clone()).unwrap();
        doomed.advance(pop.rng_mut()).unwrap();
        if let Some(slot) = pop.creatures.last_mut() {
            *slot = doomed;
        }

        assert!(matches!(pop.tick(), Err(SimError::InvariantViolation(_))));
        assert_eq!(pop.get(&healthy_id).unwrap().age(), 0);
        assert_eq!(pop.tick_count(), 0);
    }

    #[test]
    fn restart_reseeds_initial_count() {
        let config = SimulationConfig::new().with_initial_count(3);
        let mut pop = Population::new(config, SimRng::seed_from_u64(9)).unwrap();
        pop.seed(5).unwrap();
        pop.tick().unwrap();
        assert_eq!(pop.restart().unwrap(), 3);
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.tick_count(), 0);
        assert!(pop.iter().all(|c| c.age() == 0));
    }

    #[test]
    fn counts_and_instances_cover_every_member() {
        let mut pop = population(100, CapPolicy::RejectNew);
        pop.seed(30).unwrap();
        let diets = pop.diet_counts();
        assert_eq!(diets.herbivore + diets.carnivorous + diets.sun, 30);
        let behaviors = pop.behavior_counts();
        assert_eq!(behaviors.idle, 30);
        assert_eq!(behaviors.walking + behaviors.dying, 0);
        let instances = pop.instances(|_| 4);
        assert_eq!(instances.len(), 30);
        assert!(instances.iter().all(|instance| instance.frame == 0));
        assert_eq!(pop.snapshots().count(), 30);
    }

    #[test]
    fn host_control_goes_through_ids_and_keeps_the_index_whole() {
        let mut pop = population(10, CapPolicy::RejectNew);
        pop.seed(3).unwrap();
        let ids: Vec<CreatureId> = pop.iter().map(|c| c.id().clone()).collect();

        pop.set_behavior(&ids[1], BehaviorState::Sleeping).unwrap();
        pop.steer(&ids[2], 30.0).unwrap();
        assert_eq!(pop.get(&ids[1]).unwrap().behavior(), BehaviorState::Sleeping);

        let stranger = creature(&mut pop, 50, 500);
        let stranger_id = stranger.id().clone();
        assert_eq!(
            pop.set_behavior(&stranger_id, BehaviorState::Walking),
            Err(SimError::UnknownCreature(stranger_id.clone()))
        );
        assert!(pop.steer(&stranger_id, 5.0).is_err());

        // Every live member is indexed and clones of members stay out.
        for creature in pop.iter() {
            assert!(pop.contains(creature.id()));
        }
        let copy = pop.get(&ids[0]).unwrap().clone();
        assert!(matches!(pop.append(copy), Err(SimError::DuplicateCreature(_))));
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.ids.len(), pop.len());
    }

    #[test]
    fn dying_members_stay_dying() {
        let mut pop = population(10, CapPolicy::RejectNew);
        let doomed = creature(&mut pop, 50, 0);
        let id = doomed.id().clone();
        pop.append(doomed).unwrap();
        pop.tick().unwrap();
        assert!(pop.set_behavior(&id, BehaviorState::Idle).is_err());
        assert_eq!(pop.get(&id).unwrap().behavior(), BehaviorState::Dying);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimulationConfig::new();
        config.creature.max_size = -1.0;
        assert!(Population::new(config, SimRng::seed_from_u64(0)).is_err());
    }
}
// --- End of File: population.rs ---
