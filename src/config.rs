// --- File: config.rs ---
use crate::constants::{DEFAULT_DEATH_GRACE_TICKS, INITIAL_CREATURE_COUNT, MAX_CREATURES};
use crate::error::{SimError, SimResult};

/// Ranges the genetics of every new creature are drawn from, plus the
/// core-owned timing for the dying phase.
#[derive(Debug, Clone)]
pub struct CreatureConfig {
    pub min_spawn_interval: u32,
    pub max_spawn_interval: u32,
    pub min_lifespan: u32,
    pub max_lifespan: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    // Degrees per tick.
    pub min_turn_rate: f32,
    pub max_turn_rate: f32,
    pub min_size: f32,
    pub max_size: f32,
    // Ticks a dying creature lingers before it is removed.
    pub death_grace_ticks: u32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            min_spawn_interval: 600,
            max_spawn_interval: 1200,
            min_lifespan: 1800,
            max_lifespan: 3600,
            min_speed: 0.5,
            max_speed: 2.0,
            min_turn_rate: 1.0,
            max_turn_rate: 4.0,
            min_size: 0.3,
            max_size: 0.6,
            death_grace_ticks: DEFAULT_DEATH_GRACE_TICKS,
        }
    }
}

impl CreatureConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.min_spawn_interval == 0 {
            return Err(SimError::InvalidConfig("spawn interval must be at least 1 tick"));
        }
        if self.min_spawn_interval > self.max_spawn_interval {
            return Err(SimError::InvalidConfig("spawn interval range is empty"));
        }
        if self.min_lifespan > self.max_lifespan {
            return Err(SimError::InvalidConfig("lifespan range is empty"));
        }
        check_positive_range(self.min_speed, self.max_speed, "speed range must be positive")?;
        check_positive_range(
            self.min_turn_rate,
            self.max_turn_rate,
            "turn rate range must be positive",
        )?;
        check_positive_range(self.min_size, self.max_size, "size range must be positive")?;
        if self.death_grace_ticks == 0 {
            return Err(SimError::InvalidConfig("death grace period must be at least 1 tick"));
        }
        Ok(())
    }
}

fn check_positive_range(min: f32, max: f32, reason: &'static str) -> SimResult<()> {
    if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
        return Err(SimError::InvalidConfig(reason));
    }
    Ok(())
}

/// What happens to new creatures once the population reaches its cap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CapPolicy {
    /// Drop the newcomer.
    #[default]
    RejectNew,
    /// Evict the oldest inserted members to make room.
    EvictOldest,
}

#[derive(Debug, Clone)]
pub struct PopulationConfig {
    pub initial_count: usize,
    pub max_creatures: usize,
    pub cap_policy: CapPolicy,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_CREATURE_COUNT,
            max_creatures: MAX_CREATURES,
            cap_policy: CapPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub creature: CreatureConfig,
    pub population: PopulationConfig,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_creatures(mut self, max_creatures: usize, cap_policy: CapPolicy) -> Self {
        self.population.max_creatures = max_creatures;
        self.population.cap_policy = cap_policy;
        self
    }

    pub fn with_initial_count(mut self, initial_count: usize) -> Self {
        self.population.initial_count = initial_count;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        self.creature.validate()?;
        if self.population.max_creatures == 0 {
            return Err(SimError::InvalidConfig("population cap must be at least 1"));
        }
        Ok(())
    }
}

// --- End of File: config.rs ---
