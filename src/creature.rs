// --- File: creature.rs ---
use crate::config::CreatureConfig;
use crate::constants::{
    CREATURE_ID_LEN, DEFAULT_DEATH_GRACE_TICKS, FRAMES_TO_ACTION, SPRITE_HALF_EXTENT,
    TICKS_PER_FRAME,
};
use crate::error::{SimError, SimResult};
use crate::genetics::{Diet, Genetics};
use crate::snapshot::CreatureSnapshot;
use crate::utils::{random_sign, random_token};
use glam::Vec2;
use rand::Rng;
use std::fmt;

/// Opaque identity token assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatureId(String);

impl CreatureId {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_token(rng, CREATURE_ID_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BehaviorState {
    Idle,
    Walking,
    // Never picked by the random policy; reachable through `set_behavior`.
    Eating,
    Sleeping,
    // Terminal.
    Dying,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 5] = [
        BehaviorState::Idle,
        BehaviorState::Walking,
        BehaviorState::Eating,
        BehaviorState::Sleeping,
        BehaviorState::Dying,
    ];

    /// States in which a creature turns and may reproduce.
    pub fn is_roaming(self) -> bool {
        matches!(self, BehaviorState::Idle | BehaviorState::Walking)
    }

    pub fn is_terminal(self) -> bool {
        self == BehaviorState::Dying
    }
}

/// Requests a creature raises during `advance()` for its population to fulfil.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AdvanceOutcome {
    /// Where a child should be placed.
    pub spawn_at: Option<Vec2>,
    /// The dying phase has played out; remove this creature.
    pub expired: bool,
}

#[derive(Debug, Clone)]
pub struct Creature {
    id: CreatureId,
    diet: Diet,
    genetics: Genetics,
    death_grace_ticks: u32,

    age: u64,
    behavior_timer: u32,
    spawn_timer: u64,

    position: Vec2,
    heading: f32, // Degrees, 0 faces +y, clockwise toward +x
    speed: f32,
    scale: f32,

    behavior: BehaviorState,
    // Advances spent in `Dying`, the entry tick included.
    dying_ticks: u32,
    pending_turn: Option<f32>,
    expired: bool,
}

impl Creature {
    pub fn new<R: Rng + ?Sized>(
        genetics: Genetics,
        diet: Diet,
        position: Vec2,
        rng: &mut R,
    ) -> Self {
        Self {
            id: CreatureId::random(rng),
            diet,
            genetics,
            death_grace_ticks: DEFAULT_DEATH_GRACE_TICKS,
            age: 0,
            behavior_timer: 0,
            spawn_timer: 0,
            position,
            heading: 0.0,
            speed: 0.0,
            scale: genetics.scale_at(0),
            behavior: BehaviorState::Idle,
            dying_ticks: 0,
            pending_turn: None,
            expired: false,
        }
    }

    /// A creature with fresh random genetics and diet at `position`.
    pub fn spawn<R: Rng + ?Sized>(
        config: &CreatureConfig,
        position: Vec2,
        rng: &mut R,
    ) -> SimResult<Self> {
        let genetics = Genetics::random(config, rng)?;
        let diet = Diet::random(rng);
        Self::new(genetics, diet, position, rng).with_death_grace(config.death_grace_ticks)
    }

    /// Like `spawn`, but placed at the default position derived from the
    /// creature's own genetic size.
    pub fn seed<R: Rng + ?Sized>(config: &CreatureConfig, rng: &mut R) -> SimResult<Self> {
        let genetics = Genetics::random(config, rng)?;
        let diet = Diet::random(rng);
        let position = default_position(&genetics);
        Self::new(genetics, diet, position, rng).with_death_grace(config.death_grace_ticks)
    }

    pub fn with_death_grace(mut self, ticks: u32) -> SimResult<Self> {
        if ticks == 0 {
            return Err(SimError::InvalidConfig("death grace period must be at least 1 tick"));
        }
        self.death_grace_ticks = ticks;
        Ok(self)
    }

    // --- Accessors ---

    pub fn id(&self) -> &CreatureId {
        &self.id
    }
    pub fn diet(&self) -> Diet {
        self.diet
    }
    pub fn genetics(&self) -> &Genetics {
        &self.genetics
    }
    pub fn age(&self) -> u64 {
        self.age
    }
    pub fn behavior_timer(&self) -> u32 {
        self.behavior_timer
    }
    pub fn spawn_timer(&self) -> u64 {
        self.spawn_timer
    }
    pub fn position(&self) -> Vec2 {
        self.position
    }
    pub fn heading(&self) -> f32 {
        self.heading
    }
    pub fn speed(&self) -> f32 {
        self.speed
    }
    pub fn scale(&self) -> f32 {
        self.scale
    }
    pub fn behavior(&self) -> BehaviorState {
        self.behavior
    }
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            position: self.position,
            heading: self.heading,
            scale: self.scale,
            behavior: self.behavior,
            diet: self.diet,
        }
    }

    /// Index into an animation of `frame_count` frames for the current state.
    pub fn animation_frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        (self.behavior_timer / TICKS_PER_FRAME) as usize % frame_count
    }

    // --- Host controls ---

    /// Forces a behavior. Leaving `Dying` is refused.
    pub fn set_behavior(&mut self, next: BehaviorState) -> SimResult<()> {
        if self.behavior.is_terminal() && !next.is_terminal() {
            return Err(SimError::InvariantViolation("a dying creature cannot recover"));
        }
        self.enter(next);
        Ok(())
    }

    /// Replaces the random turn of the next roaming tick with `degrees`.
    /// The override waits through Eating and Sleeping ticks.
    pub fn steer(&mut self, degrees: f32) {
        self.pending_turn = Some(degrees);
    }

    // --- Per-tick update ---

    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<AdvanceOutcome> {
        if self.expired {
            return Err(SimError::InvariantViolation(
                "advanced a creature that already left its population",
            ));
        }
        let mut outcome = AdvanceOutcome::default();

        self.scale = self.genetics.scale_at(self.age);
        let state_changed = self.select_action(rng);
        self.speed = if self.behavior == BehaviorState::Walking {
            self.genetics.max_speed()
        } else {
            0.0
        };

        let roaming = self.behavior.is_roaming();
        let turn = if roaming {
            self.pending_turn
                .take()
                .unwrap_or_else(|| random_sign(rng, self.genetics.max_turn_rate()))
        } else {
            0.0
        };
        self.integrate(turn);

        // Gate on the tick count including this one.
        if roaming && self.genetics.is_spawn_tick(self.spawn_timer + 1) {
            outcome.spawn_at = Some(self.position);
        }

        if self.behavior.is_terminal() {
            self.dying_ticks = self.dying_ticks.saturating_add(1);
            if self.dying_ticks >= self.death_grace_ticks {
                self.expired = true;
                outcome.expired = true;
            }
        }

        self.age += 1;
        self.spawn_timer += 1;
        if !state_changed {
            self.behavior_timer = self.behavior_timer.saturating_add(1);
        }
        Ok(outcome)
    }

    // Returns true when the behavior changed (and its timer was reset).
    fn select_action<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.age >= self.genetics.max_lifespan() as u64 {
            return self.enter(BehaviorState::Dying);
        }
        if self.behavior.is_terminal() {
            return false;
        }
        if self.behavior_timer.saturating_add(1) % FRAMES_TO_ACTION != 0 {
            return false;
        }
        let next = if rng.gen_bool(0.5) {
            BehaviorState::Walking
        } else {
            BehaviorState::Idle
        };
        self.enter(next)
    }

    fn enter(&mut self, next: BehaviorState) -> bool {
        if self.behavior == next {
            return false;
        }
        self.behavior = next;
        self.behavior_timer = 0;
        true
    }

    fn integrate(&mut self, turn: f32) {
        // Movement uses the heading from the start of the tick.
        let heading_rad = self.heading.to_radians();
        self.heading = (self.heading + turn).rem_euclid(360.0);
        self.position.x += -self.speed * heading_rad.sin();
        self.position.y += self.speed * heading_rad.cos();
    }

    pub(crate) fn regenerate_id<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.id = CreatureId::random(rng);
    }
}

pub fn default_position(genetics: &Genetics) -> Vec2 {
    Vec2::splat(SPRITE_HALF_EXTENT * genetics.max_size())
}

// --- End of File: creature.rs ---
