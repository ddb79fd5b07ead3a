// --- File: constants.rs ---
// --- Global Simulation Constants ---

// Ticks a behavior is held before the random policy picks the next one.
pub const FRAMES_TO_ACTION: u32 = 24;
// Ticks each animation frame stays on screen.
pub const TICKS_PER_FRAME: u32 = 12;
// Frames in the dying animation; the default grace period plays it once.
pub const DYING_FRAME_COUNT: u32 = 4;
pub const DEFAULT_DEATH_GRACE_TICKS: u32 = DYING_FRAME_COUNT * TICKS_PER_FRAME;

// Half the sprite edge in world units at scale 1.0. Seeded creatures start at
// (SPRITE_HALF_EXTENT * max_size, SPRITE_HALF_EXTENT * max_size).
pub const SPRITE_HALF_EXTENT: f32 = 32.0;

pub const CREATURE_ID_LEN: usize = 8;

pub const INITIAL_CREATURE_COUNT: usize = 1;
pub const MAX_CREATURES: usize = 10_000;

pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;
pub const REPORT_INTERVAL_TICKS: u64 = 240;

// --- End of File: constants.rs ---
