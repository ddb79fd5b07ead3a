//! Creature behavior and population lifecycle engine for the Evolver
//! artificial-life toy.
//!
//! A host drives [`Population::tick`] once per frame and draws the
//! [`CreatureSnapshot`]s it reads back.

pub mod config;
pub mod constants;
pub mod creature;
pub mod error;
pub mod genetics;
pub mod population;
pub mod snapshot;
pub mod utils;

pub use config::{CapPolicy, CreatureConfig, PopulationConfig, SimulationConfig};
pub use creature::{AdvanceOutcome, BehaviorState, Creature, CreatureId};
pub use error::{SimError, SimResult};
pub use genetics::{Diet, Genetics};
pub use population::{BehaviorCounts, DietCounts, Population, SimRng, TickReport};
pub use snapshot::{CreatureInstance, CreatureSnapshot};
