use crate::creature::CreatureId;
use thiserror::Error;

/// Errors raised while building or advancing the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A genetic value fell outside its strictly positive, finite range.
    #[error("invalid genetics: {field} = {value}")]
    InvalidGenetics { field: &'static str, value: f64 },
    /// A configuration value that can never produce valid creatures.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Internal state that correct callers can never reach.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
    #[error("creature {0} is already in the population")]
    DuplicateCreature(CreatureId),
    #[error("creature {0} is not in the population")]
    UnknownCreature(CreatureId),
    #[error("population is full ({capacity} creatures)")]
    PopulationFull { capacity: usize },
}

pub type SimResult<T> = Result<T, SimError>;
