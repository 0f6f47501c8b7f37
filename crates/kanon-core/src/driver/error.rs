use crate::{
    accumulator::AccumulatorError,
    driver::{AggregateMode, AggregatePhase, PhaseOp},
    serialize::SerializeError,
};
use thiserror::Error as ThisError;

///
/// DriverError
///
/// Typed failure surface of `KAnonymityDriver`. Mode and phase violations
/// are caller contract errors; the driver state is untouched when they fire.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DriverError {
    #[error("{operation} is not available in {mode} mode")]
    ModeViolation {
        mode: AggregateMode,
        operation: PhaseOp,
    },

    #[error("{operation} is not allowed in phase {phase}")]
    PhaseViolation {
        phase: AggregatePhase,
        operation: PhaseOp,
    },

    #[error(transparent)]
    Accumulator(#[from] AccumulatorError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}
