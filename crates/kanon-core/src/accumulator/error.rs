use crate::identity::IdentifyError;
use thiserror::Error as ThisError;

///
/// AccumulatorError
///
/// Typed failures of one accumulator operation. Every variant is raised
/// before the table is mutated, so a failed call leaves prior state intact.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AccumulatorError {
    #[error(transparent)]
    Identify(#[from] IdentifyError),

    #[error("row arity mismatch: expected {expected} columns, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("unsupported partial state: {reason}")]
    UnsupportedPartial { reason: String },

    #[error("frequency table group limit exceeded: attempted={attempted}, limit={limit}")]
    GroupLimitExceeded { attempted: u64, limit: u64 },

    #[error("frequency count overflow for signature {signature}")]
    CountOverflow { signature: String },
}

impl AccumulatorError {
    pub(crate) fn unsupported_partial(reason: impl Into<String>) -> Self {
        Self::UnsupportedPartial {
            reason: reason.into(),
        }
    }
}
