use crate::{
    accumulator::AccumulatorError, config::ConfigError, driver::DriverError,
    identity::IdentifyError, serialize::SerializeError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Module errors stay typed at their own boundary and collapse into this
/// shape only when they cross into the facade or a host engine.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a driver-origin invariant violation.
    pub(crate) fn driver_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Driver,
            message.into(),
        )
    }

    /// Construct an accumulator-origin invalid-input error.
    pub(crate) fn accumulator_invalid(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvalidInput,
            ErrorOrigin::Accumulator,
            message.into(),
        )
    }

    /// Construct an accumulator-origin unsupported error.
    pub(crate) fn accumulator_unsupported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Accumulator,
            message.into(),
        )
    }

    /// Construct an accumulator-origin limit error.
    pub(crate) fn accumulator_limit(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::LimitExceeded,
            ErrorOrigin::Accumulator,
            message.into(),
        )
    }

    /// Construct a serialize-origin internal error.
    pub(crate) fn serialize_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Serialize, message.into())
    }

    /// Construct a serialize-origin limit error.
    pub(crate) fn serialize_limit(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::LimitExceeded,
            ErrorOrigin::Serialize,
            message.into(),
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<IdentifyError> for InternalError {
    fn from(err: IdentifyError) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Identity, err.to_string())
    }
}

impl From<AccumulatorError> for InternalError {
    fn from(err: AccumulatorError) -> Self {
        match err {
            AccumulatorError::Identify(inner) => inner.into(),
            AccumulatorError::ArityMismatch { .. } => Self::accumulator_invalid(err.to_string()),
            AccumulatorError::UnsupportedPartial { .. } => {
                Self::accumulator_unsupported(err.to_string())
            }
            AccumulatorError::GroupLimitExceeded { .. } | AccumulatorError::CountOverflow { .. } => {
                Self::accumulator_limit(err.to_string())
            }
        }
    }
}

impl From<SerializeError> for InternalError {
    fn from(err: SerializeError) -> Self {
        match err {
            SerializeError::DeserializeSizeLimitExceeded { .. } => {
                Self::serialize_limit(err.to_string())
            }
            SerializeError::Serialize(_) | SerializeError::Deserialize(_) => {
                Self::serialize_internal(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Config, err.to_string())
    }
}

impl From<DriverError> for InternalError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::Accumulator(inner) => inner.into(),
            DriverError::Serialize(inner) => inner.into(),
            DriverError::ModeViolation { .. } | DriverError::PhaseViolation { .. } => {
                Self::driver_invariant(err.to_string())
            }
        }
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Internal,
    InvalidInput,
    InvariantViolation,
    LimitExceeded,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "internal",
            Self::InvalidInput => "invalid_input",
            Self::InvariantViolation => "invariant_violation",
            Self::LimitExceeded => "limit_exceeded",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Accumulator,
    Config,
    Driver,
    Identity,
    Serialize,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Accumulator => "accumulator",
            Self::Config => "config",
            Self::Driver => "driver",
            Self::Identity => "identity",
            Self::Serialize => "serialize",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
