//! Module: driver
//! Responsibility: phase orchestration of one logical min-frequency aggregation.
//! Does not own: counting or merge arithmetic (see `accumulator`).
//! Boundary: the only surface a host engine drives per partition/combiner.

mod error;
mod kanonymity;
mod mode;
mod phase;
mod pipeline;


pub use error::DriverError;
pub use kanonymity::{AggregationResult, KAnonymityDriver};
pub use mode::AggregateMode;
pub use phase::{AggregatePhase, PhaseOp};
pub use pipeline::{min_frequency, min_frequency_partitioned};
