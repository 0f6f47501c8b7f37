//! Module: accumulator
//! Responsibility: per-partition frequency counting, partial export, and merge.
//! Does not own: phase/mode policy (see `driver`) or signature derivation.
//! Boundary: single-writer state handed between partitions only as `PartialState`.

mod error;
mod frequency;
mod partial;
mod record;


pub use error::AccumulatorError;
pub use frequency::{FrequencyTable, GroupLimits, MergeOutcome};
pub use partial::{PARTIAL_STATE_VERSION, PartialState};
pub use record::FrequencyRecord;
