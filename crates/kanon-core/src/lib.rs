//! Core runtime for Kanon: row identity, frequency accumulation, and the
//! partition/merge/finalize driver that computes the minimum equivalence-class
//! size of a dataset, plus the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod accumulator;
pub mod config;
pub mod driver;
pub mod error;
pub mod identity;
pub mod obs;
pub mod serialize;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, serializers, or metrics helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        accumulator::{FrequencyTable, PartialState},
        config::KAnonymityConfig,
        driver::{AggregateMode, AggregatePhase, AggregationResult, KAnonymityDriver},
        identity::{HashAlgorithm, IdentifierStrategy, RowIdentifier, RowSignature},
        value::Value,
    };
}
