//! ## Crate layout
//! - `core`: row identity, frequency tables, partial states, the aggregation
//!   driver, configuration, and observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module mirrors the surface a host engine needs to wire the
//! aggregate into its partition and combine stages.

pub use kanon_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

use kanon_core::{config::KAnonymityConfig, value::Value};

/// Minimum equivalence-class size of `rows` on a single node.
///
/// `Ok(None)` means no rows were observed.
pub fn min_frequency<I, R>(rows: I, config: &KAnonymityConfig) -> Result<Option<u64>, Error>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[Value]>,
{
    kanon_core::driver::min_frequency(rows, config).map_err(Error::from)
}

/// Minimum equivalence-class size of partitioned `rows`, computed through
/// encoded partial states and a single combiner.
pub fn min_frequency_partitioned<P, I, R>(
    partitions: P,
    config: &KAnonymityConfig,
) -> Result<Option<u64>, Error>
where
    P: IntoIterator<Item = I>,
    I: IntoIterator<Item = R>,
    R: AsRef<[Value]>,
{
    kanon_core::driver::min_frequency_partitioned(partitions, config).map_err(Error::from)
}

/// Parse a TOML aggregation config, surfacing failures as [`Error`].
pub fn load_config(source: &str) -> Result<KAnonymityConfig, Error> {
    KAnonymityConfig::from_toml_str(source).map_err(Error::from)
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            accumulator::{FrequencyTable, GroupLimits, PartialState},
            config::KAnonymityConfig,
            driver::{AggregateMode, AggregatePhase, AggregationResult, KAnonymityDriver},
            identity::{
                FnStrategy, HashAlgorithm, IdentifierStrategy as _, RowIdentifier, RowSignature,
                SignatureLayout,
            },
            value::Value,
        },
        error::Error,
    };
}
