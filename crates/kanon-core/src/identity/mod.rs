//! Module: identity
//! Responsibility: derive one stable row signature from an ordered column tuple.
//! Does not own: counting, merging, or phase orchestration.
//! Boundary: pure derivation consumed by the frequency accumulator.

mod algorithm;
mod identifier;
mod layout;
mod signature;
mod strategy;

#[cfg(test)]
mod tests;

pub use algorithm::HashAlgorithm;
pub use identifier::RowIdentifier;
pub use layout::SignatureLayout;
pub use signature::RowSignature;
pub use strategy::{FnStrategy, IdentifierStrategy};

use crate::value::Value;
use thiserror::Error as ThisError;

///
/// IdentifyError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IdentifyError {
    #[error("row identifier requires at least one column")]
    EmptyRow,

    #[error("identifier strategy '{strategy}' produced a signature it does not accept: {signature}")]
    MalformedSignature { strategy: String, signature: String },
}

/// Derive a row signature with the default identifier.
pub fn identify(columns: &[Value]) -> Result<RowSignature, IdentifyError> {
    RowIdentifier::default().identify(columns)
}
