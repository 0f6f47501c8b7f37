use crate::identity::{HashAlgorithm, RowSignature};
use std::fmt;

///
/// IdentifierStrategy
///
/// Injected derivation from a canonical row byte string to a row signature.
/// Implementations must be deterministic across calls, threads, and
/// processes: merge correctness depends on signature equality alone.
///

pub trait IdentifierStrategy: fmt::Debug + Send + Sync {
    /// Stable name stamped into exported partial state.
    fn name(&self) -> &str;

    /// Derive the signature for one canonical row.
    fn derive(&self, canonical: &[u8]) -> RowSignature;

    /// Whether `encoded` could have been produced by this strategy.
    fn accepts(&self, encoded: &str) -> bool {
        !encoded.is_empty()
    }
}

impl IdentifierStrategy for HashAlgorithm {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn derive(&self, canonical: &[u8]) -> RowSignature {
        RowSignature::from_encoded(self.digest_hex(canonical))
    }

    fn accepts(&self, encoded: &str) -> bool {
        self.is_well_formed(encoded)
    }
}

///
/// FnStrategy
///
/// Adapts a plain function into an `IdentifierStrategy`. Any
/// collision-resistant deterministic string function qualifies.
///

pub struct FnStrategy<F> {
    name: String,
    derive: F,
}

impl<F> FnStrategy<F>
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    pub fn new(name: impl Into<String>, derive: F) -> Self {
        Self {
            name: name.into(),
            derive,
        }
    }
}

impl<F> fmt::Debug for FnStrategy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> IdentifierStrategy for FnStrategy<F>
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn derive(&self, canonical: &[u8]) -> RowSignature {
        RowSignature::from_encoded((self.derive)(canonical))
    }
}
