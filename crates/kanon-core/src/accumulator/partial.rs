use crate::{
    identity::RowSignature,
    serialize::{SerializeError, deserialize_bounded, serialize},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partial-state format version. Bump on any shape change.
pub const PARTIAL_STATE_VERSION: u8 = 2;

///
/// PartialState
///
/// Immutable snapshot of one accumulator's counts, shipped from a partition
/// to a merging accumulator. Independent of the source table once built.
/// The identifier fingerprint and row arity travel with the entries so a
/// combiner can refuse signatures derived from differently framed rows.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PartialState {
    version: u8,
    identifier: String,
    #[serde(default)]
    arity: Option<usize>,
    entries: BTreeMap<RowSignature, u64>,
}

impl PartialState {
    /// Build a current-version partial from plain key/count pairs.
    ///
    /// `identifier` is the producing `RowIdentifier::fingerprint`.
    pub fn from_entries(
        identifier: impl Into<String>,
        entries: impl IntoIterator<Item = (RowSignature, u64)>,
    ) -> Self {
        Self {
            version: PARTIAL_STATE_VERSION,
            identifier: identifier.into(),
            arity: None,
            entries: entries.into_iter().collect(),
        }
    }

    /// Stamp the column count the producing table enforced.
    #[must_use]
    pub fn with_arity(mut self, arity: Option<usize>) -> Self {
        self.arity = arity;
        self
    }

    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Fingerprint of the identifier that derived every key.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub const fn arity(&self) -> Option<usize> {
        self.arity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, signature: &RowSignature) -> Option<u64> {
        self.entries.get(signature).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RowSignature, u64)> {
        self.entries.iter().map(|(signature, count)| (signature, *count))
    }

    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<RowSignature, u64> {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> BTreeMap<RowSignature, u64> {
        self.entries
    }

    /// Sum of all counts, saturating.
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    /// Encode for transport between execution contexts.
    pub fn encode(&self) -> Result<Vec<u8>, SerializeError> {
        serialize(self)
    }

    /// Decode a transported partial, refusing payloads above `max_bytes`.
    ///
    /// Decoding checks wire shape only; semantic validation happens when the
    /// partial is merged.
    pub fn decode(bytes: &[u8], max_bytes: usize) -> Result<Self, SerializeError> {
        deserialize_bounded(bytes, max_bytes)
    }
}
