use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

///
/// RowSignature
///
/// Opaque identifier of one equivalence class. Produced only by an
/// `IdentifierStrategy`; equality of signatures is what lets independently
/// processed partitions recognize the same group at merge time.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct RowSignature(String);

impl RowSignature {
    /// Wrap an already-encoded identifier string.
    #[must_use]
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RowSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
