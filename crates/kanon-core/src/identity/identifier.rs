use crate::{
    identity::{HashAlgorithm, IdentifierStrategy, IdentifyError, RowSignature, SignatureLayout},
    value::{DEFAULT_NULL_TOKEN, Value},
};
use std::sync::Arc;

///
/// RowIdentifier
///
/// RowIdentifier binds one framing layout, one null substitution, and one
/// injected strategy. Every accumulator taking part in the same logical
/// aggregation must be built from an equivalent identifier.
///

#[derive(Clone, Debug)]
pub struct RowIdentifier {
    layout: SignatureLayout,
    null_token: String,
    strategy: Arc<dyn IdentifierStrategy>,
}

impl RowIdentifier {
    /// Build an identifier around an injected strategy with default framing.
    #[must_use]
    pub fn new(strategy: Arc<dyn IdentifierStrategy>) -> Self {
        Self {
            layout: SignatureLayout::default(),
            null_token: DEFAULT_NULL_TOKEN.to_string(),
            strategy,
        }
    }

    #[must_use]
    pub fn from_algorithm(algorithm: HashAlgorithm) -> Self {
        Self::new(Arc::new(algorithm))
    }

    #[must_use]
    pub fn with_layout(mut self, layout: SignatureLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_null_token(mut self, null_token: impl Into<String>) -> Self {
        self.null_token = null_token.into();
        self
    }

    #[must_use]
    pub const fn layout(&self) -> SignatureLayout {
        self.layout
    }

    #[must_use]
    pub fn null_token(&self) -> &str {
        &self.null_token
    }

    #[must_use]
    pub fn strategy(&self) -> &dyn IdentifierStrategy {
        self.strategy.as_ref()
    }

    #[must_use]
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Stable description of everything that shapes a signature: strategy
    /// name, layout, and null token, e.g. `name_uuid/length_prefixed/4:null`.
    ///
    /// Two identifiers with equal fingerprints derive equal signatures for
    /// equal rows, provided their strategies are named uniquely.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        format!(
            "{}/{}/{}:{}",
            self.strategy.name(),
            self.layout.as_str(),
            self.null_token.len(),
            self.null_token
        )
    }

    /// Canonical pre-hash string for one row.
    pub fn canonical_text(&self, columns: &[Value]) -> Result<String, IdentifyError> {
        if columns.is_empty() {
            return Err(IdentifyError::EmptyRow);
        }

        Ok(self.layout.canonical(columns, &self.null_token))
    }

    /// Derive the row signature for one ordered column tuple.
    pub fn identify(&self, columns: &[Value]) -> Result<RowSignature, IdentifyError> {
        let canonical = self.canonical_text(columns)?;
        let signature = self.strategy.derive(canonical.as_bytes());

        if !self.strategy.accepts(signature.as_str()) {
            return Err(IdentifyError::MalformedSignature {
                strategy: self.strategy.name().to_string(),
                signature: signature.into_string(),
            });
        }

        Ok(signature)
    }

    /// Whether an externally supplied signature fits this identifier's shape.
    #[must_use]
    pub fn accepts(&self, encoded: &str) -> bool {
        self.strategy.accepts(encoded)
    }
}

impl Default for RowIdentifier {
    fn default() -> Self {
        Self::from_algorithm(HashAlgorithm::default())
    }
}
