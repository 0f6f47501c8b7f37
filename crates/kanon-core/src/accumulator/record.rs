use crate::identity::RowSignature;
use serde::{Deserialize, Serialize};

///
/// FrequencyRecord
///
/// One equivalence class and how many rows fell into it. Records held by a
/// table always have `count >= 1`; absence means zero.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FrequencyRecord {
    pub identifier: RowSignature,
    pub count: u64,
}

impl FrequencyRecord {
    #[must_use]
    pub const fn new(identifier: RowSignature, count: u64) -> Self {
        Self { identifier, count }
    }
}
