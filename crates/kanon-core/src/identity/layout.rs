use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

///
/// SignatureLayout
///
/// How column texts are framed into the single canonical string that gets
/// hashed.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureLayout {
    /// `<byte-len>:<text>` per column. Distinct column splits never collide.
    #[default]
    LengthPrefixed,

    /// Bare concatenation. `["1","23"]` and `["12","3"]` share a canonical
    /// string; kept for compatibility with identifiers produced that way.
    Concatenated,
}

impl SignatureLayout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LengthPrefixed => "length_prefixed",
            Self::Concatenated => "concatenated",
        }
    }

    /// Build the canonical string for one row.
    #[must_use]
    pub fn canonical(self, columns: &[Value], null_token: &str) -> String {
        let mut out = String::new();
        match self {
            Self::LengthPrefixed => {
                let mut cell = String::new();
                for value in columns {
                    cell.clear();
                    value.write_text(&mut cell, null_token);
                    let _ = write!(out, "{}:", cell.len());
                    out.push_str(&cell);
                }
            }
            Self::Concatenated => {
                for value in columns {
                    value.write_text(&mut out, null_token);
                }
            }
        }

        out
    }
}
