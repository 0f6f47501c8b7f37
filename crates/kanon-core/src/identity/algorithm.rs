use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};
use uuid::Builder as UuidBuilder;
use xxhash_rust::xxh3::xxh3_128;

///
/// HashAlgorithm
///
/// Deterministic digest used to turn a canonical row string into a
/// fixed-shape, lowercase hex identifier. Selected explicitly per identifier;
/// there is no shared mutable default.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// MD5 name-based UUID (version 3 bits set), rendered without hyphens.
    #[default]
    NameUuid,
    Md5,
    Sha256,
    /// 128-bit XXH3, seed 0.
    Xxh3,
}

impl HashAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameUuid => "name_uuid",
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Xxh3 => "xxh3",
        }
    }

    /// Number of hex characters every identifier of this algorithm has.
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        match self {
            Self::NameUuid | Self::Md5 | Self::Xxh3 => 32,
            Self::Sha256 => 64,
        }
    }

    /// Digest `bytes` and render the result as lowercase hex.
    #[must_use]
    pub fn digest_hex(self, bytes: &[u8]) -> String {
        match self {
            Self::NameUuid => {
                let uuid = UuidBuilder::from_md5_bytes(md5_bytes(bytes)).into_uuid();
                uuid.simple().to_string()
            }
            Self::Md5 => to_hex(&md5_bytes(bytes)),
            Self::Sha256 => to_hex(&Sha256::digest(bytes)),
            Self::Xxh3 => format!("{:032x}", xxh3_128(bytes)),
        }
    }

    /// Identifier for a free-standing piece of text.
    #[must_use]
    pub fn identify_text(self, content: &str) -> String {
        self.digest_hex(content.as_bytes())
    }

    /// True when `encoded` has the exact shape this algorithm emits.
    #[must_use]
    pub fn is_well_formed(self, encoded: &str) -> bool {
        encoded.len() == self.encoded_len()
            && encoded
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn md5_bytes(bytes: &[u8]) -> [u8; 16] {
    let digest = Md5::digest(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
