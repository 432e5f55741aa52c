//! Signature schemes supported by the hosted payment page protocol.
//!
//! Both schemes share the same two-stage construction:
//!
//! ```text
//! digest    = hex(H(field_1 "." field_2 "." ... field_n))
//! signature = hex(H(digest "." secret))
//! ```
//!
//! They differ in the hash primitive, the name of the signature field and the
//! set and order of fields the processor signs in its callback.

use crate::domain::secret::Secret;
use crate::error::HppError;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Separator placed between canonical message parts.
pub const SEPARATOR: &str = ".";

const SHA1_RESPONSE_FIELDS: [&str; 8] = [
    "TIMESTAMP",
    "MERCHANT_ID",
    "ORDER_ID",
    "RESULT",
    "MESSAGE",
    "PASREF",
    "AUTHCODE",
    "SHA1HASH",
];

const MD5_RESPONSE_FIELDS: [&str; 7] = [
    "TIMESTAMP",
    "RESULT",
    "ORDER_ID",
    "MESSAGE",
    "AUTHCODE",
    "PASREF",
    "MD5HASH",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    #[default]
    Sha1,
    /// Legacy variant. Signs a different callback field set, in a different order.
    Md5,
}

impl SignatureScheme {
    /// Lower-case name of the field carrying the signature (`sha1hash` / `md5hash`).
    pub fn signature_field(&self) -> &'static str {
        match self {
            SignatureScheme::Sha1 => "sha1hash",
            SignatureScheme::Md5 => "md5hash",
        }
    }

    /// Keys the processor must send back, in canonical order. The signature
    /// field is always last.
    pub fn response_fields(&self) -> &'static [&'static str] {
        match self {
            SignatureScheme::Sha1 => &SHA1_RESPONSE_FIELDS,
            SignatureScheme::Md5 => &MD5_RESPONSE_FIELDS,
        }
    }

    /// Response keys that make up the canonical message (everything but the
    /// signature field).
    pub fn signed_response_fields(&self) -> &'static [&'static str] {
        let fields = self.response_fields();
        &fields[..fields.len() - 1]
    }

    /// Length of a hex-encoded digest for this scheme.
    pub fn digest_len(&self) -> usize {
        match self {
            SignatureScheme::Sha1 => 40,
            SignatureScheme::Md5 => 32,
        }
    }

    pub fn hex_digest(&self, input: &str) -> String {
        match self {
            SignatureScheme::Sha1 => hex::encode(Sha1::digest(input.as_bytes())),
            SignatureScheme::Md5 => format!("{:x}", md5::compute(input.as_bytes())),
        }
    }

    /// Signs `message` with the two-stage construction.
    pub fn sign(&self, message: &str, secret: &Secret) -> Signature {
        let digest = self.hex_digest(message);
        let keyed = Zeroizing::new(format!("{digest}{SEPARATOR}{}", secret.expose()));
        Signature(self.hex_digest(&keyed))
    }
}

impl FromStr for SignatureScheme {
    type Err = HppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(SignatureScheme::Sha1),
            "md5" => Ok(SignatureScheme::Md5),
            other => Err(HppError::Config(format!(
                "unknown signature scheme '{other}', expected sha1 or md5"
            ))),
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Sha1 => f.write_str("sha1"),
            SignatureScheme::Md5 => f.write_str("md5"),
        }
    }
}

/// Joins message parts with the protocol separator.
pub fn canonical_message<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// A lower-case hex digest produced by [`SignatureScheme::sign`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
