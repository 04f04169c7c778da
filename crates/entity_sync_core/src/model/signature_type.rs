//! Signature type codes and their display names.

use serde::{Deserialize, Serialize};

/// Name reported for any code outside the known table.
pub const UNKNOWN_SIGNATURE_TYPE: &str = "UNKNOWN";

/// Key/signature algorithm tag carried by entity key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    Contract,
    Ed25519,
    #[serde(rename = "RSA_3072")]
    Rsa3072,
    #[serde(rename = "ECDSA_384")]
    Ecdsa384,
    #[serde(rename = "ECDSA_SECP256K1")]
    EcdsaSecp256k1,
}

impl SignatureType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(Self::Contract),
            3 => Some(Self::Ed25519),
            4 => Some(Self::Rsa3072),
            5 => Some(Self::Ecdsa384),
            6 => Some(Self::EcdsaSecp256k1),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Contract => 2,
            Self::Ed25519 => 3,
            Self::Rsa3072 => 4,
            Self::Ecdsa384 => 5,
            Self::EcdsaSecp256k1 => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Contract => "CONTRACT",
            Self::Ed25519 => "ED25519",
            Self::Rsa3072 => "RSA_3072",
            Self::Ecdsa384 => "ECDSA_384",
            Self::EcdsaSecp256k1 => "ECDSA_SECP256K1",
        }
    }
}

/// Returns the display name for `code`, or `UNKNOWN` when unrecognized.
pub fn signature_type_name(code: i64) -> &'static str {
    SignatureType::from_code(code).map_or(UNKNOWN_SIGNATURE_TYPE, SignatureType::name)
}
