use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::ModelError;

/// A peer node known to the local node service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// Hex-encoded public key.
    pub pubkey: String,
    /// Hex-encoded SHA-256 of the raw public key.
    pub pubkey_hash: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub added: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flag")]
    pub pinned: bool,
    #[serde(default)]
    pub label: Option<String>,
}

impl Node {
    /// Recompute the hash from `pubkey` and compare it with `pubkey_hash`.
    pub fn verify_pubkey_hash(&self) -> Result<bool, ModelError> {
        let raw = hex::decode(&self.pubkey).map_err(|e| ModelError::InvalidPubkey(e.to_string()))?;
        let expected = hex::encode(Sha256::digest(&raw));
        Ok(expected.eq_ignore_ascii_case(&self.pubkey_hash))
    }

    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => self.pubkey_hash.chars().take(16).collect(),
        }
    }
}

/// The service stores `pinned` as an integer column.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
