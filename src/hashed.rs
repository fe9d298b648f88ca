//! The stored form of a hashed password.

use serde::{Deserialize, Serialize};

use crate::Hasher;
use crate::error::{HashError, Result};

/// A salted password hash.
///
/// Both fields hold charset-encoded text: one character per byte of the
/// derived hash and of the salt. The pair is immutable once created; callers
/// persist it as two text fields or through [`HashedPassword::to_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct HashedPassword {
    hash: String,
    salt: String,
}

/// Wire shape of a record before its fields are checked for presence.
#[derive(Deserialize)]
struct StoredRecord {
    hash: Option<String>,
    salt: Option<String>,
}

impl TryFrom<StoredRecord> for HashedPassword {
    type Error = HashError;

    fn try_from(record: StoredRecord) -> Result<Self> {
        let hash = record.hash.ok_or(HashError::MissingInput("hash"))?;
        let salt = record.salt.ok_or(HashError::MissingInput("salt"))?;
        let hashed = Self::new(hash, salt);
        hashed.ensure_present()?;
        Ok(hashed)
    }
}

impl HashedPassword {
    pub fn new(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }

    /// Hashes `password` with a fresh salt and the default KDF.
    pub fn generate(password: &str, hash_length: usize, salt_length: usize) -> Result<Self> {
        Hasher::new(hash_length, salt_length)?.hash(password)
    }

    /// Checks `password` against this hash with the default KDF.
    pub fn check(&self, password: &str) -> Result<bool> {
        Hasher::default().verify(password, self)
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Length of the derived hash in bytes.
    pub fn hash_len(&self) -> usize {
        self.hash.chars().count()
    }

    /// Length of the salt in bytes.
    pub fn salt_len(&self) -> usize {
        self.salt.chars().count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record written by [`HashedPassword::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::MissingInput`] when the hash or salt is absent,
    /// `null` or empty, and [`HashError::Record`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<StoredRecord>(json)?.try_into()
    }

    pub(crate) fn ensure_present(&self) -> Result<()> {
        if self.hash.is_empty() {
            return Err(HashError::MissingInput("hash"));
        }
        if self.salt.is_empty() {
            return Err(HashError::MissingInput("salt"));
        }
        Ok(())
    }
}
