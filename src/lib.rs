pub mod charset;
mod crypto;
mod error;
mod hashed;

pub use crate::charset::Charset;
pub use crate::crypto::{
    Argon2Params, DEFAULT_HASH_LEN, DEFAULT_PBKDF2_ITERATIONS, DEFAULT_SALT_LEN, KdfParams, Prf,
};
pub use crate::error::{HashError, Result};
pub use crate::hashed::HashedPassword;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Salts, hashes and verifies passwords.
///
/// Lengths and KDF parameters are fixed at construction. Every call is
/// independent, so one `Hasher` can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    hash_length: usize,
    salt_length: usize,
    kdf: KdfParams,
}

impl Default for Hasher {
    fn default() -> Self {
        Self {
            hash_length: DEFAULT_HASH_LEN,
            salt_length: DEFAULT_SALT_LEN,
            kdf: KdfParams::default(),
        }
    }
}

impl Hasher {
    pub fn new(hash_length: usize, salt_length: usize) -> Result<Self> {
        Self::with_kdf(hash_length, salt_length, KdfParams::default())
    }

    pub fn with_kdf(hash_length: usize, salt_length: usize, kdf: KdfParams) -> Result<Self> {
        if hash_length == 0 {
            return Err(HashError::InvalidArgument {
                param: "hash_length",
                reason: "must be greater than zero",
            });
        }
        if salt_length == 0 {
            return Err(HashError::InvalidArgument {
                param: "salt_length",
                reason: "must be greater than zero",
            });
        }
        kdf.validate()?;
        kdf.check_lengths(hash_length, salt_length)?;

        Ok(Self {
            hash_length,
            salt_length,
            kdf,
        })
    }

    pub fn hash_length(&self) -> usize {
        self.hash_length
    }

    pub fn salt_length(&self) -> usize {
        self.salt_length
    }

    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    /// Hashes `password` with a freshly generated salt.
    ///
    /// Any string is accepted, the empty one included.
    ///
    /// # Errors
    ///
    /// Fails only if the OS random generator is unavailable or the KDF
    /// rejects its inputs.
    pub fn hash(&self, password: &str) -> Result<HashedPassword> {
        debug!(
            kdf = self.kdf.name(),
            hash_length = self.hash_length,
            salt_length = self.salt_length,
            "hashing password"
        );

        let salt = crypto::generate_salt(self.salt_length)?;
        let derived = crypto::derive_key(password, &salt, self.hash_length, self.kdf)?;

        Ok(HashedPassword::new(
            charset::encode(&derived),
            charset::encode(&salt),
        ))
    }

    /// Checks `password` against a stored hash.
    ///
    /// The derived length follows the stored hash rather than this hasher's
    /// `hash_length`, so records produced with other length settings still
    /// verify. Only the KDF parameters have to match.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidCharacter`] if the stored salt or hash holds
    /// a character outside the charset, and [`HashError::MissingInput`] if
    /// either is empty. A corrupted record never reports a plain mismatch.
    pub fn verify(&self, password: &str, hashed: &HashedPassword) -> Result<bool> {
        hashed.ensure_present()?;

        let salt = charset::decode(hashed.salt()).inspect_err(|e| {
            warn!("stored salt failed to decode: {e}");
        })?;
        let expected = charset::decode(hashed.hash()).inspect_err(|e| {
            warn!("stored hash failed to decode: {e}");
        })?;

        debug!(
            kdf = self.kdf.name(),
            hash_length = expected.len(),
            salt_length = salt.len(),
            "verifying password"
        );

        let derived = crypto::derive_key(password, &salt, expected.len(), self.kdf)?;

        Ok(derived.as_slice().ct_eq(&expected).into())
    }
}
