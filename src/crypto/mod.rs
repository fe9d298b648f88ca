//! Cryptographic primitives for the hasher.
//!
//! Provides key derivation and salt generation.

pub mod kdf;
pub mod salt;

pub use kdf::{Argon2Params, DEFAULT_PBKDF2_ITERATIONS, KdfParams, Prf, derive_key};
pub use salt::generate_salt;

/// Default length of the derived hash in bytes.
pub const DEFAULT_HASH_LEN: usize = 32;
/// Default length of the generated salt in bytes.
pub const DEFAULT_SALT_LEN: usize = 32;
