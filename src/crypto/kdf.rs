use argon2::{Algorithm, Argon2, Params, Version};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use crate::error::{HashError, Result};

/// Iteration count applied when none is configured.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 1000;

/// Smallest output Argon2 will produce.
pub const ARGON2_MIN_OUTPUT_LEN: usize = Params::MIN_OUTPUT_LEN;
/// Smallest salt Argon2 will accept.
pub const ARGON2_MIN_SALT_LEN: usize = argon2::MIN_SALT_LEN;

/// Pseudorandom function underneath PBKDF2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Prf {
    #[default]
    HmacSha1,
    HmacSha256,
    HmacSha512,
}

impl Prf {
    pub fn name(&self) -> &'static str {
        match self {
            Prf::HmacSha1 => "pbkdf2-sha1",
            Prf::HmacSha256 => "pbkdf2-sha256",
            Prf::HmacSha512 => "pbkdf2-sha512",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    mem_cost_kib: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            // 64 MiB
            mem_cost_kib: 64 * 1024,
            time_cost: 3,
            parallelism: 1,
        }
    }
}

impl Argon2Params {
    pub fn new(mem_cost_kib: u32, time_cost: u32, parallelism: u32) -> Result<Self> {
        let params = Self {
            mem_cost_kib,
            time_cost,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn validate(&self) -> Result<()> {
        if self.mem_cost_kib < 8 {
            return Err(invalid("argon_mem", "argon2 memory cost too low"));
        }
        if self.time_cost < 1 {
            return Err(invalid("argon_time", "argon2 time cost must be >= 1"));
        }
        if self.parallelism < 1 {
            return Err(invalid(
                "argon_parallelism",
                "argon2 parallelism must be >= 1",
            ));
        }
        if self.mem_cost_kib < 8 * self.parallelism {
            return Err(invalid(
                "argon_mem",
                "argon2 memory cost must be at least 8 * parallelism",
            ));
        }
        Ok(())
    }
}

/// Key derivation function and its cost parameters.
///
/// Part of a hasher's configuration: a record can only be verified with the
/// same parameters it was hashed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfParams {
    Pbkdf2 { prf: Prf, iterations: u32 },
    Argon2id(Argon2Params),
}

impl Default for KdfParams {
    fn default() -> Self {
        KdfParams::Pbkdf2 {
            prf: Prf::default(),
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    pub fn pbkdf2(prf: Prf, iterations: u32) -> Result<Self> {
        let params = KdfParams::Pbkdf2 { prf, iterations };
        params.validate()?;
        Ok(params)
    }

    pub fn name(&self) -> &'static str {
        match self {
            KdfParams::Pbkdf2 { prf, .. } => prf.name(),
            KdfParams::Argon2id(_) => "argon2id",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            KdfParams::Pbkdf2 { iterations, .. } if *iterations < 1 => Err(invalid(
                "iterations",
                "pbkdf2 iterations must be >= 1",
            )),
            KdfParams::Pbkdf2 { .. } => Ok(()),
            KdfParams::Argon2id(params) => params.validate(),
        }
    }

    /// Checks hash and salt lengths against the minimums of the algorithm.
    pub fn check_lengths(&self, hash_length: usize, salt_length: usize) -> Result<()> {
        if let KdfParams::Argon2id(_) = self {
            if hash_length < ARGON2_MIN_OUTPUT_LEN {
                return Err(invalid("hash_length", "argon2 needs at least 4 output bytes"));
            }
            if salt_length < ARGON2_MIN_SALT_LEN {
                return Err(invalid("salt_length", "argon2 needs at least 8 salt bytes"));
            }
        }
        Ok(())
    }
}

/// Derives `output_len` bytes from `password` and `salt`.
///
/// Identical inputs always yield identical output.
pub fn derive_key(
    password: &str,
    salt: &[u8],
    output_len: usize,
    kdf: KdfParams,
) -> Result<Zeroizing<Vec<u8>>> {
    kdf.validate()?;

    let mut out = Zeroizing::new(vec![0u8; output_len]);

    match kdf {
        KdfParams::Pbkdf2 { prf, iterations } => {
            let password = password.as_bytes();
            match prf {
                Prf::HmacSha1 => pbkdf2_hmac::<Sha1>(password, salt, iterations, &mut out),
                Prf::HmacSha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out),
                Prf::HmacSha512 => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out),
            }
        }
        KdfParams::Argon2id(params) => {
            let params = Params::new(
                params.mem_cost_kib,
                params.time_cost,
                params.parallelism,
                Some(output_len),
            )
            .map_err(|e| HashError::KeyDerivation(format!("invalid argon2 params: {e}")))?;

            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password_into(password.as_bytes(), salt, &mut out)
                .map_err(|e| HashError::KeyDerivation(format!("argon2: {e}")))?;
        }
    }

    Ok(out)
}

fn invalid(param: &'static str, reason: &'static str) -> HashError {
    HashError::InvalidArgument { param, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn cheap_argon2() -> KdfParams {
        KdfParams::Argon2id(Argon2Params::new(64, 1, 1).unwrap())
    }

    #[test]
    fn pbkdf2_sha1_matches_rfc6070_vectors() {
        let one = KdfParams::pbkdf2(Prf::HmacSha1, 1).unwrap();
        let two = KdfParams::pbkdf2(Prf::HmacSha1, 2).unwrap();

        let k1 = derive_key("password", b"salt", 20, one).unwrap();
        let k2 = derive_key("password", b"salt", 20, two).unwrap();

        assert_eq!(hex(&k1), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
        assert_eq!(hex(&k2), "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957");
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let kdf = KdfParams::default();

        let k1 = derive_key("password", &salt, 32, kdf).unwrap();
        let k2 = derive_key("password", &salt, 32, kdf).unwrap();

        assert_eq!(k1, k2);
    }

    #[test]
    fn output_length_is_honoured() {
        let salt = [1u8; 8];
        for len in [1, 20, 32, 100] {
            let key = derive_key("pw", &salt, len, KdfParams::default()).unwrap();
            assert_eq!(key.len(), len);
        }
    }

    #[test]
    fn prf_affects_output() {
        let salt = [7u8; 16];

        let derive = |prf| {
            let kdf = KdfParams::pbkdf2(prf, 10).unwrap();
            derive_key("pw", &salt, 32, kdf).unwrap()
        };

        let sha1 = derive(Prf::HmacSha1);
        let sha256 = derive(Prf::HmacSha256);
        let sha512 = derive(Prf::HmacSha512);

        assert_ne!(sha1, sha256);
        assert_ne!(sha256, sha512);
    }

    #[test]
    fn argon2_params_affect_output() {
        let salt = [7u8; 16];

        let kdf1 = KdfParams::Argon2id(Argon2Params::new(64, 1, 1).unwrap());
        let kdf2 = KdfParams::Argon2id(Argon2Params::new(128, 1, 1).unwrap());

        let k1 = derive_key("pw", &salt, 32, kdf1).unwrap();
        let k2 = derive_key("pw", &salt, 32, kdf2).unwrap();

        assert_ne!(k1, k2);
    }

    #[test]
    fn argon2_rejects_short_salt() {
        assert!(matches!(
            derive_key("pw", &[0u8; 4], 32, cheap_argon2()),
            Err(HashError::KeyDerivation(_))
        ));
    }

    #[test]
    fn invalid_params_fail_gracefully() {
        assert!(Argon2Params::new(0, 0, 0).is_err());
        assert!(Argon2Params::new(8, 1, 2).is_err());
        assert!(matches!(
            KdfParams::pbkdf2(Prf::HmacSha256, 0),
            Err(HashError::InvalidArgument {
                param: "iterations",
                ..
            })
        ));
    }

    #[test]
    fn argon2_minimum_constants() {
        assert_eq!(ARGON2_MIN_OUTPUT_LEN, 4);
        assert_eq!(ARGON2_MIN_SALT_LEN, 8);
    }

    #[test]
    fn argon2_length_minimums() {
        let kdf = cheap_argon2();

        assert!(kdf.check_lengths(32, 16).is_ok());
        assert!(kdf.check_lengths(3, 16).is_err());
        assert!(kdf.check_lengths(32, 7).is_err());
        assert!(KdfParams::default().check_lengths(1, 1).is_ok());
    }
}
