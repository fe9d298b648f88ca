use getrandom::fill;
use tracing::error;

use crate::error::{HashError, Result};

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|e| {
        error!("OS random generator failed: {e}");
        HashError::from(e)
    })
}

/// Generate a salt of `len` bytes
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_has_requested_length() {
        assert_eq!(generate_salt(1).unwrap().len(), 1);
        assert_eq!(generate_salt(32).unwrap().len(), 32);
    }

    #[test]
    fn entropy_error_keeps_its_source() {
        use std::error::Error;

        let err = HashError::from(getrandom::Error::UNSUPPORTED);

        assert!(matches!(err, HashError::Entropy(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("OS random generator unavailable: "));
    }

    #[test]
    fn consecutive_salts_differ() {
        let a = generate_salt(32).unwrap();
        let b = generate_salt(32).unwrap();
        assert_ne!(a, b);
    }
}
