use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid argument '{param}': {reason}")]
    InvalidArgument {
        param: &'static str,
        reason: &'static str,
    },

    #[error("invalid character: 0x{0:02X}")]
    InvalidCharacter(u32),

    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("OS random generator unavailable: {0}")]
    Entropy(#[from] getrandom::Error),

    #[error("invalid password record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HashError>;
