use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
mod auth;
use saltnest::{
    Argon2Params, Charset, DEFAULT_HASH_LEN, DEFAULT_PBKDF2_ITERATIONS, DEFAULT_SALT_LEN,
    HashedPassword, Hasher, KdfParams, Prf,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KdfKind {
    #[value(name = "pbkdf2-sha1")]
    Pbkdf2Sha1,
    #[value(name = "pbkdf2-sha256")]
    Pbkdf2Sha256,
    #[value(name = "pbkdf2-sha512")]
    Pbkdf2Sha512,
    Argon2id,
}

#[derive(Debug, clap::Args)]
struct KdfArgs {
    /// Key derivation function
    #[arg(long, value_enum, default_value_t = KdfKind::Pbkdf2Sha1, env = "SALTNEST_KDF")]
    kdf: KdfKind,

    /// PBKDF2 iteration count (default: 1000)
    #[arg(long, env = "SALTNEST_ITERATIONS")]
    iterations: Option<u32>,

    /// Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem")]
    mem_cost_kib: Option<u32>,

    /// Argon2 time cost / iterations (default: 3)
    #[arg(long = "argon-time")]
    time_cost: Option<u32>,

    /// Argon2 parallelism (default: 1)
    #[arg(long = "argon-parallelism")]
    parallelism: Option<u32>,
}

impl KdfArgs {
    fn to_kdf_params(&self) -> Result<KdfParams> {
        let iterations = self.iterations.unwrap_or(DEFAULT_PBKDF2_ITERATIONS);

        let params = match self.kdf {
            KdfKind::Pbkdf2Sha1 => KdfParams::pbkdf2(Prf::HmacSha1, iterations)?,
            KdfKind::Pbkdf2Sha256 => KdfParams::pbkdf2(Prf::HmacSha256, iterations)?,
            KdfKind::Pbkdf2Sha512 => KdfParams::pbkdf2(Prf::HmacSha512, iterations)?,
            KdfKind::Argon2id => {
                let default = Argon2Params::default();
                KdfParams::Argon2id(Argon2Params::new(
                    self.mem_cost_kib.unwrap_or(default.mem_cost_kib()),
                    self.time_cost.unwrap_or(default.time_cost()),
                    self.parallelism.unwrap_or(default.parallelism()),
                )?)
            }
        };

        Ok(params)
    }
}

#[derive(Debug, Parser)]
#[command(name = "saltnest")]
#[command(
    version,
    about = "Salted PBKDF2 password hashing with a printable 256-symbol encoding."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the record as JSON
    Hash {
        /// Length of the derived hash in bytes
        #[arg(long, default_value_t = DEFAULT_HASH_LEN, env = "SALTNEST_HASH_LENGTH")]
        hash_length: usize,

        /// Length of the generated salt in bytes
        #[arg(long, default_value_t = DEFAULT_SALT_LEN, env = "SALTNEST_SALT_LENGTH")]
        salt_length: usize,

        #[command(flatten)]
        kdf: KdfArgs,
    },

    /// Verifies a password against a stored JSON record
    Verify {
        /// Path to the JSON record written by `hash`
        #[arg(long, value_name = "PATH", env = "SALTNEST_RECORD")]
        record: PathBuf,

        #[command(flatten)]
        kdf: KdfArgs,
    },

    /// Prints the 256-symbol alphabet used for hashes and salts
    Charset,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "saltnest=warn",
        1 => "saltnest=info",
        _ => "saltnest=debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Hash {
            hash_length,
            salt_length,
            kdf,
        } => {
            let kdf = kdf.to_kdf_params()?;
            let hasher = Hasher::with_kdf(hash_length, salt_length, kdf)?;
            let password = auth::read_new_password_with_confirmation()?;

            let hashed = hasher.hash(&password)?;
            drop(password);

            info!(kdf = kdf.name(), "password hashed");
            println!("{}", hashed.to_json()?);
        }
        Commands::Verify { record, kdf } => {
            let kdf = kdf.to_kdf_params()?;
            let json = std::fs::read_to_string(&record)
                .with_context(|| format!("failed to read record {}", record.display()))?;
            let hashed = HashedPassword::from_json(&json)
                .with_context(|| format!("failed to parse record {}", record.display()))?;
            debug!(
                hash_length = hashed.hash_len(),
                salt_length = hashed.salt_len(),
                "record loaded"
            );

            let hasher = Hasher::with_kdf(hashed.hash_len(), hashed.salt_len(), kdf)?;
            let password = auth::read_password()?;

            if !hasher.verify(&password, &hashed)? {
                bail!("password does not match");
            }
            println!("password matches");
        }
        Commands::Charset => {
            for (index, symbol) in Charset::global().symbols().iter().enumerate() {
                println!("{index:>3}  U+{:04X}  {symbol}", u32::from(*symbol));
            }
        }
    }

    Ok(())
}
