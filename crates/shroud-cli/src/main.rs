//! Shroud CLI tools: key generation, identifier generation, encode/decode.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shroud_core::{facade, FacadeKey, Uuid128};

#[derive(Parser, Debug)]
#[command(name = "shroud")]
#[command(about = "Keyed masking of UUIDv7 timestamps behind a UUIDv4 facade")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new random 128-bit masking key
    Keygen,

    /// Generate a new v7 identifier
    New,

    /// Mask a v7 identifier into a v4-looking facade
    Encode {
        /// Identifier in canonical hyphenated form
        uuid: String,

        /// Masking key as two 16-digit hex words joined by ':'
        #[arg(short, long, env = "SHROUD_KEY", hide_env_values = true)]
        key: String,
    },

    /// Recover the original v7 identifier from a facade
    Decode {
        /// Facade identifier in canonical hyphenated form
        uuid: String,

        /// Masking key as two 16-digit hex words joined by ':'
        #[arg(short, long, env = "SHROUD_KEY", hide_env_values = true)]
        key: String,
    },
}

/// Initialize tracing with sensible defaults.
///
/// Log level is controlled by the `RUST_LOG` environment variable.
/// Defaults to `info` if not set.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn parse_key(text: &str) -> Result<FacadeKey> {
    FacadeKey::from_hex(text).context("invalid key (expected k0:k1 hex words)")
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    match args.command {
        Command::Keygen => {
            let key = FacadeKey::generate();
            println!("{}", key.to_hex());
        }
        Command::New => {
            let id = Uuid128::generate_v7();
            tracing::debug!(version = id.version(), "generated identifier");
            println!("{}", id);
        }
        Command::Encode { uuid, key } => {
            let key = parse_key(&key)?;
            let id = Uuid128::parse(&uuid).context("invalid identifier")?;

            let masked = facade::encode(&id, &key);
            tracing::debug!(version = masked.version(), "masked identifier");
            println!("{}", masked);
        }
        Command::Decode { uuid, key } => {
            let key = parse_key(&key)?;
            let masked = Uuid128::parse(&uuid).context("invalid identifier")?;

            let id = facade::decode(&masked, &key);
            tracing::debug!(version = id.version(), "recovered identifier");
            println!("{}", id);
        }
    }

    Ok(())
}
