//! Mini Cache - command line access to a cache store
//!
//! Reads, writes and deletes cache entries in the store selected by the
//! environment (see [`Config::from_env`]).

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{Cache, Config, Store, Ttl};

#[derive(Parser, Debug)]
#[command(name = "mini_cache", version, about = "Inspect and modify a cache store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the live value stored under a key
    Get { key: String },
    /// Store a value; parsed as JSON when possible, otherwise kept as a string
    Set {
        key: String,
        value: String,
        /// Lifetime in seconds (defaults to DEFAULT_TTL, or never expires)
        #[arg(long)]
        ttl: Option<i64>,
    },
    /// Report whether a record exists, live or not
    Has { key: String },
    /// Delete a key
    Delete { key: String },
    /// Remove every entry from the store
    Clear,
}

fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    debug!("Configuration loaded: {:?}", config);

    let cache = Cache::new(config.build_store());
    run(&cache, cli.command, config.default_ttl)
}

fn run<S: Store>(cache: &Cache<S>, command: Command, default_ttl: Option<i64>) -> Result<()> {
    match command {
        Command::Get { key } => match cache.get::<Value>(&key)? {
            Some(value) => println!("{}", value),
            None => bail!("No live value for key '{}'", key),
        },
        Command::Set { key, value, ttl } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            if !cache.set(&key, &value, Ttl::from(ttl.or(default_ttl)))? {
                bail!("Failed to store key '{}'", key);
            }
        }
        Command::Has { key } => println!("{}", cache.has(&key)?),
        Command::Delete { key } => {
            if !cache.delete(&key)? {
                bail!("Failed to delete key '{}'", key);
            }
        }
        Command::Clear => {
            if !cache.clear() {
                bail!("Failed to clear the store");
            }
        }
    }
    Ok(())
}
