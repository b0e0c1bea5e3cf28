//! Invocation plumbing shared by the action binaries.
//!
//! Every binary follows the same sequence: initialise tracing, read one JSON
//! parameter object (from `--params` or stdin), decode it, run the handler,
//! and print the result to stdout. Decoding failures become the same
//! normalized result shape the handler would have produced.

use std::io::{self, Read};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::domain::DomainError;

/// Initialise JSON tracing from the environment filter.
///
/// Safe to call once per process; a second initialisation is reported and
/// ignored rather than treated as fatal.
pub fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }
}

/// Read the raw parameter payload from `--params` or stdin.
pub fn read_payload(explicit: Option<String>) -> io::Result<String> {
    if let Some(raw) = explicit {
        if raw.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--params must not be empty when provided",
            ));
        }
        return Ok(raw);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    Ok(raw)
}

/// Decode the parameter object, reporting failures as validation errors.
pub fn decode_params<T: DeserializeOwned>(raw: &str) -> Result<T, DomainError> {
    serde_json::from_str(raw).map_err(|error| {
        DomainError::invalid_request(format!("invalid invocation parameters: {error}"))
    })
}

/// Print the handler result as one JSON line on stdout.
pub fn emit<T: Serialize>(result: &T) -> io::Result<()> {
    let rendered = serde_json::to_string(result).map_err(io::Error::other)?;
    println!("{rendered}");
    Ok(())
}
