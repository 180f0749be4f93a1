//! `sealer` — content encryption from the command line.
//!
//! Usage: `sealer <seal|open> < input > output`
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the content-encryption context from `CEK` and `CONTENT_ENCRYPTION`.
//! 4. Run the command over stdin and write the result to stdout.

mod command;
mod config;
mod envelope;
mod telemetry;

use std::io::{Read, Write};

use anyhow::{Context, Result};
use tracing::info;

use command::Command;
use config::Config;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: sealer configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Content encryption
    // -----------------------------------------------------------------------
    let command: Command = std::env::args()
        .nth(1)
        .context("usage: sealer <seal|open>")?
        .parse()?;

    let key = cfg.key()?;
    let aead = cfg
        .content_encryption
        .new_aead(&key)
        .context("failed to initialise content encryption")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        enc = %cfg.content_encryption,
        %command,
        "sealer starting"
    );

    // -----------------------------------------------------------------------
    // 4. Run
    // -----------------------------------------------------------------------
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("failed to read stdin")?;

    let output = command::run(command, &*aead, &input, cfg.aad.as_bytes())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output).context("failed to write stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
