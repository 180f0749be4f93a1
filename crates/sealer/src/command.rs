//! `seal` and `open` commands over an opaque [`Aead`].

use std::fmt;
use std::str::FromStr;

use cbc_hmac::{Aead, ErrorKind, NONCE_SIZE};
use rand_core::{OsRng, RngCore};
use thiserror::Error;
use tracing::{debug, warn};

use crate::envelope::{Envelope, EnvelopeError};

/// Errors produced by a sealer command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The first argument is not a known command.
    #[error("unknown command {0:?} (expected \"seal\" or \"open\")")]
    UnknownCommand(String),

    /// The input is not a well-formed envelope.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The envelope parsed but its ciphertext is structurally invalid.
    #[error("malformed ciphertext: {0}")]
    Malformed(cbc_hmac::Error),

    /// Authentication or padding failed. The two are not told apart.
    #[error("decryption failed")]
    DecryptionFailed,
}

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Encrypt stdin into an envelope.
    Seal,
    /// Decrypt an envelope from stdin.
    Open,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Seal => "seal",
            Command::Open => "open",
        })
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seal" => Ok(Command::Seal),
            "open" => Ok(Command::Open),
            other => Err(CommandError::UnknownCommand(other.to_owned())),
        }
    }
}

/// Run `command` over `input`, returning the bytes to write to stdout.
///
/// # Errors
///
/// Only [`Command::Open`] can fail; see [`open`].
pub fn run(
    command: Command,
    aead: &dyn Aead,
    input: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CommandError> {
    match command {
        Command::Seal => {
            let mut nonce = [0u8; NONCE_SIZE];
            OsRng.fill_bytes(&mut nonce);
            let envelope = seal(aead, nonce, input, aad);
            Ok(envelope.to_string().into_bytes())
        }
        Command::Open => {
            let text = std::str::from_utf8(input).map_err(|_| EnvelopeError::InvalidFormat)?;
            let envelope: Envelope = text.trim().parse()?;
            open(aead, &envelope, aad)
        }
    }
}

/// Seal `plaintext` under a caller-supplied nonce.
pub fn seal(aead: &dyn Aead, nonce: [u8; NONCE_SIZE], plaintext: &[u8], aad: &[u8]) -> Envelope {
    let ciphertext = aead.seal(Vec::with_capacity(plaintext.len() + aead.overhead()), &nonce, plaintext, aad);
    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed"
    );
    Envelope { nonce, ciphertext }
}

/// Open an envelope.
///
/// # Errors
///
/// Returns [`CommandError::Malformed`] for framing errors and
/// [`CommandError::DecryptionFailed`] for authentication or padding failures.
pub fn open(aead: &dyn Aead, envelope: &Envelope, aad: &[u8]) -> Result<Vec<u8>, CommandError> {
    aead.open(Vec::new(), &envelope.nonce, &envelope.ciphertext, aad)
        .map_err(|e| {
            warn!(kind = ?e.kind(), "failed to open envelope");
            match e.kind() {
                ErrorKind::Authentication | ErrorKind::Padding => CommandError::DecryptionFailed,
                ErrorKind::Configuration | ErrorKind::Input => CommandError::Malformed(e),
            }
        })
}
