//! Common error types for i2c-regbus.
//!
//! Every failure is handed back to the immediate caller unchanged so it can
//! apply its own retry policy. Nothing here is logged or retried.

use std::{io, path::PathBuf};

use nix::errno::Errno;
use thiserror::Error;

/// Main error type for bus and register operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The bus device node could not be opened read-write
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The kernel refused to bind the target address
    #[error("Failed to bind address 0x{address:02x} on {}: {source}", .path.display())]
    AddressBind {
        address: u8,
        path: PathBuf,
        #[source]
        source: Errno,
    },

    /// Raw read, raw write or combined transfer failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Operation attempted on a handle after close()
    #[error("Bus handle is closed")]
    Closed,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::Io(io::Error::from(errno))
    }
}

/// Convenience type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
