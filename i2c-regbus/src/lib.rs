//! Register-oriented access to I2C peripherals through Linux i2c-dev.
//!
//! [`BusHandle`] owns an open `/dev/i2c-N` descriptor bound to one target
//! address and provides raw reads, raw writes and a combined write-then-read
//! with no stop condition in between. [`RegisterTransport`] builds typed
//! register reads and writes (8/16/24/32-bit, big- and little-endian) on top
//! of those three primitives.
//!
//! The i2c-dev kernel module must be loaded (`modprobe i2c-dev`).
//!
//! ```no_run
//! use i2c_regbus::{BusHandle, RegisterTransport};
//!
//! # fn main() -> i2c_regbus::Result<()> {
//! let mut sensor = RegisterTransport::new(BusHandle::open(0x76, "/dev/i2c-1")?);
//! let chip_id = sensor.read_reg_byte(0xD0)?;
//! sensor.write_reg_byte(0xF4, 0x27)?;
//! let raw = sensor.read_reg_bytes(0xF7, 6)?;
//! # let _ = (chip_id, raw);
//! sensor.close()
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hw_trait;
pub mod peripheral;
pub mod tracing;
pub mod transport;

pub use config::BusConfig;
pub use error::{Error, Result};
pub use hw_trait::I2cBus;
pub use peripheral::RegisterTransport;
pub use transport::BusHandle;
