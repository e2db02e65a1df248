//! Register-level access to peripherals on an I2C bus.
//!
//! Devices expose numbered registers: a one-byte register address selects
//! the register, followed by the value bytes. [`RegisterTransport`] maps
//! typed register reads and writes onto the three bus primitives of
//! [`crate::hw_trait::I2cBus`]; [`codec`] holds the byte-order rules.

pub mod codec;
pub mod register;

pub use register::RegisterTransport;
